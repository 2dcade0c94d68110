use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use dnspeek::cli::CliArgs;
use dnspeek::config::{Config, DisplayMode};
use dnspeek::core::capture_loop::{run_live, run_replay};
use dnspeek::core::hex::parse_hex;
use dnspeek::core::pipeline::render_payload;
use dnspeek::logging::init_logging;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match Config::load(args.config.as_deref(), args.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dnspeek: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Hex and replay modes never start the TUI
    let log_mode = if args.hex.is_some() || args.read.is_some() {
        DisplayMode::Summary
    } else {
        config.display.mode
    };
    if let Err(e) = init_logging(&config.logging, log_mode) {
        eprintln!("dnspeek: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: &Config) -> anyhow::Result<()> {
    if let Some(hex) = &args.hex {
        return decode_hex(hex, args, config);
    }
    if let Some(path) = &args.read {
        return run_replay(path, config);
    }
    run_live(config)
}

/// Decodes one message given on the command line and prints it.
fn decode_hex(hex: &str, args: &CliArgs, config: &Config) -> anyhow::Result<()> {
    let bytes = parse_hex(hex).context("invalid --hex input")?;
    let role = args.role.resolve(&bytes);
    let mode = match config.display.mode {
        DisplayMode::Summary => DisplayMode::Summary,
        DisplayMode::Tui | DisplayMode::Report => DisplayMode::Report,
    };

    let text = render_payload(&bytes, role, mode)
        .with_context(|| format!("failed to decode DNS {}", role.to_string().to_lowercase()))?;
    println!("{text}");
    Ok(())
}
