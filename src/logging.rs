use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::{DisplayMode, LoggingConfig};

/// Log file used while the TUI owns the terminal and none is configured.
pub const DEFAULT_TUI_LOG_FILE: &str = "dnspeek.log";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured level. Logs go to the configured
/// file, otherwise to stderr, or to [`DEFAULT_TUI_LOG_FILE`] while the
/// TUI is active.
pub fn init_logging(config: &LoggingConfig, mode: DisplayMode) -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level '{}'", config.level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let file = match (&config.file, mode) {
        (Some(path), _) => Some(path.clone()),
        (None, DisplayMode::Tui) => Some(PathBuf::from(DEFAULT_TUI_LOG_FILE)),
        (None, _) => None,
    };

    let installed = match file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
