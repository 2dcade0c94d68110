use std::{
    collections::HashMap,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use anyhow::Context;
use tracing::info;

use crate::capture::{self, Source};
use crate::config::{Config, DisplayMode};
use crate::core::runner::run_packet_loop;
use crate::core::signal::setup_ctrlc_handler;
use crate::core::summary::{PacketCounts, print_packet_summary};
use crate::ui::device::prompt_device_selection;
use crate::ui::tui::{self, UiState};

/// Live capture on the configured device, prompting when none is set.
/// Returns without capturing if the user quits the prompt.
pub fn run_live(config: &Config) -> anyhow::Result<()> {
    let device = match &config.capture.interface {
        Some(name) => name.clone(),
        None => {
            let devices = capture::available_devices()?;
            match prompt_device_selection(&devices)? {
                Some(index) => devices[index].name.clone(),
                None => return Ok(()),
            }
        }
    };

    let cap = capture::open_device_capture(&device, &config.capture)?;
    run_session(cap, config, config.display.mode, Some(device))
}

/// Replays a pcap file. The TUI is not used for replay; it falls back to
/// summary lines.
pub fn run_replay(path: &Path, config: &Config) -> anyhow::Result<()> {
    let mode = match config.display.mode {
        DisplayMode::Tui => {
            info!("TUI is not available for file replay, printing summaries");
            DisplayMode::Summary
        }
        other => other,
    };

    let cap = capture::open_file_capture(path, &config.capture)?;
    run_session(cap, config, mode, None)
}

fn run_session(cap: Source, config: &Config, mode: DisplayMode, device: Option<String>) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    setup_ctrlc_handler(Arc::clone(&running)).context("failed to set Ctrl+C handler")?;

    let savefile = match &config.capture.export {
        Some(path) => Some(capture::create_savefile(&cap, path)?),
        None => None,
    };

    let cap = Arc::new(Mutex::new(cap));
    let packet_counts: PacketCounts = Arc::new(Mutex::new(HashMap::new()));

    let mut display = config.display.clone();
    display.mode = mode;

    let ui_threads = if mode == DisplayMode::Tui {
        let ui_state = Arc::new(Mutex::new(UiState::new(device, config.capture.filter.clone())));
        let input = tui::spawn_input_handler(Arc::clone(&running), Arc::clone(&cap), Arc::clone(&ui_state));
        let render = tui::start_ui_thread(Arc::clone(&running), Arc::clone(&packet_counts), ui_state);
        Some((input, render))
    } else {
        None
    };

    let result = run_packet_loop(Arc::clone(&running), cap, savefile, Arc::clone(&packet_counts), display);

    // Stop the UI threads so the terminal is restored before printing
    running.store(false, Ordering::SeqCst);
    if let Some((input, render)) = ui_threads {
        join_ui_thread(input, "input");
        join_ui_thread(render, "render");
    }

    print_packet_summary(&packet_counts);
    result.map_err(Into::into)
} // run_session

fn join_ui_thread(handle: thread::JoinHandle<()>, name: &str) {
    if handle.join().is_err() {
        tracing::error!(thread = name, "UI thread panicked");
    }
}
