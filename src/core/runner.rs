use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread,
};

use pcap::Savefile;
use tracing::{debug, error, info, warn};

use crate::capture::{CaptureError, Source};
use crate::config::{DisplayConfig, DisplayMode};
use crate::core::pipeline::handle_frame;
use crate::core::summary::PacketCounts;
use crate::ui::tui::log::push_log_line;

/// Receives rendered messages and writes them to the log panel or stdout.
fn start_packet_display_thread(rx: Receiver<String>, display: DisplayConfig) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(text) = rx.recv() {
            match display.mode {
                DisplayMode::Tui => push_log_line(text, display.max_log_lines),
                DisplayMode::Report | DisplayMode::Summary => println!("{text}"),
            }
        }
    })
}

/// Reads packets until `running` is cleared or the source is exhausted.
///
/// Each frame is optionally written to `savefile`, counted by kind, and
/// any decoded DNS message is handed to the display thread.
pub fn run_packet_loop(
    running: Arc<AtomicBool>,
    cap: Arc<Mutex<Source>>,
    mut savefile: Option<Savefile>,
    packet_counts: PacketCounts,
    display: DisplayConfig,
) -> Result<(), CaptureError> {
    let (tx, rx): (Sender<String>, Receiver<String>) = mpsc::channel();
    let display_handle = start_packet_display_thread(rx, display.clone());
    let mut result = Ok(());

    while running.load(Ordering::SeqCst) {
        let frame = {
            let mut guard = match cap.lock() {
                Ok(g) => g,
                Err(poisoned) => {
                    error!("capture mutex poisoned: {poisoned}");
                    break;
                }
            };

            match guard.next_packet() {
                Ok(packet) => {
                    if let Some(sf) = &mut savefile {
                        sf.write(&packet);
                    }
                    packet.data.to_vec()
                }
                Err(pcap::Error::TimeoutExpired) => {
                    thread::yield_now();
                    continue;
                }
                Err(pcap::Error::NoMorePackets) => {
                    info!("end of capture file");
                    break;
                }
                Err(e) => {
                    result = Err(CaptureError::Read(e));
                    break;
                }
            }
        };

        let outcome = handle_frame(&frame, display.mode);

        match packet_counts.lock() {
            Ok(mut counts) => *counts.entry(outcome.kind).or_insert(0) += 1,
            Err(_) => warn!("failed to lock packet counts"),
        }

        if let Some(text) = outcome.text {
            if tx.send(text).is_err() {
                warn!("packet display thread has stopped");
            }
        }
    }

    // Close the sender so the display thread exits
    drop(tx);
    if display_handle.join().is_err() {
        error!("packet display thread panicked");
    }

    if let Some(mut sf) = savefile {
        if let Err(e) = sf.flush() {
            warn!("failed to flush savefile: {e}");
        }
    }

    debug!("packet loop finished");
    result
} // run_packet_loop
