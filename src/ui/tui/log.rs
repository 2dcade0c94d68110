use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

// Shared DNS log queue, newest last
lazy_static::lazy_static! {
    pub static ref PACKET_LOG: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
}

/// Adds a rendered message line to the shared log.
pub fn push_log_line(line: String, max_lines: usize) {
    if let Ok(mut log) = PACKET_LOG.lock() {
        push_bounded(&mut log, line, max_lines);
    }
}

pub fn log_snapshot() -> VecDeque<String> {
    PACKET_LOG.lock().map(|log| log.clone()).unwrap_or_default()
}

fn push_bounded(log: &mut VecDeque<String>, line: String, max_lines: usize) {
    log.push_back(line);
    while log.len() > max_lines {
        log.pop_front();
    }
}
