use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::capture::{Source, apply_bpf_filter};
use crate::ui::filter::bpf_filter_suggestions;
use crate::ui::tui::state::{UiMode, UiState};

pub fn spawn_input_handler(
    running: Arc<AtomicBool>,
    cap: Arc<Mutex<Source>>,
    ui_state: Arc<Mutex<UiState>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while running.load(Ordering::SeqCst) {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if let Ok(mut state) = ui_state.lock() {
                        state.clear_error();
                    }
                    handle_key_event(key, &running, &cap, &ui_state);
                }
            }
        }
    })
}

fn handle_key_event(
    key: KeyEvent,
    running: &Arc<AtomicBool>,
    cap: &Arc<Mutex<Source>>,
    ui_state: &Arc<Mutex<UiState>>,
) {
    let Ok(mut state) = ui_state.lock() else {
        return;
    };

    let in_menu = matches!(state.mode, UiMode::FilterMenu { .. });

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => running.store(false, Ordering::SeqCst),
        KeyCode::Char('?') => state.toggle_help(),
        KeyCode::Char('/') if state.mode == UiMode::Capture => {
            let interface = state.device.clone().unwrap_or_default();
            state.mode = UiMode::FilterMenu {
                options: bpf_filter_suggestions(&interface),
                selected: 0,
            };
        }
        KeyCode::Up if in_menu => state.move_selection(true),
        KeyCode::Down if in_menu => state.move_selection(false),
        KeyCode::Enter if in_menu => {
            if let Some((label, expr)) = state.selected_filter() {
                apply_selected_filter(&mut state, cap, &label, &expr);
            }
            state.mode = UiMode::Capture;
        }
        KeyCode::Esc => state.mode = UiMode::Capture,
        _ => {}
    }
} // handle_key_event

fn apply_selected_filter(state: &mut UiState, cap: &Arc<Mutex<Source>>, label: &str, expr: &str) {
    let result = match cap.lock() {
        Ok(mut guard) => apply_bpf_filter(&mut guard, expr),
        Err(e) => {
            state.set_error(format!("Failed to lock capture: {}", e));
            return;
        }
    };

    match result {
        Ok(()) => {
            info!(filter = expr, "BPF filter changed");
            state.active_filter = expr.to_string();
            state.set_info(format!("Applied filter: '{}' ({})", expr, label));
        }
        Err(e) => {
            warn!(error = %e, "BPF filter rejected");
            state.set_error(e.to_string());
        }
    }
}
