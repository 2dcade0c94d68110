use std::{
    collections::{HashMap, VecDeque},
    io::{self, Stdout, stdout},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::error;

use super::help::draw_help_overlay;
use super::log::log_snapshot;
use super::state::{UiMode, UiState};
use crate::core::summary::PacketCounts;
use crate::packet::PacketKind;

/// Everything one frame needs, copied out of the shared state.
struct View {
    lines: VecDeque<String>,
    counts: HashMap<PacketKind, usize>,
    mode: UiMode,
    status: String,
    error_msg: Option<String>,
}

/// Owns the terminal until `running` is cleared. A terminal that cannot
/// be set up clears `running` so capture stops too.
pub fn start_ui_thread(
    running: Arc<AtomicBool>,
    packet_counts: PacketCounts,
    ui_state: Arc<Mutex<UiState>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut terminal = match enter_terminal() {
            Ok(t) => t,
            Err(e) => {
                error!("failed to initialise terminal: {e}");
                running.store(false, Ordering::SeqCst);
                let _ = leave_terminal();
                return;
            }
        };

        while running.load(Ordering::SeqCst) {
            let Some(view) = snapshot(&packet_counts, &ui_state) else {
                error!("UI state lock poisoned");
                break;
            };

            if let Err(e) = terminal.draw(|f| render_ui_by_mode(f, &view)) {
                error!("terminal draw failed: {e}");
                break;
            }

            thread::sleep(Duration::from_millis(33));
        }

        drop(terminal);
        if let Err(e) = leave_terminal() {
            error!("failed to restore terminal: {e}");
        }
    })
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)
}

fn snapshot(packet_counts: &PacketCounts, ui_state: &Arc<Mutex<UiState>>) -> Option<View> {
    let counts = packet_counts.lock().ok()?.clone();
    let state = ui_state.lock().ok()?;

    let mut status = format!(
        "device: {} | filter: {}",
        state.device.as_deref().unwrap_or("-"),
        if state.active_filter.is_empty() { "<none>" } else { state.active_filter.as_str() }
    );
    if let Some(info) = &state.info_msg {
        status.push_str(" | ");
        status.push_str(info);
    }

    Some(View {
        lines: log_snapshot(),
        counts,
        mode: state.mode.clone(),
        status,
        error_msg: state.error_msg.clone(),
    })
}

fn render_ui_by_mode(f: &mut Frame<'_>, view: &View) {
    draw_main_ui(f, view);
    match &view.mode {
        UiMode::Capture => {}
        UiMode::HelpOverlay => draw_help_overlay(f),
        UiMode::FilterMenu { options, selected } => draw_filter_menu(f, options, *selected),
    }
}

fn draw_main_ui(f: &mut Frame<'_>, view: &View) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(rows[0]);

    draw_packet_log(f, &chunks[0], &view.lines);
    draw_stats_panel(f, &chunks[1], &view.counts);
    draw_status_bar(f, &rows[1], &view.status);

    if let Some(msg) = &view.error_msg {
        let area = Rect {
            x: 5,
            y: 2,
            width: f.size().width.saturating_sub(10),
            height: 3,
        };

        let block = Paragraph::new(msg.clone())
            .block(Block::default().title("Error").borders(Borders::ALL))
            .style(Style::default().fg(Color::Red));

        f.render_widget(Clear, area);
        f.render_widget(block, area);
    }
}

fn draw_packet_log(f: &mut Frame<'_>, area: &Rect, lines: &VecDeque<String>) {
    // newest first
    let log_text = lines.iter().rev().map(String::as_str).collect::<Vec<_>>().join("\n");

    let block = Paragraph::new(log_text)
        .block(
            Block::default()
                .title("dnspeek - DNS log (q = quit, ? = help, / = filter)")
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(block, *area);
}

fn draw_stats_panel(f: &mut Frame<'_>, area: &Rect, counts: &HashMap<PacketKind, usize>) {
    let stats_text = if counts.is_empty() {
        "No packets yet.".to_string()
    } else {
        PacketKind::ALL
            .iter()
            .map(|kind| format!("{:<13} {}\n", kind.to_string(), counts.get(kind).copied().unwrap_or(0)))
            .collect()
    };

    let block = Paragraph::new(stats_text)
        .block(Block::default().title("Live Packet Stats").borders(Borders::ALL))
        .style(Style::default().fg(Color::Green));

    f.render_widget(block, *area);
}

fn draw_status_bar(f: &mut Frame<'_>, area: &Rect, status: &str) {
    let block = Paragraph::new(status.to_string())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(block, *area);
}

fn draw_filter_menu(f: &mut Frame<'_>, options: &[(String, String)], selected: usize) {
    let items: Vec<ListItem> = options
        .iter()
        .map(|(label, expr)| ListItem::new(format!("{label}  [{expr}]")))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Select BPF Filter (Enter to apply, Esc to cancel)")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bg(Color::Blue));

    let mut state = ListState::default();
    state.select(Some(selected));

    let size = f.size();
    let area = Rect {
        x: size.width / 8,
        y: size.height / 4,
        width: size.width * 3 / 4,
        height: size.height / 2,
    };
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
