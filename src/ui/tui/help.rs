use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Draws the help overlay on the terminal frame.
pub fn draw_help_overlay(f: &mut Frame<'_>) {
    let size = f.size();

    let block = Block::default()
        .title("Help - dnspeek controls")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));

    let text = Paragraph::new(
        "Keyboard Controls:\n\
         q       - Quit and print the packet summary\n\
         /       - Choose a BPF filter\n\
         ?       - Toggle help\n\
         ↑/↓     - Navigate the filter menu\n\
         Enter   - Apply the selected filter\n\
         Esc     - Cancel or return\n\
         \n\
         Log lines: Q = query, R = response (rcode, answers)\n",
    )
    .block(block)
    .wrap(Wrap { trim: true });

    let area = Rect {
        x: size.width / 4,
        y: size.height / 4,
        width: size.width / 2,
        height: size.height / 2,
    };

    f.render_widget(Clear, area);
    f.render_widget(text, area);
}
