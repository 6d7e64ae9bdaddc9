use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::explorer::Explorer;

/// Render the summary panel: one label/value line per statistic.
pub fn draw_summary(f: &mut Frame, area: Rect, explorer: &Explorer) {
    let mut lines = vec![
        Line::from(vec![Span::styled(
            "Summary",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    for (label, value) in explorer.stats().entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Stats")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}
