use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::explorer::Explorer;
use crate::util::truncate;

use super::super::layout::popup_near;

const WIDTH: u16 = 48;

/// Render the details popup next to the pointer while the tooltip is visible.
pub fn draw_tooltip(f: &mut Frame, bounds: Rect, explorer: &Explorer) {
    let tooltip = explorer.tooltip();
    let Some(content) = tooltip.content().filter(|_| tooltip.is_visible()) else {
        return;
    };

    let rows = content.rows();
    let (x, y) = tooltip.position();
    let area = popup_near(
        x.max(0.0) as u16,
        y.max(0.0) as u16,
        WIDTH,
        rows.len() as u16 + 2,
        bounds,
    );

    let value_width = (WIDTH as usize).saturating_sub(12);
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<8}"),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                ),
                Span::raw(truncate(&value, value_width)),
            ])
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
