use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::explorer::Explorer;

use super::super::draw::share_bar;
use super::header_cell;

const BAR_WIDTH: usize = 16;

/// Render the language breakdown for the current selection.
pub fn draw_breakdown_panel(f: &mut Frame, area: Rect, explorer: &Explorer) {
    let header = Row::new(vec![
        header_cell("Language", Color::Yellow),
        header_cell("Lines", Color::Yellow),
        header_cell("Share", Color::Yellow),
        header_cell("", Color::Yellow),
    ]);

    let rows: Vec<Row> = explorer
        .breakdown()
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.language.clone()),
                Cell::from(share.count.to_string()),
                Cell::from(share.percent.clone()),
                Cell::from(share_bar(share.share, BAR_WIDTH))
                    .style(Style::default().fg(Color::Rgb(255, 107, 107))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(BAR_WIDTH as u16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!("Languages | {}", explorer.selection_label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(table, area);
}
