use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod breakdown;
mod help;
mod scatter;
mod summary;
mod tooltip;

pub use breakdown::draw_breakdown_panel;
pub use help::draw_help_overlay;
pub use scatter::draw_scatterplot;
pub use summary::draw_summary;
pub use tooltip::draw_tooltip;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
