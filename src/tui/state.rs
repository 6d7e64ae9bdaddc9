use ratatui::layout::Rect;
use std::time::{Duration, Instant};

const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct TuiState {
    pub show_help: bool,
    pub show_tooltip: bool,
    /// Inner area of the scatterplot from the last frame, for mapping mouse cells to chart units.
    pub plot_area: Option<Rect>,
    pub dragging: bool,
    /// Last pointer position inside the plot, in chart units.
    pub pointer: Option<(f64, f64)>,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            show_help: false,
            show_tooltip: true,
            plot_area: None,
            dragging: false,
            pointer: None,
            status_message: None,
        }
    }
}
