use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::scale::ChartLayout;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Chart coordinates of a terminal cell, or `None` when the cell is outside `area`.
pub fn cell_to_chart(area: Rect, col: u16, row: u16, layout: &ChartLayout) -> Option<(f64, f64)> {
    if !contains(area, col, row) {
        return None;
    }
    Some(clamped_cell_to_chart(area, col, row, layout))
}

/// Like [`cell_to_chart`] but clamps the cell into `area`, so drags can leave the plot.
pub fn clamped_cell_to_chart(area: Rect, col: u16, row: u16, layout: &ChartLayout) -> (f64, f64) {
    let fraction = |pos: u16, start: u16, len: u16| {
        if len <= 1 {
            return 0.5;
        }
        let offset = pos.clamp(start, start + len - 1) - start;
        offset as f64 / (len - 1) as f64
    };
    (
        fraction(col, area.x, area.width) * layout.width,
        fraction(row, area.y, area.height) * layout.height,
    )
}

/// Canvas y grows upward; chart y grows downward.
pub fn flip_y(y: f64, layout: &ChartLayout) -> f64 {
    layout.height - y
}

/// Place a `width` x `height` popup next to the pointer, kept inside `bounds`.
pub fn popup_near(col: u16, row: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let right_edge = bounds.x + bounds.width;
    let bottom_edge = bounds.y + bounds.height;

    let x = if col + 2 + width <= right_edge {
        col + 2
    } else {
        col.saturating_sub(width + 1).max(bounds.x)
    };
    let y = if row + 1 + height <= bottom_edge {
        row + 1
    } else {
        row.saturating_sub(height).max(bounds.y)
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_chart_corners() {
        let area = Rect::new(10, 5, 101, 31);
        let layout = ChartLayout::default();
        assert_eq!(cell_to_chart(area, 10, 5, &layout), Some((0.0, 0.0)));
        assert_eq!(cell_to_chart(area, 110, 35, &layout), Some((1000.0, 600.0)));
        assert_eq!(cell_to_chart(area, 9, 5, &layout), None);
        assert_eq!(clamped_cell_to_chart(area, 200, 0, &layout), (1000.0, 0.0));
    }

    #[test]
    fn popup_stays_in_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let r = popup_near(78, 22, 30, 8, bounds);
        assert!(r.x + r.width <= 80);
        assert!(r.y + r.height <= 24);
        let r = popup_near(5, 5, 30, 8, bounds);
        assert_eq!((r.x, r.y), (7, 6));
    }
}
