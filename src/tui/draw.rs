use ratatui::style::Color;

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

const MARK_RGB: (f64, f64, f64) = (70.0, 130.0, 180.0);
const SELECTED: Color = Color::Rgb(255, 107, 107);
const HOVERED: Color = Color::Yellow;

/// Horizontal bar of `width` cells filled in proportion to `share` (0..=1).
pub fn share_bar(share: f64, width: usize) -> String {
    let share = if share.is_finite() { share.clamp(0.0, 1.0) } else { 0.0 };
    let cells = share * width as f64;
    let full = cells.floor() as usize;
    let mut bar = "█".repeat(full);
    if full < width {
        let idx = ((cells - full as f64) * LEVELS.len() as f64).floor() as usize;
        if idx > 0 {
            bar.push_str(LEVELS[idx.min(LEVELS.len() - 1)]);
        } else {
            bar.push(' ');
        }
        bar.push_str(&" ".repeat(width - full - 1));
    }
    bar
}

/// Terminal colour for a mark. Opacity has no terminal equivalent, so it dims the fill instead.
pub fn mark_color(opacity: f64, selected: bool) -> Color {
    if opacity >= 1.0 {
        return HOVERED;
    }
    if selected {
        return SELECTED;
    }
    // keep faint marks legible on dark backgrounds
    let k = 0.35 + 0.65 * opacity.clamp(0.0, 1.0) / 0.7;
    let k = k.min(1.0);
    Color::Rgb(
        (MARK_RGB.0 * k) as u8,
        (MARK_RGB.1 * k) as u8,
        (MARK_RGB.2 * k) as u8,
    )
}
