use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::explorer::Explorer;

use super::super::draw::mark_color;
use super::super::layout::flip_y;
use super::super::state::TuiState;

/// Render the commit scatterplot on a braille canvas and remember its area for mouse mapping.
pub fn draw_scatterplot(f: &mut Frame, area: Rect, explorer: &Explorer, state: &mut TuiState) {
    let title = if state.dragging {
        "Commits by time of day | Release to finish brush"
    } else {
        "Commits by time of day | Drag to brush, right click or Esc to clear"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    state.plot_area = Some(block.inner(area));

    let scene = explorer.scene();
    let layout = scene.layout;
    let brush = explorer.brush_rect();
    let (left, right, top, bottom) = (
        layout.plot_left(),
        layout.plot_right(),
        layout.plot_top(),
        layout.plot_bottom(),
    );

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, layout.width])
        .y_bounds([0.0, layout.height])
        .paint(move |ctx| {
            for y in &scene.gridlines {
                ctx.draw(&CanvasLine {
                    x1: left,
                    y1: flip_y(*y, &layout),
                    x2: right,
                    y2: flip_y(*y, &layout),
                    color: Color::DarkGray,
                });
            }
            ctx.draw(&CanvasLine {
                x1: left,
                y1: flip_y(bottom, &layout),
                x2: right,
                y2: flip_y(bottom, &layout),
                color: Color::Gray,
            });
            ctx.draw(&CanvasLine {
                x1: left,
                y1: flip_y(top, &layout),
                x2: left,
                y2: flip_y(bottom, &layout),
                color: Color::Gray,
            });
            for tick in scene.y_ticks.iter().step_by(2) {
                ctx.print(0.0, flip_y(tick.pos, &layout), tick.label.clone());
            }
            for tick in &scene.x_ticks {
                ctx.print(tick.pos, 0.0, tick.label.clone());
            }
            ctx.layer();

            for mark in &scene.marks {
                let color = mark_color(mark.opacity, mark.selected);
                let (x, y) = (mark.cx, flip_y(mark.cy, &layout));
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: mark.radius,
                    color,
                });
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
            }

            if let Some(r) = brush {
                ctx.layer();
                ctx.draw(&Rectangle {
                    x: r.x0,
                    y: flip_y(r.y1, &layout),
                    width: r.x1 - r.x0,
                    height: r.y1 - r.y0,
                    color: Color::LightMagenta,
                });
            }
        });

    f.render_widget(canvas, area);
}
