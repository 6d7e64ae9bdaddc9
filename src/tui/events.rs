use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::explorer::Explorer;

use super::input::{copy_hovered, CopyTarget};
use super::layout::{cell_to_chart, clamped_cell_to_chart};
use super::state::TuiState;

/// Handle a keyboard event, returning `true` if the loop should exit.
pub fn handle_key_event(key_event: KeyEvent, explorer: &mut Explorer, state: &mut TuiState) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Esc if state.show_help => state.show_help = false,
        KeyCode::Esc => {
            explorer.clear_brush();
            state.dragging = false;
        }
        KeyCode::Char('c') => copy_hovered(explorer, state, CopyTarget::Id),
        KeyCode::Char('y') => copy_hovered(explorer, state, CopyTarget::Url),
        KeyCode::Char('t') => {
            state.show_tooltip = !state.show_tooltip;
            state.set_status(if state.show_tooltip { "Tooltip on" } else { "Tooltip off" });
        }
        _ => {}
    }
    false
}

/// Translate mouse activity over the plot into hover, tooltip and brush updates.
pub fn handle_mouse_event(mouse_event: MouseEvent, explorer: &mut Explorer, state: &mut TuiState) {
    if state.show_help {
        return;
    }
    let Some(area) = state.plot_area else {
        return;
    };
    let layout = explorer.scene().layout;
    let (col, row) = (mouse_event.column, mouse_event.row);
    let viewport = (col as f64, row as f64);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, y)) = cell_to_chart(area, col, row, &layout) {
                explorer.brush_start(x, y);
                state.dragging = true;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.dragging => {
            let (x, y) = clamped_cell_to_chart(area, col, row, &layout);
            explorer.brush_move(x, y);
            state.pointer = Some((x, y));
        }
        MouseEventKind::Up(MouseButton::Left) if state.dragging => {
            let (x, y) = clamped_cell_to_chart(area, col, row, &layout);
            explorer.brush_end(x, y);
            state.dragging = false;
            state.set_status(explorer.selection_label());
        }
        MouseEventKind::Down(MouseButton::Right) => {
            explorer.clear_brush();
            state.dragging = false;
        }
        MouseEventKind::Moved => match cell_to_chart(area, col, row, &layout) {
            Some((x, y)) => {
                explorer.pointer_over(x, y, viewport);
                explorer.pointer_move(x, y, viewport);
                state.pointer = Some((x, y));
            }
            None => {
                explorer.pointer_leave();
                state.pointer = None;
            }
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;
    use crate::scale::ChartLayout;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    // 101 x 61 cells: one cell is 10 chart units each way
    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 101,
        height: 61,
    };

    fn setup() -> (Explorer, TuiState) {
        let rows = vec![
            line("early", "2025-02-10T04:00:00+00:00", "a.js", "js", 1),
            line("late", "2025-02-20T20:00:00+00:00", "a.css", "css", 1),
        ];
        let explorer = Explorer::new(group_commits(rows, None), &ChartLayout::default());
        let state = TuiState {
            plot_area: Some(AREA),
            ..TuiState::default()
        };
        (explorer, state)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn drag_brushes_through_start_move_end() {
        let (mut ex, mut state) = setup();
        let handle = |ex: &mut Explorer, state: &mut TuiState, kind, col, row| {
            handle_mouse_event(mouse(kind, col, row), ex, state)
        };

        handle(&mut ex, &mut state, MouseEventKind::Down(MouseButton::Left), 0, 0);
        assert!(state.dragging);
        assert!(ex.selection().is_none());

        // top half of the plot: hours 0..12 only
        handle(&mut ex, &mut state, MouseEventKind::Drag(MouseButton::Left), 100, 30);
        assert_eq!(ex.selection_count(), 1);
        assert_eq!(ex.breakdown()[0].language, "js");

        // releasing outside the plot clamps to its edge
        handle(&mut ex, &mut state, MouseEventKind::Up(MouseButton::Left), 200, 200);
        assert!(!state.dragging);
        assert_eq!(ex.selection_count(), 2);
        assert_eq!(ex.brush_rect().map(|r| (r.x1, r.y1)), Some((1000.0, 600.0)));

        handle(&mut ex, &mut state, MouseEventKind::Down(MouseButton::Right), 5, 5);
        assert!(ex.selection().is_none());
        assert_eq!(ex.brush_rect(), None);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let (mut ex, mut state) = setup();
        handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 30), &mut ex, &mut state);
        assert!(ex.selection().is_none());
        assert_eq!(ex.brush_rect(), None);
    }

    #[test]
    fn moving_off_the_plot_hides_tooltip() {
        let (mut ex, mut state) = setup();
        let mark = ex.scene().marks[0].clone();
        let (col, row) = ((mark.cx / 10.0).round() as u16, (mark.cy / 10.0).round() as u16);
        handle_mouse_event(mouse(MouseEventKind::Moved, col, row), &mut ex, &mut state);
        assert!(ex.tooltip().is_visible());
        assert!(state.pointer.is_some());

        handle_mouse_event(mouse(MouseEventKind::Moved, 150, 80), &mut ex, &mut state);
        assert!(!ex.tooltip().is_visible());
        assert_eq!(ex.scene().hovered(), None);
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn keys_toggle_and_quit() {
        let (mut ex, mut state) = setup();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert!(!handle_key_event(key(KeyCode::Char('h')), &mut ex, &mut state));
        assert!(state.show_help);
        handle_key_event(key(KeyCode::Esc), &mut ex, &mut state);
        assert!(!state.show_help);
        handle_key_event(key(KeyCode::Char('t')), &mut ex, &mut state);
        assert!(!state.show_tooltip);
        assert!(handle_key_event(key(KeyCode::Char('q')), &mut ex, &mut state));
    }
}
