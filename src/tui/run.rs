use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::cli::CommonArgs;
use crate::explorer::Explorer;
use crate::load::load_commits;

use super::events::{handle_key_event, handle_mouse_event};
use super::state::TuiState;
use super::views::{draw_breakdown_panel, draw_help_overlay, draw_scatterplot, draw_summary, draw_tooltip};

type Backend = CrosstermBackend<io::Stdout>;

/// Load the input and run the interactive explorer until the user quits.
pub fn run(common: &CommonArgs) -> anyhow::Result<()> {
    let set = load_commits(&common.input, common.repo_url.as_deref(), true)?;
    log::info!("exploring {} commits", set.len());
    let mut explorer = Explorer::new(set, &common.layout());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal(&mut io::stdout());
        return Err(e.into());
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            restore_terminal(&mut io::stdout());
            return Err(e.into());
        }
    };

    let result = event_loop(&mut terminal, &mut explorer);

    restore_terminal(terminal.backend_mut());
    terminal.show_cursor()?;

    result
}

/// Leave raw mode, the alternate screen and mouse capture. Failures are logged, not returned.
fn restore_terminal<W: io::Write>(out: &mut W) {
    if let Err(e) = disable_raw_mode() {
        log::warn!("failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen, DisableMouseCapture) {
        log::warn!("failed to restore terminal: {e}");
    }
}

fn event_loop(terminal: &mut Terminal<Backend>, explorer: &mut Explorer) -> anyhow::Result<()> {
    let mut state = TuiState::default();
    terminal.clear()?;

    loop {
        terminal.draw(|f| draw(f, explorer, &mut state))?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key) => {
                    if handle_key_event(key, explorer, &mut state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, explorer, &mut state),
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, explorer: &Explorer, state: &mut TuiState) {
    let size = f.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[0]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(13), Constraint::Min(5)])
        .split(columns[1]);

    draw_scatterplot(f, columns[0], explorer, state);
    draw_summary(f, side[0], explorer);
    draw_breakdown_panel(f, side[1], explorer);
    if state.show_tooltip {
        draw_tooltip(f, size, explorer);
    }

    let status = state.status().map(str::to_string).unwrap_or_else(|| {
        let position = state
            .pointer
            .and_then(|(x, y)| explorer.position_label(x, y))
            .map(|label| format!("{label} | "))
            .unwrap_or_default();
        format!("{position}{} | h: help  q: quit", explorer.selection_label())
    });
    f.render_widget(
        Paragraph::new(Line::from(status)).style(Style::default().fg(Color::Gray)),
        rows[1],
    );

    if state.show_help {
        draw_help_overlay(f, size);
    }
}
