//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomoError;
use crate::features::focus::SessionType;
use crate::tui::app::{App, Mode};

/// Help line shown by `?`.
pub const HELP: &str =
    "space:start/pause | 1/2/3:session | s:skip | a:add | j/k:nav | d:delete | t:theme | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
}

/// Handle terminal events, waiting at most `timeout`.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, PomoError> {
    if event::poll(timeout).map_err(|e| PomoError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| PomoError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Apply one key press.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.mode {
        Mode::Timer => handle_timer_key(app, key.code),
        Mode::AddTask(_) => {
            handle_form_key(app, key.code);
            None
        }
    }
}

fn handle_timer_key(app: &mut App, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        // Timer
        KeyCode::Char(' ') | KeyCode::Enter => app.start_pause(),
        KeyCode::Char('1') => app.select_session(SessionType::Focus),
        KeyCode::Char('2') => app.select_session(SessionType::ShortBreak),
        KeyCode::Char('3') => app.select_session(SessionType::LongBreak),
        KeyCode::Char('s') => app.skip_session(),

        // Tasks
        KeyCode::Char('a') => app.open_task_form(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        KeyCode::Char('t') => app.toggle_dark_mode(),
        KeyCode::Char('?') => app.status = Some(HELP.to_string()),
        _ => {}
    }
    None
}

fn handle_form_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Up | KeyCode::Right => app.form_adjust(1),
        KeyCode::Down | KeyCode::Left => app.form_adjust(-1),
        KeyCode::Char(c) => app.form_push(c),
        _ => {}
    }
}
