//! Terminal User Interface (TUI) for pomofocus.
//!
//! Renders the timer and task list pushed by [`Pomodoro`] and turns key
//! presses into core operations. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Mode, TaskForm};

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::error::PomoError;
use crate::features::focus::LocalNotifier;
use crate::features::Pomodoro;

/// Longest wait for input between redraws.
const FRAME: Duration = Duration::from_millis(100);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(pomodoro: Pomodoro, notifier: Arc<LocalNotifier>, sound: bool) -> Result<(), PomoError> {
    enable_raw_mode().map_err(|e| PomoError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomoError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomoError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!("TUI started");
    let mut app = App::new(pomodoro, notifier, sound);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    let flushed = app.shutdown();
    info!("TUI stopped");
    result.and(flushed)
}

/// Run the main application loop.
fn run_app<B: Backend + Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PomoError> {
    loop {
        app.on_tick(Instant::now());

        if app.take_bell() {
            terminal.backend_mut().write_all(b"\x07").ok();
        }

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomoError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(event::Action::Quit) = event::handle_events(app, FRAME)? {
            break;
        }
    }

    Ok(())
}
