//! Command implementations for pomofocus.

mod task;

pub use task::{task, validate_new_task};

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{Commands, OutputFormat, Toggle};
use crate::error::PomoError;
use crate::features::Pomodoro;
use crate::output::format_status;

/// Run a one-shot command, then flush queued saves.
///
/// Saves queued while opening (such as a daily count reset) are written even
/// when the command itself fails. `Tui` and `Completions` are handled by the
/// binary and produce no output here.
///
/// # Errors
///
/// Returns the command's error, or a storage error if the flush fails.
pub fn execute(
    app: &mut Pomodoro,
    command: Commands,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let result = match command {
        Commands::Status => status(app, format),
        Commands::Task(args) => task(app, args.command, format),
        Commands::DarkMode { state } => dark_mode(app, state, format),
        Commands::Tui | Commands::Completions { .. } => Ok(String::new()),
    };

    app.shutdown()?;
    result
}

/// Execute status command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status(app: &Pomodoro, format: OutputFormat) -> Result<String, PomoError> {
    format_status(&app.snapshot(), format)
}

/// Execute dark-mode command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn dark_mode(
    app: &mut Pomodoro,
    state: Option<Toggle>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match state {
        Some(toggle) => app.set_dark_mode(toggle.into()),
        None => app.toggle_dark_mode(),
    }

    let enabled = app.dark_mode();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &json!({ "darkModeEnabled": enabled }),
        )?),
        OutputFormat::Pretty => Ok(format!(
            "{} Dark mode {}",
            "✓".green(),
            if enabled { "on" } else { "off" }
        )),
    }
}
