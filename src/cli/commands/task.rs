//! Task command implementation.
//!
//! The store accepts anything; the interface rules live here.

use colored::Colorize;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::PomoError;
use crate::features::tasks::{Task, MAX_VISIBLE_TASKS, POMODOROS_RANGE};
use crate::features::Pomodoro;
use crate::output::{format_task_line, format_tasks, to_json};

/// Execute task subcommands.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` when a new task breaks the interface
/// rules, `PomoError::NotFound` when no single task matches an id prefix.
pub fn task(
    app: &mut Pomodoro,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match cmd {
        TaskCommands::List => format_tasks(app.tasks().tasks(), format),
        TaskCommands::Add { name, pomodoros } => add_task(app, &name, pomodoros, format),
        TaskCommands::Delete { id } => delete_task(app, &id, format),
    }
}

/// Check a new task against the interface rules.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` describing the first rule broken.
pub fn validate_new_task(
    existing: usize,
    name: &str,
    pomodoros: u8,
) -> Result<(), PomoError> {
    if existing >= MAX_VISIBLE_TASKS {
        return Err(PomoError::InvalidInput(format!(
            "at most {MAX_VISIBLE_TASKS} tasks; delete one first"
        )));
    }
    if name.trim().is_empty() {
        return Err(PomoError::InvalidInput("task name is empty".to_string()));
    }
    if !POMODOROS_RANGE.contains(&pomodoros) {
        return Err(PomoError::InvalidInput(format!(
            "pomodoros must be between {} and {}",
            POMODOROS_RANGE.start(),
            POMODOROS_RANGE.end()
        )));
    }
    Ok(())
}

fn add_task(
    app: &mut Pomodoro,
    name: &str,
    pomodoros: u8,
    format: OutputFormat,
) -> Result<String, PomoError> {
    validate_new_task(app.tasks().len(), name, pomodoros)?;

    let id = app.add_task(name.trim(), pomodoros);
    let task = app
        .tasks()
        .get(id)
        .cloned()
        .ok_or_else(|| PomoError::NotFound(id.to_string()))?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!(
            "{} Added task\n  {}",
            "✓".green(),
            format_task_line(&task)
        )),
    }
}

fn delete_task(app: &mut Pomodoro, prefix: &str, format: OutputFormat) -> Result<String, PomoError> {
    let task: Task = app
        .tasks()
        .find_by_prefix(prefix)
        .cloned()
        .ok_or_else(|| PomoError::NotFound(format!("no single task matches '{prefix}'")))?;

    app.delete_task(task.id);

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!("{} Deleted task: {}", "✓".green(), task.name)),
    }
}
