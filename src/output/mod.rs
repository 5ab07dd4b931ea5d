//! Output formatting for pomofocus.
//!
//! This module provides formatters for displaying timer state and tasks in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::Snapshot;
use crate::error::PomoError;
use crate::features::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format the timer state based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_status(snapshot: &Snapshot, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(snapshot)),
        OutputFormat::Json => format_status_json(snapshot),
    }
}

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks)),
        OutputFormat::Json => format_tasks_json(tasks),
    }
}
