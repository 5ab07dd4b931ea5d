//! JSON output formatting for pomofocus.

use serde::Serialize;
use serde_json::json;

use crate::core::Snapshot;
use crate::error::PomoError;
use crate::features::tasks::Task;

/// Format the timer state as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_status_json(snapshot: &Snapshot) -> Result<String, PomoError> {
    to_json(snapshot)
}

/// Format a task list as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task]) -> Result<String, PomoError> {
    let output = json!({
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::SessionType;

    fn snapshot(tasks: Vec<Task>) -> Snapshot {
        Snapshot {
            session_type: SessionType::ShortBreak,
            formatted_time: "05:00".to_string(),
            active: false,
            daily_count: 3,
            dark_mode_enabled: true,
            tasks,
            cycle_count: 3,
            pomodoros_per_cycle: 4,
        }
    }

    #[test]
    fn test_format_status_json() {
        let json = format_status_json(&snapshot(vec![Task::new("Write report", 3)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sessionType"], "shortBreak");
        assert_eq!(value["formattedTime"], "05:00");
        assert_eq!(value["dailyCount"], 3);
        assert_eq!(value["darkModeEnabled"], true);
        assert_eq!(value["tasks"][0]["pomodorosNeeded"], 3);
    }

    #[test]
    fn test_format_tasks_json() {
        let tasks = vec![Task::new("a", 1), Task::new("b", 2)];
        let json = format_tasks_json(&tasks).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][1]["name"], "b");
    }
}
