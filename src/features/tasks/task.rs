//! Task type.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Most tasks the interface shows at once.
pub const MAX_VISIBLE_TASKS: usize = 3;

/// Allowed pomodoro estimates.
pub const POMODOROS_RANGE: RangeInclusive<u8> = 1..=10;

/// A user-defined task with an estimate in pomodoros.
///
/// Identity is the `id`: two tasks with the same name and estimate are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Estimated number of focus sessions.
    pub pomodoros_needed: u8,
}

impl Task {
    /// Create a task with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, pomodoros_needed: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pomodoros_needed,
        }
    }

    /// First eight characters of the id, enough to pick a task on the command line.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.simple().to_string().chars().take(8).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tasks_are_distinct() {
        let a = Task::new("Write report", 3);
        let b = Task::new("Write report", 3);

        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_serialized_field_names() {
        let task = Task::new("Review PR", 2);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["name"], "Review PR");
        assert_eq!(json["pomodorosNeeded"], 2);
        assert_eq!(json["id"], task.id.to_string());
    }

    #[test]
    fn test_short_id() {
        let task = Task::new("x", 1);
        assert_eq!(task.short_id().len(), 8);
        assert!(task.id.to_string().starts_with(&task.short_id()));
    }
}
