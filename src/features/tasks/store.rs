//! Task list storage.
//!
//! The store accepts any input. Limits such as [`MAX_VISIBLE_TASKS`] and
//! non-empty names are enforced by the interface before it calls in.
//!
//! [`MAX_VISIBLE_TASKS`]: super::MAX_VISIBLE_TASKS

use tracing::debug;
use uuid::Uuid;

use crate::storage::PersistenceGateway;

use super::task::Task;

/// Ordered list of tasks, saved after every change.
pub struct TaskStore {
    tasks: Vec<Task>,
    gateway: PersistenceGateway,
}

impl TaskStore {
    /// Load the saved task list.
    #[must_use]
    pub fn load(gateway: PersistenceGateway) -> Self {
        let tasks = gateway.load_tasks();
        debug!(count = tasks.len(), "Loaded tasks");
        Self { tasks, gateway }
    }

    /// All tasks, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find the single task whose id starts with `prefix`.
    ///
    /// Accepts both hyphenated and simple forms. Returns `None` when no task or
    /// more than one task matches.
    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        let needle = prefix.replace('-', "").to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.simple().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    /// Append a new task and return its id.
    pub fn add_task(&mut self, name: impl Into<String>, pomodoros_needed: u8) -> Uuid {
        let task = Task::new(name, pomodoros_needed);
        let id = task.id;
        debug!(%id, name = %task.name, pomodoros_needed, "Adding task");

        self.tasks.push(task);
        self.gateway.save_tasks(&self.tasks);
        id
    }

    /// Remove the task with `id`. Returns whether a task was removed.
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);

        let removed = self.tasks.len() != before;
        if removed {
            debug!(%id, "Deleted task");
            self.gateway.save_tasks(&self.tasks);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::{Clock, SystemClock};
    use crate::storage::MemoryStore;

    fn gateway() -> PersistenceGateway {
        PersistenceGateway::new(MemoryStore::new(), Arc::new(SystemClock) as Arc<dyn Clock>).unwrap()
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let mut store = TaskStore::load(gateway());
        store.add_task("Plan sprint", 2);
        store.add_task("Email", 1);
        let before = store.tasks().to_vec();

        let id = store.add_task("Write report", 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(id).map(|t| t.pomodoros_needed), Some(3));

        assert!(store.delete_task(id));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut store = TaskStore::load(gateway());
        let a = store.add_task("a", 1);
        let b = store.add_task("b", 1);
        let c = store.add_task("c", 1);

        store.delete_task(b);

        let ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = TaskStore::load(gateway());
        store.add_task("a", 1);

        assert!(!store.delete_task(Uuid::new_v4()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_accepts_any_input() {
        let mut store = TaskStore::load(gateway());
        store.add_task("", 0);
        store.add_task("dup", 42);
        store.add_task("dup", 42);
        store.add_task("fourth", 1);

        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_mutations_are_saved() {
        let gateway = gateway();
        let mut store = TaskStore::load(gateway.clone());
        let keep = store.add_task("keep", 2);
        let gone = store.add_task("gone", 1);
        store.delete_task(gone);
        gateway.flush().unwrap();

        let reloaded = TaskStore::load(gateway);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.tasks()[0].id, keep);
    }

    #[test]
    fn test_find_by_prefix() {
        let mut store = TaskStore::load(gateway());
        let id = store.add_task("a", 1);

        let full = id.to_string();
        assert_eq!(store.find_by_prefix(&full).map(|t| t.id), Some(id));
        assert_eq!(store.find_by_prefix(&full[..8]).map(|t| t.id), Some(id));
        assert_eq!(store.find_by_prefix(&full.to_uppercase()[..6]).map(|t| t.id), Some(id));
        assert!(store.find_by_prefix("").is_none());
        assert!(store.find_by_prefix("zzzz").is_none());
    }
}
