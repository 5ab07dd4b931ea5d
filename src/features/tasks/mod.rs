//! Task tracking.
//!
//! A short list of tasks, each with an estimate in pomodoros.

pub mod store;
pub mod task;

pub use store::TaskStore;
pub use task::{Task, MAX_VISIBLE_TASKS, POMODOROS_RANGE};
