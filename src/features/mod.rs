//! Feature implementations for pomofocus.
//!
//! - Focus timer and session state machine
//! - Task tracking
//! - The state container tying them to persistence and rendering

pub mod focus;
mod pomodoro;
pub mod tasks;

pub use pomodoro::Pomodoro;
