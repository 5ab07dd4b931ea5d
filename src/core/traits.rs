//! Shared traits for the presentation boundary.
//!
//! The core never draws anything. After each state change it pushes a
//! [`Snapshot`] to every registered [`RenderSink`].

use serde::Serialize;

use crate::features::focus::SessionType;
use crate::features::tasks::Task;

/// Everything a view needs to draw the timer screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current session type.
    pub session_type: SessionType,
    /// Remaining time as `MM:SS`.
    pub formatted_time: String,
    /// Whether the countdown is running.
    pub active: bool,
    /// Focus sessions completed today.
    pub daily_count: u32,
    /// Dark appearance flag.
    pub dark_mode_enabled: bool,
    /// Current task list.
    pub tasks: Vec<Task>,
    /// Focus sessions completed since the last long break.
    pub cycle_count: u32,
    /// Focus sessions per cycle.
    pub pomodoros_per_cycle: u32,
}

/// Receiver of state snapshots.
pub trait RenderSink {
    /// Called with the new state after every change.
    fn render(&mut self, snapshot: &Snapshot);
}

impl<F> RenderSink for F
where
    F: FnMut(&Snapshot),
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot);
    }
}
