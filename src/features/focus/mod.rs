//! Focus timer.
//!
//! Pomodoro-style sessions:
//! - Focus, short break, and long break countdowns
//! - Cycle counting toward the long break
//! - Daily count of completed focus sessions
//! - Session-end notifications

pub mod engine;
pub mod notify;
pub mod session;
pub mod timer;

pub use engine::SessionEngine;
pub use notify::{LocalNotifier, Notification, NotificationHandle, NotificationScheduler};
pub use session::{SessionState, SessionType};
pub use timer::{format_mmss, Ticker};
