//! Session types and the engine's state record.

use serde::{Deserialize, Serialize};

/// Type of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    /// Focused work (25 minutes by default)
    Focus,
    /// Short break (5 minutes by default)
    ShortBreak,
    /// Long break (15 minutes by default)
    LongBreak,
}

impl SessionType {
    /// All session types, in display order.
    pub const ALL: [Self; 3] = [Self::Focus, Self::ShortBreak, Self::LongBreak];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Pomodoro",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Live state of the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Current session type.
    pub session_type: SessionType,
    /// Seconds left on the countdown.
    pub remaining_seconds: u32,
    /// Whether the countdown is running.
    pub active: bool,
    /// Focus sessions completed since the last long break.
    pub cycle_count: u32,
    /// Focus sessions completed today.
    pub daily_count: u32,
}
