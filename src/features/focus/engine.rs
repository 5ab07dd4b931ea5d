//! The session state machine.
//!
//! States are {Focus, ShortBreak, LongBreak} × {Running, Paused}. The engine
//! starts Paused in Focus with a full countdown. Reaching zero always leaves
//! the engine Paused; the next session has to be started explicitly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::TimerConfig;
use crate::storage::PersistenceGateway;

use super::notify::NotificationScheduler;
use super::session::{SessionState, SessionType};
use super::timer::{format_mmss, Ticker};

/// Owns the session type, the countdown, and the cycle and daily counters.
pub struct SessionEngine {
    config: TimerConfig,
    state: SessionState,
    ticker: Ticker,
    notifier: Arc<dyn NotificationScheduler>,
    gateway: PersistenceGateway,
}

impl SessionEngine {
    /// Create an engine in its initial state, loading today's count.
    #[must_use]
    pub fn new(
        config: TimerConfig,
        gateway: PersistenceGateway,
        notifier: Arc<dyn NotificationScheduler>,
    ) -> Self {
        let daily_count = gateway.load_daily_count();

        Self {
            state: SessionState {
                session_type: SessionType::Focus,
                remaining_seconds: config.duration_secs(SessionType::Focus),
                active: false,
                cycle_count: 0,
                daily_count,
            },
            ticker: Ticker::every_second(),
            config,
            notifier,
            gateway,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Timer configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Check if the countdown is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Remaining time as MM:SS.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_mmss(self.state.remaining_seconds)
    }

    /// Fraction of the current session already elapsed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.config.duration_secs(self.state.session_type);
        if total == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.state.remaining_seconds) / f64::from(total)
    }

    /// The session `advance_session` would enter from here.
    #[must_use]
    pub const fn next_session_type(&self) -> SessionType {
        match self.state.session_type {
            SessionType::Focus => {
                if self.state.cycle_count + 1 >= self.config.pomodoros_per_cycle {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Focus,
        }
    }

    /// Toggle between Running and Paused.
    pub fn start_pause(&mut self) {
        self.start_pause_at(Instant::now());
    }

    /// Toggle between Running and Paused, arming the ticker relative to `now`.
    ///
    /// Ignored at `00:00`, while the transition tick is still pending.
    pub fn start_pause_at(&mut self, now: Instant) {
        if self.state.active {
            self.pause();
        } else if self.state.remaining_seconds == 0 {
            debug!("Start ignored; session transition pending");
        } else {
            self.start(now);
        }
    }

    /// One elapsed second.
    ///
    /// Counts down while running. The tick that reaches zero pauses the
    /// engine; the following tick performs the transition.
    pub fn tick(&mut self) {
        if self.state.remaining_seconds == 0 {
            self.advance_session();
            self.halt();
            return;
        }

        if !self.state.active {
            return;
        }

        self.state.remaining_seconds -= 1;
        if self.state.remaining_seconds == 0 {
            // Ticker stays armed for the transition tick; the notification is firing now.
            self.state.active = false;
            debug!(session = %self.state.session_type, "Countdown reached zero");
        }
    }

    /// Move to the next session, counting a completed focus session.
    pub fn advance_session(&mut self) {
        let from = self.state.session_type;

        let next = match from {
            SessionType::Focus => {
                self.state.daily_count += 1;
                self.state.cycle_count += 1;
                self.gateway.save_daily_count(self.state.daily_count);

                if self.state.cycle_count >= self.config.pomodoros_per_cycle {
                    self.state.cycle_count = 0;
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Focus,
        };

        self.state.session_type = next;
        self.state.remaining_seconds = self.config.duration_secs(next);

        info!(
            from = %from,
            to = %next,
            daily_count = self.state.daily_count,
            cycle_count = self.state.cycle_count,
            "Session advanced"
        );
    }

    /// Switch to `session_type` with a full countdown, Paused.
    ///
    /// Not a completion: the cycle and daily counters are left alone.
    pub fn select_session(&mut self, session_type: SessionType) {
        self.pause();
        self.state.session_type = session_type;
        self.state.remaining_seconds = self.config.duration_secs(session_type);
        debug!(session = %session_type, "Session selected");
    }

    /// Complete the current session now, without waiting for the countdown.
    pub fn skip_session(&mut self) {
        self.pause();
        self.advance_session();
    }

    /// Deliver every tick that fell due up to `now`.
    ///
    /// Returns the number of ticks delivered.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = self.ticker.take_due(now);

        let mut delivered = 0;
        for _ in 0..due {
            if !self.ticker.is_armed() {
                break;
            }
            self.tick();
            delivered += 1;
        }
        delivered
    }

    /// Time until the next tick, if the ticker is armed.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    /// Re-read today's count, picking up a reset after midnight.
    pub fn reload_daily_count(&mut self) {
        self.state.daily_count = self.gateway.load_daily_count();
    }

    fn start(&mut self, now: Instant) {
        self.state.active = true;
        self.ticker.arm(now);

        let (title, body) = self.completion_notice();
        let fire_after = Duration::from_secs(u64::from(self.state.remaining_seconds));
        if let Err(e) = self.notifier.schedule(fire_after, &title, &body) {
            warn!(error = %e, "Session-end notification not scheduled");
        }

        debug!(
            session = %self.state.session_type,
            remaining = self.state.remaining_seconds,
            "Timer started"
        );
    }

    fn pause(&mut self) {
        self.halt();
        self.notifier.cancel_all();
    }

    fn halt(&mut self) {
        self.state.active = false;
        self.ticker.cancel();
    }

    /// Title and body announcing the session about to begin.
    fn completion_notice(&self) -> (String, String) {
        match self.next_session_type() {
            next @ (SessionType::ShortBreak | SessionType::LongBreak) => (
                "Time for a break!".to_string(),
                format!(
                    "Focus session complete. Enjoy your {}.",
                    next.display_name().to_lowercase()
                ),
            ),
            SessionType::Focus => (
                "Break's over!".to_string(),
                "Time to get back to focus.".to_string(),
            ),
        }
    }
}
