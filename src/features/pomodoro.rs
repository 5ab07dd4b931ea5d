//! The application state container.
//!
//! [`Pomodoro`] composes the session engine, the task store and the dark mode
//! setting. Every mutating call goes through here, and each one ends by
//! pushing a fresh [`Snapshot`] to the registered sinks.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::TimerConfig;
use crate::core::{Clock, RenderSink, Snapshot};
use crate::error::PomoError;
use crate::storage::PersistenceGateway;

use super::focus::{NotificationScheduler, SessionEngine, SessionType};
use super::tasks::TaskStore;

/// Timer, tasks and settings behind one set of operations.
pub struct Pomodoro {
    engine: SessionEngine,
    tasks: TaskStore,
    dark_mode: bool,
    gateway: PersistenceGateway,
    clock: Arc<dyn Clock>,
    today: NaiveDate,
    sinks: Vec<Box<dyn RenderSink>>,
}

impl Pomodoro {
    /// Load persisted state and build the container.
    #[must_use]
    pub fn open(
        config: TimerConfig,
        gateway: PersistenceGateway,
        notifier: Arc<dyn NotificationScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = SessionEngine::new(config, gateway.clone(), notifier);
        let tasks = TaskStore::load(gateway.clone());
        let dark_mode = gateway.load_dark_mode();

        info!(
            daily_count = engine.state().daily_count,
            tasks = tasks.len(),
            dark_mode,
            "Loaded state"
        );

        Self {
            engine,
            tasks,
            dark_mode,
            today: clock.today(),
            gateway,
            clock,
            sinks: Vec::new(),
        }
    }

    /// Register a sink. It receives the current snapshot right away.
    pub fn subscribe(&mut self, sink: impl RenderSink + 'static) {
        let mut sink: Box<dyn RenderSink> = Box::new(sink);
        sink.render(&self.snapshot());
        self.sinks.push(sink);
    }

    /// Current render state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.engine.state();

        Snapshot {
            session_type: state.session_type,
            formatted_time: self.engine.formatted_time(),
            active: state.active,
            daily_count: state.daily_count,
            dark_mode_enabled: self.dark_mode,
            tasks: self.tasks.tasks().to_vec(),
            cycle_count: state.cycle_count,
            pomodoros_per_cycle: self.engine.config().pomodoros_per_cycle,
        }
    }

    /// The session engine.
    #[must_use]
    pub const fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    /// The task store.
    #[must_use]
    pub const fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// Dark mode flag.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Toggle between Running and Paused.
    pub fn start_pause(&mut self) {
        self.start_pause_at(Instant::now());
    }

    /// Toggle between Running and Paused, ticking relative to `now`.
    pub fn start_pause_at(&mut self, now: Instant) {
        self.engine.start_pause_at(now);
        self.publish();
    }

    /// Switch session type without counting a completion.
    pub fn select_session(&mut self, session_type: SessionType) {
        self.engine.select_session(session_type);
        self.publish();
    }

    /// Complete the current session immediately.
    pub fn skip_session(&mut self) {
        self.roll_over_date();
        self.engine.skip_session();
        self.publish();
    }

    /// Add a task and return its id.
    pub fn add_task(&mut self, name: impl Into<String>, pomodoros_needed: u8) -> Uuid {
        let id = self.tasks.add_task(name, pomodoros_needed);
        self.publish();
        id
    }

    /// Delete a task. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let removed = self.tasks.delete_task(id);
        if removed {
            self.publish();
        }
        removed
    }

    /// Set and persist the dark mode flag.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        self.gateway.save_dark_mode(enabled);
        debug!(enabled, "Dark mode changed");
        self.publish();
    }

    /// Flip the dark mode flag.
    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    /// Drive the timer from the event loop.
    ///
    /// Delivers due ticks and resets the daily count once the local date
    /// changes. Returns whether anything changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        // Reset before ticking so a completion after midnight counts toward the new day.
        let rolled_over = self.roll_over_date();
        let changed = self.engine.poll(now) > 0 || rolled_over;

        if changed {
            self.publish();
        }
        changed
    }

    /// Wait for pending saves to reach the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the background writer has stopped.
    pub fn shutdown(&self) -> Result<(), PomoError> {
        self.gateway.flush()
    }

    fn roll_over_date(&mut self) -> bool {
        let today = self.clock.today();
        if today == self.today {
            return false;
        }

        info!(%today, "Local date changed");
        self.today = today;
        self.engine.reload_daily_count();
        true
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        for sink in &mut self.sinks {
            sink.render(&snapshot);
        }
    }
}
