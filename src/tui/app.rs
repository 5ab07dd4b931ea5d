//! Application state for the TUI.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::cli::commands::validate_new_task;
use crate::core::Snapshot;
use crate::error::PomoError;
use crate::features::focus::{LocalNotifier, SessionType};
use crate::features::tasks::{MAX_VISIBLE_TASKS, POMODOROS_RANGE};
use crate::features::Pomodoro;

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Timer screen.
    Timer,
    /// Add-task form is open.
    AddTask(TaskForm),
}

/// Fields of the add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Task name being typed.
    pub name: String,
    /// Pomodoro estimate.
    pub pomodoros: u8,
}

impl TaskForm {
    /// The form can be submitted once a name is typed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            pomodoros: *POMODOROS_RANGE.start(),
        }
    }
}

/// Application state.
pub struct App {
    pomodoro: Pomodoro,
    notifier: Arc<LocalNotifier>,
    /// Last snapshot pushed by the core.
    snapshot: Rc<RefCell<Snapshot>>,
    /// Current input mode.
    pub mode: Mode,
    /// Selected task index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the terminal bell rings on notifications.
    pub sound: bool,
    bell_pending: bool,
}

impl App {
    /// Create a new app instance rendering `pomodoro`.
    #[must_use]
    pub fn new(mut pomodoro: Pomodoro, notifier: Arc<LocalNotifier>, sound: bool) -> Self {
        let snapshot = Rc::new(RefCell::new(pomodoro.snapshot()));
        let sink = Rc::clone(&snapshot);
        pomodoro.subscribe(move |s: &Snapshot| *sink.borrow_mut() = s.clone());

        Self {
            pomodoro,
            notifier,
            snapshot,
            mode: Mode::Timer,
            selected: 0,
            status: Some("Press ? for help".to_string()),
            sound,
            bell_pending: false,
        }
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> Ref<'_, Snapshot> {
        self.snapshot.borrow()
    }

    /// Fraction of the current session elapsed.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.pomodoro.engine().progress()
    }

    /// Advance the timer and collect fired notifications.
    pub fn on_tick(&mut self, now: Instant) {
        self.pomodoro.poll(now);

        for notification in self.notifier.take_due(now) {
            debug!(title = %notification.title, "Notification fired");
            self.status = Some(format!("{} {}", notification.title, notification.body));
            self.bell_pending = self.sound;
        }
    }

    /// Take the pending bell request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Start or pause the countdown.
    pub fn start_pause(&mut self) {
        self.pomodoro.start_pause();
        self.status = None;
    }

    /// Pick a session type.
    pub fn select_session(&mut self, session_type: SessionType) {
        self.pomodoro.select_session(session_type);
        self.status = Some(format!("{session_type} selected"));
    }

    /// Skip to the next session.
    pub fn skip_session(&mut self) {
        self.pomodoro.skip_session();
        let next = self.snapshot().session_type;
        self.status = Some(format!("Skipped to {next}"));
    }

    /// Flip dark mode.
    pub fn toggle_dark_mode(&mut self) {
        self.pomodoro.toggle_dark_mode();
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        let len = self.snapshot().tasks.len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Delete the selected task.
    pub fn delete_selected(&mut self) {
        let task = self.snapshot().tasks.get(self.selected).cloned();
        if let Some(task) = task {
            self.pomodoro.delete_task(task.id);
            self.status = Some(format!("Deleted: {}", task.name));

            let len = self.snapshot().tasks.len();
            if self.selected >= len {
                self.selected = len.saturating_sub(1);
            }
        }
    }

    /// Open the add-task form, unless the list is full.
    pub fn open_task_form(&mut self) {
        if self.snapshot().tasks.len() >= MAX_VISIBLE_TASKS {
            self.status = Some(format!("At most {MAX_VISIBLE_TASKS} tasks"));
            return;
        }
        self.mode = Mode::AddTask(TaskForm::default());
    }

    /// Close the form without adding.
    pub fn cancel_task_form(&mut self) {
        self.mode = Mode::Timer;
    }

    /// Type a character into the form.
    pub fn form_push(&mut self, c: char) {
        if let Mode::AddTask(form) = &mut self.mode {
            form.name.push(c);
        }
    }

    /// Delete the last typed character.
    pub fn form_backspace(&mut self) {
        if let Mode::AddTask(form) = &mut self.mode {
            form.name.pop();
        }
    }

    /// Change the pomodoro estimate within its allowed range.
    pub fn form_adjust(&mut self, delta: i8) {
        if let Mode::AddTask(form) = &mut self.mode {
            let next = form.pomodoros.saturating_add_signed(delta);
            form.pomodoros = next.clamp(*POMODOROS_RANGE.start(), *POMODOROS_RANGE.end());
        }
    }

    /// Add the task from the form. Does nothing while the name is empty.
    pub fn submit_task_form(&mut self) {
        let Mode::AddTask(form) = &self.mode else {
            return;
        };
        if !form.can_submit() {
            return;
        }

        let name = form.name.trim().to_string();
        let pomodoros = form.pomodoros;
        let existing = self.snapshot().tasks.len();

        match validate_new_task(existing, &name, pomodoros) {
            Ok(()) => {
                self.pomodoro.add_task(name.clone(), pomodoros);
                self.status = Some(format!("Added: {name}"));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
        self.mode = Mode::Timer;
    }

    /// Flush pending saves before exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the background writer has stopped.
    pub fn shutdown(&self) -> Result<(), PomoError> {
        self.pomodoro.shutdown().inspect_err(|e| {
            warn!(error = %e, "Failed to flush saves on exit");
        })
    }
}
