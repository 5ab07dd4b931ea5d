//! Session-end notifications.
//!
//! The engine schedules one notification each time a countdown starts and
//! cancels it on pause. Delivery belongs to the host; failures never reach the
//! timer.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::NotificationConfig;
use crate::error::PomoError;

/// Opaque identifier of a scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle(Uuid);

impl NotificationHandle {
    /// Create a fresh handle.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Host facility for timed notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationScheduler: Send + Sync {
    /// Schedule a notification `fire_after` from now.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::PermissionDenied` when the host does not allow
    /// notifications.
    fn schedule(
        &self,
        fire_after: Duration,
        title: &str,
        body: &str,
    ) -> Result<NotificationHandle, PomoError>;

    /// Cancel every pending notification.
    fn cancel_all(&self);
}

/// A notification that has fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Handle returned when it was scheduled.
    pub handle: NotificationHandle,
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
}

#[derive(Debug)]
struct Pending {
    fire_at: Instant,
    notification: Notification,
}

/// In-process scheduler polled by the terminal UI.
#[derive(Debug)]
pub struct LocalNotifier {
    enabled: bool,
    pending: Mutex<Vec<Pending>>,
}

impl LocalNotifier {
    /// Create a notifier. A disabled notifier refuses every schedule request.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Create a notifier from config.
    #[must_use]
    pub const fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.enabled)
    }

    /// Remove and return every notification due at `now`.
    pub fn take_due(&self, now: Instant) -> Vec<Notification> {
        let Ok(mut pending) = self.pending.lock() else {
            return Vec::new();
        };

        let (due, waiting): (Vec<_>, Vec<_>) =
            pending.drain(..).partition(|p| p.fire_at <= now);
        *pending = waiting;

        due.into_iter().map(|p| p.notification).collect()
    }

    /// Number of notifications waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map_or(0, |pending| pending.len())
    }
}

impl NotificationScheduler for LocalNotifier {
    fn schedule(
        &self,
        fire_after: Duration,
        title: &str,
        body: &str,
    ) -> Result<NotificationHandle, PomoError> {
        if !self.enabled {
            return Err(PomoError::PermissionDenied(
                "notifications are disabled in config".to_string(),
            ));
        }

        let handle = NotificationHandle::new();
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| PomoError::Storage("notification queue poisoned".to_string()))?;

        pending.push(Pending {
            fire_at: Instant::now() + fire_after,
            notification: Notification {
                handle,
                title: title.to_string(),
                body: body.to_string(),
            },
        });

        Ok(handle)
    }

    fn cancel_all(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let notifier = LocalNotifier::new(true);
        let handle = notifier
            .schedule(Duration::from_secs(5), "Time for a break!", "Nice work.")
            .unwrap();

        assert!(notifier.take_due(Instant::now()).is_empty());
        assert_eq!(notifier.pending_count(), 1);

        let fired = notifier.take_due(Instant::now() + Duration::from_secs(6));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].title, "Time for a break!");
        assert_eq!(notifier.pending_count(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let notifier = LocalNotifier::new(true);
        notifier.schedule(Duration::ZERO, "a", "b").unwrap();
        notifier.cancel_all();

        assert!(notifier.take_due(Instant::now() + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_disabled_refuses() {
        let notifier = LocalNotifier::new(false);
        let err = notifier.schedule(Duration::from_secs(1), "a", "b").unwrap_err();

        assert!(matches!(err, PomoError::PermissionDenied(_)));
        assert_eq!(notifier.pending_count(), 0);
    }
}
