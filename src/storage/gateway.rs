//! Persistence gateway.
//!
//! Translates between in-memory state and four records in a
//! [`KeyValueStore`]. Every value is stored as JSON. Reads are synchronous and
//! never fail: a missing or unreadable record becomes its default. Writes are
//! queued on the [`BackgroundWriter`] and return immediately.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Paths;
use crate::core::Clock;
use crate::error::PomoError;
use crate::features::tasks::Task;

use super::writer::{BackgroundWriter, SharedStore};
use super::{Database, KeyValueStore};

/// Focus sessions completed on the day of the last save.
pub const DAILY_COUNT_KEY: &str = "dailySessionsCompleted";
/// Timestamp written alongside the daily count.
pub const LAST_RESET_KEY: &str = "lastResetDate";
/// Dark appearance flag.
pub const DARK_MODE_KEY: &str = "isDarkModeEnabled";
/// Serialized task list.
pub const TASKS_KEY: &str = "savedTasks";

/// Stateless load/save layer over a key-value store.
///
/// Cloning is cheap; clones share the store and the write queue.
#[derive(Clone)]
pub struct PersistenceGateway {
    inner: Arc<Inner>,
}

struct Inner {
    store: SharedStore,
    writer: BackgroundWriter,
    clock: Arc<dyn Clock>,
}

impl PersistenceGateway {
    /// Wrap `store`, starting its background writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer thread cannot be started.
    pub fn new<S>(store: S, clock: Arc<dyn Clock>) -> Result<Self, PomoError>
    where
        S: KeyValueStore + 'static,
    {
        let store: SharedStore = Arc::new(Mutex::new(Box::new(store)));
        let writer = BackgroundWriter::spawn(Arc::clone(&store))?;

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                writer,
                clock,
            }),
        })
    }

    /// Open the SQLite store under `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories, database, or writer cannot be set up.
    pub fn open(paths: &Paths, clock: Arc<dyn Clock>) -> Result<Self, PomoError> {
        paths.ensure_dirs()?;
        let db = Database::open_at(&paths.database)?;
        Self::new(db, clock)
    }

    /// Load today's completed focus count.
    ///
    /// When the last save happened on an earlier local day the count is reset:
    /// this returns 0 and persists `0` with the current timestamp.
    #[must_use]
    pub fn load_daily_count(&self) -> u32 {
        let today = self.inner.clock.today();

        if let Some(last) = self.read::<DateTime<FixedOffset>>(LAST_RESET_KEY) {
            let last_day = last.with_timezone(&Local).date_naive();
            if last_day != today {
                info!(%last_day, %today, "New day; resetting daily count");
                self.save_daily_count(0);
                return 0;
            }
        }

        self.read(DAILY_COUNT_KEY).unwrap_or(0)
    }

    /// Persist the daily count together with the current timestamp.
    pub fn save_daily_count(&self, count: u32) {
        let now = self.inner.clock.now();
        let entries = [encode(DAILY_COUNT_KEY, &count), encode(LAST_RESET_KEY, &now)];

        // Both records or neither.
        if let [Some(count_entry), Some(stamp_entry)] = entries {
            debug!(count, "Saving daily count");
            self.inner.writer.submit(vec![count_entry, stamp_entry]);
        }
    }

    /// Load the dark mode flag, `false` when unset.
    #[must_use]
    pub fn load_dark_mode(&self) -> bool {
        self.read(DARK_MODE_KEY).unwrap_or(false)
    }

    /// Persist the dark mode flag.
    pub fn save_dark_mode(&self, enabled: bool) {
        if let Some(entry) = encode(DARK_MODE_KEY, &enabled) {
            self.inner.writer.submit(vec![entry]);
        }
    }

    /// Load the task list, empty when unset or unreadable.
    #[must_use]
    pub fn load_tasks(&self) -> Vec<Task> {
        self.read(TASKS_KEY).unwrap_or_default()
    }

    /// Persist the task list.
    pub fn save_tasks(&self, tasks: &[Task]) {
        if let Some(entry) = encode(TASKS_KEY, tasks) {
            debug!(count = tasks.len(), "Saving tasks");
            self.inner.writer.submit(vec![entry]);
        }
    }

    /// Block until every queued save has been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer thread has stopped.
    pub fn flush(&self) -> Result<(), PomoError> {
        self.inner.writer.flush()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let blob = match self.inner.store.lock() {
            Ok(store) => store.get(key),
            Err(_) => {
                warn!(key, "Store lock poisoned; using default");
                return None;
            }
        };

        match blob {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key, error = %e, "Discarding unreadable record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read record; using default");
                None
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Option<(String, Vec<u8>)> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Some((key.to_string(), bytes)),
        Err(e) => {
            warn!(key, error = %e, "Failed to serialize record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn clock_at(h: u32) -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Local.with_ymd_and_hms(2024, 5, 14, h, 0, 0).unwrap(),
        ))
    }

    fn gateway_with(store: MemoryStore, clock: &Arc<ManualClock>) -> PersistenceGateway {
        PersistenceGateway::new(store, Arc::clone(clock) as Arc<dyn Clock>).unwrap()
    }

    #[test]
    fn test_daily_count_defaults_to_zero() {
        let clock = clock_at(9);
        let gateway = gateway_with(MemoryStore::new(), &clock);
        assert_eq!(gateway.load_daily_count(), 0);
    }

    #[test]
    fn test_daily_count_same_day() {
        let clock = clock_at(9);
        let gateway = gateway_with(MemoryStore::new(), &clock);

        gateway.save_daily_count(3);
        gateway.flush().unwrap();

        clock.advance(Duration::hours(8));
        assert_eq!(gateway.load_daily_count(), 3);
    }

    #[test]
    fn test_daily_count_resets_on_new_day() {
        let clock = clock_at(20);
        let gateway = gateway_with(MemoryStore::new(), &clock);

        gateway.save_daily_count(5);
        gateway.flush().unwrap();

        clock.advance(Duration::hours(6));
        assert_eq!(gateway.load_daily_count(), 0);

        // The reset itself was persisted with today's date.
        gateway.flush().unwrap();
        clock.advance(Duration::hours(1));
        gateway.save_daily_count(1);
        gateway.flush().unwrap();
        assert_eq!(gateway.load_daily_count(), 1);
    }

    #[test]
    fn test_reset_is_persisted() {
        let clock = clock_at(22);
        let gateway = gateway_with(MemoryStore::new(), &clock);

        gateway.save_daily_count(7);
        gateway.flush().unwrap();

        clock.advance(Duration::days(2));
        assert_eq!(gateway.load_daily_count(), 0);
        gateway.flush().unwrap();

        let stored: Option<u32> = gateway.read(DAILY_COUNT_KEY);
        assert_eq!(stored, Some(0));
        let stamp: Option<DateTime<FixedOffset>> = gateway.read(LAST_RESET_KEY);
        assert_eq!(
            stamp.map(|s| s.with_timezone(&Local).date_naive()),
            Some(clock.today())
        );
    }

    #[test]
    fn test_count_without_date_is_kept() {
        let clock = clock_at(9);
        let mut store = MemoryStore::new();
        store.set(DAILY_COUNT_KEY, b"2").unwrap();

        let gateway = gateway_with(store, &clock);
        assert_eq!(gateway.load_daily_count(), 2);
    }

    #[test]
    fn test_corrupt_records_fall_back_to_defaults() {
        let clock = clock_at(9);
        let mut store = MemoryStore::new();
        store.set(DAILY_COUNT_KEY, b"many").unwrap();
        store.set(DARK_MODE_KEY, b"\"yes\"").unwrap();
        store.set(TASKS_KEY, b"{not json").unwrap();
        store.set(LAST_RESET_KEY, b"yesterday-ish").unwrap();

        let gateway = gateway_with(store, &clock);
        assert_eq!(gateway.load_daily_count(), 0);
        assert!(!gateway.load_dark_mode());
        assert!(gateway.load_tasks().is_empty());
    }

    #[test]
    fn test_dark_mode_round_trip() {
        let clock = clock_at(9);
        let gateway = gateway_with(MemoryStore::new(), &clock);
        assert!(!gateway.load_dark_mode());

        gateway.save_dark_mode(true);
        gateway.flush().unwrap();
        assert!(gateway.load_dark_mode());
    }

    #[test]
    fn test_tasks_round_trip() {
        let clock = clock_at(9);
        let gateway = gateway_with(MemoryStore::new(), &clock);

        let tasks = vec![
            Task::new("Write report", 3),
            Task::new("Write report", 3),
            Task::new("Review PR", 1),
        ];
        gateway.save_tasks(&tasks);
        gateway.flush().unwrap();

        assert_eq!(gateway.load_tasks(), tasks);

        gateway.save_tasks(&[]);
        gateway.flush().unwrap();
        assert!(gateway.load_tasks().is_empty());
    }

    #[test]
    fn test_tasks_read_wire_format() {
        let clock = clock_at(9);
        let id = Uuid::new_v4();
        let mut store = MemoryStore::new();
        let blob = format!(r#"[{{"id":"{id}","name":"Inbox zero","pomodorosNeeded":2}}]"#);
        store.set(TASKS_KEY, blob.as_bytes()).unwrap();

        let gateway = gateway_with(store, &clock);
        let tasks = gateway.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].name, "Inbox zero");
        assert_eq!(tasks[0].pomodoros_needed, 2);
    }

    #[test]
    fn test_sqlite_backed_gateway() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        let clock = clock_at(9);

        {
            let gateway = PersistenceGateway::open(&paths, Arc::clone(&clock) as Arc<dyn Clock>).unwrap();
            gateway.save_dark_mode(true);
            gateway.save_daily_count(4);
            gateway.flush().unwrap();
        }

        let gateway = PersistenceGateway::open(&paths, Arc::clone(&clock) as Arc<dyn Clock>).unwrap();
        assert!(gateway.load_dark_mode());
        assert_eq!(gateway.load_daily_count(), 4);
    }
}
