//! Key-value store abstraction.

use std::collections::HashMap;

use crate::error::PomoError;

use super::Database;

/// Durable blob storage keyed by string.
pub trait KeyValueStore: Send {
    /// Read the blob under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PomoError>;

    /// Store several blobs atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write; then nothing is stored.
    fn set_many(&mut self, entries: &[(String, Vec<u8>)]) -> Result<(), PomoError>;

    /// Store one blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), PomoError> {
        self.set_many(&[(key.to_string(), value.to_vec())])
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PomoError> {
        self.get_value(key)
    }

    fn set_many(&mut self, entries: &[(String, Vec<u8>)]) -> Result<(), PomoError> {
        self.put_values(entries)
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PomoError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(String, Vec<u8>)]) -> Result<(), PomoError> {
        for (key, value) in entries {
            self.entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
