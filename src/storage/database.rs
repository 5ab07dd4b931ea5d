//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.pomofocus/pomofocus.db` and holds a single
//! `kv_store` table backing [`KeyValueStore`](super::KeyValueStore).

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::PomoError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, PomoError> {
        let conn = Connection::open(path).map_err(|e| {
            PomoError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, PomoError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            PomoError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), PomoError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, PomoError> {
        migrations::get_version(&self.conn)
    }

    /// Read the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, PomoError> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| PomoError::Database(format!("Failed to read {key}: {e}")))
    }

    /// Write several blobs in one transaction.
    ///
    /// Either every entry is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; nothing is written then.
    pub fn put_values(&self, entries: &[(String, Vec<u8>)]) -> Result<(), PomoError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| PomoError::Database(format!("Failed to begin transaction: {e}")))?;

        let updated_at = Utc::now().to_rfc3339();
        for (key, value) in entries {
            tx.execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(|e| PomoError::Database(format!("Failed to write {key}: {e}")))?;
        }

        tx.commit()
            .map_err(|e| PomoError::Database(format!("Failed to commit transaction: {e}")))
    }
}
