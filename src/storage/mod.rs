//! Storage layer for pomofocus.
//!
//! This module provides SQLite-backed persistence for:
//! - The daily focus counter and its reset date
//! - The dark mode setting
//! - The task list

mod database;
mod gateway;
mod kv;
mod migrations;
mod writer;

pub use database::Database;
pub use gateway::{
    PersistenceGateway, DAILY_COUNT_KEY, DARK_MODE_KEY, LAST_RESET_KEY, TASKS_KEY,
};
pub use kv::{KeyValueStore, MemoryStore};
pub use writer::{BackgroundWriter, SharedStore};
