//! pomofocus - A Pomodoro focus timer for the terminal
//!
//! The crate is built around a session state machine ([`SessionEngine`]), a
//! short task list ([`TaskStore`]), and a persistence layer
//! ([`PersistenceGateway`]) that keeps the daily focus count, the dark mode
//! flag, and the tasks in a key-value store. [`Pomodoro`] ties them together
//! and publishes a snapshot after every change; the terminal UI and CLI are
//! thin hosts on top.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomoError;
pub use features::focus::{SessionEngine, SessionType};
pub use features::tasks::{Task, TaskStore};
pub use features::Pomodoro;
pub use storage::PersistenceGateway;
