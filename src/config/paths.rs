//! Path resolution for pomofocus configuration and data files.
//!
//! All pomofocus data is stored in `~/.pomofocus/` (or `$POMOFOCUS_HOME`):
//! - `config.yaml` - Main configuration file
//! - `pomofocus.db` - SQLite key-value store for counters, settings, tasks
//! - `logs/` - Log files

use std::path::PathBuf;

use crate::error::PomoError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "POMOFOCUS_HOME";

/// Paths to pomofocus configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomofocus/`
    pub root: PathBuf,
    /// Config file: `~/.pomofocus/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.pomofocus/pomofocus.db`
    pub database: PathBuf,
    /// Logs directory: `~/.pomofocus/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths from `$POMOFOCUS_HOME`, falling back to the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, PomoError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME")
            .map_err(|_| PomoError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomofocus")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("pomofocus.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomoError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    PomoError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}
