//! Error types for pomofocus.

use thiserror::Error;

/// Errors that can occur in pomofocus.
///
/// The timer core itself never fails: these are raised while opening storage,
/// reading configuration, or by the presentation layer when it rejects input.
#[derive(Debug, Error)]
pub enum PomoError {
    /// Configuration could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The key-value store or its background writer failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialized data could not be parsed or produced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected by the interface.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The host refused a capability (e.g. notifications are disabled).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PomoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for PomoError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomoError::InvalidInput("task name is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: task name is empty");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<u32, _> = serde_json::from_str("not a number");
        let err = PomoError::from(parse.unwrap_err());
        assert!(matches!(err, PomoError::Parse(_)));
    }
}
