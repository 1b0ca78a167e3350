//! Error types for tp-output.

use thiserror::Error;

/// Errors that can occur when writing the event log or statistics.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Object type tags are 1 to 3 ASCII alphanumeric characters.
    #[error("invalid object type tag `{0}`")]
    InvalidTag(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
