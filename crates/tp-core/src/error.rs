//! Shared error type for configuration and parsing.
//!
//! Sub-crates define their own error enums and wrap `TpError` as one variant
//! where configuration problems can surface.

use thiserror::Error;

/// The base error type for `tp-core`.
#[derive(Debug, Error)]
pub enum TpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `tp-core`.
pub type TpResult<T> = Result<T, TpError>;
