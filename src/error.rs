//! Error types for the tagstat library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TagstatError`] enum. The variants follow the failure taxonomy of the
//! core: configuration problems are fatal for the session, invalid
//! arguments are fatal for a single call, and missing named records are
//! reported as [`TagstatError::NotFound`] so callers can check for them.
//!
//! # Examples
//!
//! ```
//! use tagstat::error::{Result, TagstatError};
//!
//! fn check_period(period: usize) -> Result<()> {
//!     if period < 1 {
//!         return Err(TagstatError::invalid_argument("period must be >= 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_period(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tagstat operations.
#[derive(Error, Debug)]
pub enum TagstatError {
    /// Missing language registration or classification tables.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A parameter failed validation before any mutation happened.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A named record (e.g. a transformation) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Analysis-related errors (misaligned tables, malformed input rows).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid tag or word-class query pattern.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Failure reported by an external collaborator (hyphenator, corpus reader).
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TagstatError.
pub type Result<T> = std::result::Result<T, TagstatError>;

impl TagstatError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        TagstatError::Configuration(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TagstatError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TagstatError::NotFound(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TagstatError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TagstatError::Other(msg.into())
    }

    /// Whether the error invalidates the whole session rather than one call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TagstatError::Configuration(_))
    }
}
