//! Error types for the bkspell library.
//!
//! All fallible operations return [`BkspellError`]. Errors only arise while
//! loading data or constructing a corrector; correcting a query never fails.
//!
//! # Examples
//!
//! ```
//! use bkspell::error::{BkspellError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(BkspellError::config("threshold must be within [0, 1]"))
//! }
//!
//! match build() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for bkspell operations.
#[derive(Error, Debug)]
pub enum BkspellError {
    /// I/O errors (reading vocabulary, word lists, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid construction parameters (empty vocabulary, duplicates, bad threshold)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed vocabulary data
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with BkspellError.
pub type Result<T> = std::result::Result<T, BkspellError>;

impl BkspellError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BkspellError::Config(msg.into())
    }

    /// Create a new vocabulary error.
    pub fn vocabulary<S: Into<String>>(msg: S) -> Self {
        BkspellError::Vocabulary(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BkspellError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BkspellError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error was raised by construction-time validation.
    pub fn is_config(&self) -> bool {
        matches!(self, BkspellError::Config(_))
    }
}
