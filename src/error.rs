//! Error types for the term-rewrite library.
//!
//! All fallible operations return [`Result`], whose error is the
//! [`RewriteError`] enum.
//!
//! # Examples
//!
//! ```
//! use term_rewrite::error::{RewriteError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RewriteError::configuration("injected field must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for term-rewrite operations.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// Invalid engine configuration. Raised when an engine is constructed,
    /// never while rewriting.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tree node that is neither a leaf nor a composite.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// Query string parsing errors
    #[error("Query error: {0}")]
    Query(String),

    /// I/O errors (reading configuration or query files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with RewriteError.
pub type Result<T> = std::result::Result<T, RewriteError>;

impl RewriteError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        RewriteError::Configuration(msg.into())
    }

    /// Create a new malformed tree error.
    pub fn malformed_tree<S: Into<String>>(msg: S) -> Self {
        RewriteError::MalformedTree(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        RewriteError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        RewriteError::Query(msg.into()) // Parse errors are treated as query errors
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RewriteError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        RewriteError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether the error belongs to a single rewrite call and the caller may
    /// carry on with the unmodified tree.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RewriteError::MalformedTree(_))
    }
}
