//! Error types for cleanreader operations.
//!
//! The reader pipeline itself never fails once a [`Document`](crate::Document)
//! exists: locating, sanitizing and restoring all degrade to a safe default.
//! [`ReaderError`] covers the edges around it: invalid selectors, malformed
//! host messages, file input and serialization.
//!
//! # Example
//!
//! ```rust
//! use cleanreader_core::{ReaderError, Result};
//!
//! fn load(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(ReaderError::HtmlParseError("empty input".to_string()));
//!     }
//!     Ok(html.to_string())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reader-mode operations.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// HTML parsing errors.
    ///
    /// Returned for invalid CSS selectors handed to [`Document::select`](crate::Document::select).
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid URL provided.
    ///
    /// Returned when a base URL cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A host message could not be decoded.
    #[error("Invalid host message: {0}")]
    InvalidMessage(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization errors (JSON rendering of an article).
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ReaderError {
    fn from(err: serde_json::Error) -> Self {
        ReaderError::Serialization(err.to_string())
    }
}

/// Result type alias for ReaderError.
pub type Result<T> = std::result::Result<T, ReaderError>;
