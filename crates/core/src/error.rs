//! Error types for Lexis operations.
//!
//! This module defines the main error type [`LexisError`] which represents
//! everything that can go wrong while loading dictionaries, fetching and
//! extracting articles, and reading or writing result tables.
//!
//! Most of these errors never reach the caller of a batch run: the article
//! pipeline turns fetch and extraction failures into zero-valued rows.
//! Only startup failures (unreadable input table, no dictionary at all)
//! surface to the top.
//!
//! # Example
//!
//! ```rust
//! use lexis_core::{LexisError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(LexisError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Lexis operations.
#[derive(Error, Debug)]
pub enum LexisError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page was fetched but no article text could be found in it.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dictionary loading errors.
    ///
    /// Only raised when no dictionary source at all could be read; a single
    /// unreadable source is logged and skipped.
    #[error("Lexicon error: {0}")]
    LexiconError(String),

    /// Input table errors: missing columns or malformed CSV.
    #[error("Input table error: {0}")]
    InputError(String),

    /// CSV reader/writer errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A spawned article task panicked or was cancelled.
    #[error("Article task failed: {0}")]
    TaskError(String),
}

impl From<tokio::task::JoinError> for LexisError {
    fn from(err: tokio::task::JoinError) -> Self {
        LexisError::TaskError(err.to_string())
    }
}

/// Result type alias for LexisError.
///
/// This is a convenience alias for `std::result::Result<T, LexisError>`.
pub type Result<T> = std::result::Result<T, LexisError>;
