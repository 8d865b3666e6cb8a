//! Error types for docpolish library.

use std::io;
use thiserror::Error;

/// Result type alias for docpolish operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, formatting or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is unreadable or does not describe a valid document.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The input exceeds the configured size ceiling.
    #[error("Document is too large ({size} bytes, limit is {limit} bytes)")]
    DocumentTooLarge {
        /// Size of the rejected input in bytes
        size: usize,
        /// Configured ceiling in bytes
        limit: usize,
    },

    /// Error while serializing a document.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The style rule table is not usable.
    #[error("Invalid style rules: {0}")]
    InvalidRules(String),
}
