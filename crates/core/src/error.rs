//! Error types for sheetblog.

use thiserror::Error;

/// Result type for sheetblog operations.
pub type BlogResult<T> = Result<T, BlogError>;

/// Errors that can occur while loading or presenting posts.
///
/// The top-level ingestion call never surfaces these to its caller; they
/// exist for the lower-level fetch API, the preference store and the binaries.
#[derive(Debug, Error)]
pub enum BlogError {
    /// Transport failure (DNS, connect, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx response from the sheet export.
    #[error("HTTP {status} - {reason}")]
    Status { status: u16, reason: String },

    /// The export URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lookup of a post that does not exist.
    #[error("Post not found: {0}")]
    NotFound(String),
}

impl BlogError {
    /// Create a status error from a numeric code and reason phrase.
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.into(),
        }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}
