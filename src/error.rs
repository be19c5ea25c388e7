//! Custom error types for scholarsync.
//!
//! Only the top-level author lookup is allowed to abort a run; everything at
//! record level degrades to defaults or to a basic-info fallback instead of
//! surfacing here.

use thiserror::Error;

/// Main error type for scholarsync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The configured author id does not resolve to a Scholar profile.
    /// This is fatal to the whole run; no partial output is produced.
    #[error("Author profile not found: {0}")]
    AuthorNotFound(String),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTML parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limited by Google Scholar
    #[error("Rate limited, retry after {0}s")]
    RateLimited(u64),

    /// Scholar returned a non-success HTTP status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: i32,
        /// Error message
        message: String,
    },

    /// CAPTCHA detected
    #[error("CAPTCHA detected while fetching Scholar pages")]
    Captcha,

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `SyncError`
pub type Result<T> = std::result::Result<T, SyncError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| SyncError::Parse(msg.to_string()))
    }
}
