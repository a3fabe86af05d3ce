//! Error types for the invex-core library.
//!
//! Messy input is the expected common case, not an error: a token that
//! fails to parse becomes an absent field and a line that fails to
//! resolve is skipped. The error type here covers only the surfaces
//! where failing loudly is correct, such as configuration loading.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// I/O error (reading a config or identifier list).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration file.
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid user-supplied pattern (e.g. class-code denylist regex).
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
