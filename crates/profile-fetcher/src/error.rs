//! Profile fetch errors.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single region/time fetch.
///
/// Every variant is recoverable at the granularity of one track point: the
/// caller skips that point and keeps going.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The known upstream fault class of the profile service (overloaded or
    /// failing ERDDAP backend). Callers drop these without logging.
    #[error("Profile service temporarily unavailable: {0}")]
    Transient(String),

    #[error("Profile service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request to profile service failed: {0}")]
    Transport(String),

    #[error("Malformed profile response: {0}")]
    Malformed(String),

    #[error("Profile fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid region query: {0}")]
    InvalidQuery(String),

    #[error("Failed to read profile file {path}: {message}")]
    SourceFile { path: String, message: String },
}

impl FetchError {
    /// Whether the caller should skip the point silently.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }

    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Transient(_) | FetchError::Transport(_) | FetchError::Timeout(_)
        )
    }
}

/// Result type for profile fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
