//! Error types for the colocation core.

use thiserror::Error;

/// Fatal errors for one storm or for the processor as a whole.
///
/// Point-level fetch failures are absorbed by the control loop and never
/// show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColocationError {
    #[error("Storm {name} ({season}) has no track points with valid coordinates")]
    NoValidTrackPoints { name: String, season: i32 },

    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for colocation operations.
pub type Result<T> = std::result::Result<T, ColocationError>;
