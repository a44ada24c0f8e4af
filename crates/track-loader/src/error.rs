//! Error types for the track loader.

use thiserror::Error;

/// Errors that stop a track file from loading at all.
///
/// Bad individual rows never surface here; they are counted as
/// [`RowRejection`]s and dropped.
#[derive(Error, Debug)]
pub enum TrackLoadError {
    #[error("Failed to read track file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Track source is missing required column: {0}")]
    MissingColumn(String),

    #[error("No storms matched filter: {0}")]
    NoStormsMatched(String),
}

/// Result type for track loading.
pub type Result<T> = std::result::Result<T, TrackLoadError>;

/// Why a single source row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    MissingField(&'static str),
    InvalidSeason(String),
    InvalidLatitude(String),
    InvalidLongitude(String),
    InvalidTime(String),
    LatitudeOutOfRange(f64),
}

impl RowRejection {
    /// Short stable name used when tallying rejections.
    pub fn kind(&self) -> &'static str {
        match self {
            RowRejection::MissingField(_) => "missing_field",
            RowRejection::InvalidSeason(_) => "invalid_season",
            RowRejection::InvalidLatitude(_) => "invalid_latitude",
            RowRejection::InvalidLongitude(_) => "invalid_longitude",
            RowRejection::InvalidTime(_) => "invalid_time",
            RowRejection::LatitudeOutOfRange(_) => "latitude_out_of_range",
        }
    }
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::MissingField(col) => write!(f, "missing value for {}", col),
            RowRejection::InvalidSeason(v) => write!(f, "non-numeric season '{}'", v),
            RowRejection::InvalidLatitude(v) => write!(f, "non-numeric latitude '{}'", v),
            RowRejection::InvalidLongitude(v) => write!(f, "non-numeric longitude '{}'", v),
            RowRejection::InvalidTime(v) => write!(f, "unparseable time '{}'", v),
            RowRejection::LatitudeOutOfRange(v) => write!(f, "latitude {} outside [-90, 90]", v),
        }
    }
}
