//! Storm track loading.
//!
//! Reads IBTrACS-style CSV files, drops rows with missing or non-numeric
//! coordinates, seasons or times, applies the season/storm filter and groups
//! what remains into time-ordered [`storm_common::StormTrack`]s.

pub mod error;
pub mod filter;
pub mod loader;

pub use error::{Result, RowRejection, TrackLoadError};
pub use filter::{SeasonFilter, TrackFilter, DEFAULT_SEASON};
pub use loader::{
    group_storms, load_rows, load_tracks, read_rows, write_rows, LoadReport, TrackRow, TrackRows,
};
