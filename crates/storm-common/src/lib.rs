//! Common types shared across the storm colocation crates.

pub mod bbox;
pub mod phase;
pub mod profile;
pub mod time;
pub mod track;

pub use bbox::BoundingBox;
pub use phase::Phase;
pub use profile::{ProfileKey, ProfileObservation};
pub use time::{parse_utc, IntervalBounds, TimeInterval, TimeParseError};
pub use track::{StormTrack, TrackPoint};
