//! Region/time queries sent to a profile source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storm_common::{BoundingBox, TimeInterval};

use crate::error::{FetchError, Result};

/// A bounded region + depth range + closed time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionQuery {
    pub bbox: BoundingBox,
    /// Pressure range in dbar.
    pub depth_min: f64,
    pub depth_max: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RegionQuery {
    pub fn new(
        bbox: BoundingBox,
        depth_min: f64,
        depth_max: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            bbox,
            depth_min,
            depth_max,
            start,
            end,
        }
    }

    /// Region in argopy order: `[lon_min, lon_max, lat_min, lat_max, depth_min, depth_max]`.
    pub fn region(&self) -> [f64; 6] {
        [
            self.bbox.min_lon,
            self.bbox.max_lon,
            self.bbox.min_lat,
            self.bbox.max_lat,
            self.depth_min,
            self.depth_max,
        ]
    }

    pub fn window(&self) -> TimeInterval {
        TimeInterval::closed(self.start, self.end)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bbox.is_valid() {
            return Err(FetchError::InvalidQuery(format!(
                "bounding box {:?} is not ordered or not finite",
                self.bbox
            )));
        }
        if !(self.depth_min.is_finite() && self.depth_max.is_finite())
            || self.depth_min > self.depth_max
        {
            return Err(FetchError::InvalidQuery(format!(
                "depth range {}..{} is invalid",
                self.depth_min, self.depth_max
            )));
        }
        if self.start > self.end {
            return Err(FetchError::InvalidQuery(format!(
                "time window starts after it ends ({} > {})",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Whether a position/time falls inside this query.
    pub fn matches(&self, lat: f64, lon: f64, time: &DateTime<Utc>) -> bool {
        self.bbox.contains(lat, lon) && self.window().contains(time)
    }
}
