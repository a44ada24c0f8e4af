//! Matching window configuration.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use crate::error::{ColocationError, Result};

/// Window sizes, paddings and fetch limits for the colocation run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    /// How far before a track point the fetch window starts.
    pub lookback: Duration,
    /// How far after a track point the fetch window ends.
    pub lookahead: Duration,
    /// Half-width of the During window around a track point.
    pub margin: Duration,
    /// Degrees added on each side of a track point for its fetch box.
    pub point_padding_deg: f64,
    /// Degrees added around the whole track for the storm-level box.
    pub storm_padding_deg: f64,
    /// Pressure range (dbar) passed through to the fetcher.
    pub depth_min: f64,
    pub depth_max: f64,
    /// Upper bound on a single point's fetch; exceeding it fails that point.
    pub fetch_timeout: StdDuration,
    /// Point fetches allowed in flight at once for one storm.
    pub max_concurrent_fetches: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            lookback: Duration::days(14),
            lookahead: Duration::days(14),
            margin: Duration::days(1),
            point_padding_deg: 2.0,
            storm_padding_deg: 2.0,
            depth_min: 0.0,
            depth_max: 2000.0,
            fetch_timeout: StdDuration::from_secs(120),
            max_concurrent_fetches: 1,
        }
    }
}

impl MatchingConfig {
    /// Check the window and padding invariants the planner relies on.
    pub fn validate(&self) -> Result<()> {
        let zero = Duration::zero();
        if self.lookback < zero || self.lookahead < zero || self.margin < zero {
            return Err(invalid("durations must be non-negative"));
        }
        if self.margin > self.lookback || self.margin > self.lookahead {
            return Err(invalid(format!(
                "margin ({}h) must not exceed lookback ({}h) or lookahead ({}h)",
                self.margin.num_hours(),
                self.lookback.num_hours(),
                self.lookahead.num_hours()
            )));
        }
        if DateTime::<Utc>::MAX_UTC.checked_sub_signed(self.lookback).is_none()
            || DateTime::<Utc>::MIN_UTC.checked_add_signed(self.lookahead).is_none()
        {
            return Err(invalid(format!(
                "lookback ({}h) and lookahead ({}h) must fit within the supported time range",
                self.lookback.num_hours(),
                self.lookahead.num_hours()
            )));
        }
        for (name, value) in [
            ("point_padding_deg", self.point_padding_deg),
            ("storm_padding_deg", self.storm_padding_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be a non-negative number", name)));
            }
        }
        if !(self.depth_min.is_finite() && self.depth_max.is_finite())
            || self.depth_min > self.depth_max
        {
            return Err(invalid(format!(
                "depth range {}..{} is invalid",
                self.depth_min, self.depth_max
            )));
        }
        if self.fetch_timeout.is_zero() {
            return Err(invalid("fetch_timeout must be positive"));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(invalid("max_concurrent_fetches must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ColocationError {
    ColocationError::InvalidConfig(message.into())
}
