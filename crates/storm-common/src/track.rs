//! Storm track types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// One timestamped storm-centre fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub time: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
}

impl TrackPoint {
    pub fn new(time: DateTime<Utc>, lat: f64, lon: f64) -> Self {
        Self { time, lat, lon }
    }

    /// Finite coordinates with latitude in [-90, 90].
    pub fn has_valid_position(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }
}

/// All fixes of one named storm within one season, in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormTrack {
    pub name: String,
    pub season: i32,
    /// IBTrACS storm identifier, when the source carries one.
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub basin: Option<String>,
    pub points: Vec<TrackPoint>,
}

impl StormTrack {
    /// Build a track, sorting the points by time.
    ///
    /// The sort is stable so fixes sharing a timestamp keep their source order.
    pub fn new(name: impl Into<String>, season: i32, mut points: Vec<TrackPoint>) -> Self {
        points.sort_by_key(|p| p.time);
        Self {
            name: name.into(),
            season,
            sid: None,
            basin: None,
            points,
        }
    }

    pub fn with_sid(mut self, sid: Option<String>) -> Self {
        self.sid = sid;
        self
    }

    pub fn with_basin(mut self, basin: Option<String>) -> Self {
        self.basin = basin;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points whose coordinates are usable for window planning.
    pub fn valid_points(&self) -> impl Iterator<Item = &TrackPoint> + '_ {
        self.points.iter().filter(|p| p.has_valid_position())
    }

    /// Storm-level box: the extent of all valid points padded by `padding` degrees.
    pub fn bounding_box(&self, padding: f64) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.valid_points().map(|p| (p.lat, p.lon)))
            .map(|bbox| bbox.expanded(padding))
    }

    /// First and last fix time.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.time, last.time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_points_sorted_on_construction() {
        let t0 = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2023, 9, 3, 0, 0, 0).unwrap();
        let track = StormTrack::new(
            "TEST",
            2023,
            vec![TrackPoint::new(t1, 21.0, -61.0), TrackPoint::new(t0, 20.0, -60.0)],
        );
        assert_eq!(track.points[0].time, t0);
        assert_eq!(track.time_span(), Some((t0, t1)));
    }

    #[test]
    fn test_storm_bounding_box_ignores_invalid_points() {
        let t0 = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
        let track = StormTrack::new(
            "TEST",
            2023,
            vec![
                TrackPoint::new(t0, 20.0, -60.0),
                TrackPoint::new(t0, f64::NAN, -80.0),
                TrackPoint::new(t0, 21.0, -61.0),
            ],
        );
        let bbox = track.bounding_box(2.0).unwrap();
        assert_eq!(bbox.min_lon, -63.0);
        assert_eq!(bbox.max_lon, -58.0);
        assert_eq!(bbox.min_lat, 18.0);
        assert_eq!(bbox.max_lat, 23.0);
    }
}
