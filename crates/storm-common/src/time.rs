//! Time handling for track points and profile windows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Parse a UTC timestamp as it appears in track and profile sources.
///
/// Accepts:
/// - RFC 3339 (`2023-09-01T00:00:00Z`, with any offset)
/// - `2023-09-01 00:00:00` (IBTrACS `ISO_TIME`, assumed UTC)
/// - `2023-09-01T00:00:00` (assumed UTC)
/// - `2023-09-01` (midnight UTC)
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// Which ends of a [`TimeInterval`] are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalBounds {
    /// `[start, end]`
    Closed,
    /// `[start, end)`
    ClosedOpen,
    /// `(start, end]`
    OpenClosed,
}

/// A time interval with explicit endpoint membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub bounds: IntervalBounds,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, bounds: IntervalBounds) -> Self {
        Self { start, end, bounds }
    }

    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, IntervalBounds::Closed)
    }

    pub fn closed_open(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, IntervalBounds::ClosedOpen)
    }

    pub fn open_closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, IntervalBounds::OpenClosed)
    }

    pub fn contains(&self, t: &DateTime<Utc>) -> bool {
        match self.bounds {
            IntervalBounds::Closed => t >= &self.start && t <= &self.end,
            IntervalBounds::ClosedOpen => t >= &self.start && t < &self.end,
            IntervalBounds::OpenClosed => t > &self.start && t <= &self.end,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_ibtracs_time() {
        let dt = parse_utc("2023-08-20 18:00:00").unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 8);
        assert_eq!(dt.day(), 20);
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_utc("2023-09-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_utc("2023-09-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_units_row() {
        // IBTrACS carries a units row directly below the header
        assert!(parse_utc(" ").is_err());
        assert!(parse_utc("Year").is_err());
    }

    #[test]
    fn test_interval_endpoints() {
        let a = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2023, 9, 2, 0, 0, 0).unwrap();

        assert!(TimeInterval::closed(a, b).contains(&a));
        assert!(TimeInterval::closed(a, b).contains(&b));
        assert!(TimeInterval::closed_open(a, b).contains(&a));
        assert!(!TimeInterval::closed_open(a, b).contains(&b));
        assert!(!TimeInterval::open_closed(a, b).contains(&a));
        assert!(TimeInterval::open_closed(a, b).contains(&b));
    }
}
