//! Argo profile observations and their identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coordinates are quantized to this many steps per degree inside a
/// [`ProfileKey`] (six decimal places, roughly 0.1 m).
const COORD_SCALE: f64 = 1_000_000.0;

/// One float profile: where and when it was taken, plus optional float identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileObservation {
    pub latitude: f64,
    pub longitude: f64,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub platform_number: Option<String>,
    #[serde(default)]
    pub cycle_number: Option<u32>,
}

impl ProfileObservation {
    pub fn new(latitude: f64, longitude: f64, time: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            time,
            platform_number: None,
            cycle_number: None,
        }
    }

    pub fn with_float(mut self, platform_number: impl Into<String>, cycle_number: u32) -> Self {
        self.platform_number = Some(platform_number.into());
        self.cycle_number = Some(cycle_number);
        self
    }

    /// Finite coordinates with latitude in [-90, 90].
    pub fn is_well_formed(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
    }

    pub fn key(&self) -> ProfileKey {
        ProfileKey {
            platform_number: self.platform_number.clone(),
            cycle_number: self.cycle_number,
            time: self.time,
            lat_e6: quantize(self.latitude),
            lon_e6: quantize(self.longitude),
        }
    }

    /// Human-readable float label, `platform-cycle`, when the platform is known.
    pub fn label(&self) -> Option<String> {
        let platform = self.platform_number.as_deref()?;
        Some(match self.cycle_number {
            Some(cycle) => format!("{}-{}", platform, cycle),
            None => format!("{}-?", platform),
        })
    }
}

/// Deduplication identity of a profile.
///
/// Field order is the sort order: platform, cycle, time, latitude, longitude.
/// Absent identifiers are `None`, so records without float identity compare on
/// (time, latitude, longitude) alone and sort ahead of identified ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub platform_number: Option<String>,
    pub cycle_number: Option<u32>,
    pub time: DateTime<Utc>,
    pub lat_e6: i64,
    pub lon_e6: i64,
}

fn quantize(deg: f64) -> i64 {
    (deg * COORD_SCALE).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_key_absorbs_float_noise() {
        let a = ProfileObservation::new(20.1, -60.1, t());
        let b = ProfileObservation::new(20.1 + 1e-9, -60.1 - 1e-9, t());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_cycles() {
        let a = ProfileObservation::new(20.1, -60.1, t()).with_float("6903240", 45);
        let b = ProfileObservation::new(20.1, -60.1, t()).with_float("6903240", 46);
        assert_ne!(a.key(), b.key());
        assert!(a.key() < b.key());
    }

    #[test]
    fn test_label() {
        let obs = ProfileObservation::new(20.1, -60.1, t()).with_float("6903240", 45);
        assert_eq!(obs.label().as_deref(), Some("6903240-45"));

        let mut partial = ProfileObservation::new(20.1, -60.1, t());
        partial.platform_number = Some("6903240".into());
        assert_eq!(partial.label().as_deref(), Some("6903240-?"));

        assert!(ProfileObservation::new(20.1, -60.1, t()).label().is_none());
    }

    #[test]
    fn test_malformed_latitude() {
        assert!(!ProfileObservation::new(95.0, 0.0, t()).is_well_formed());
        assert!(!ProfileObservation::new(f64::NAN, 0.0, t()).is_well_formed());
    }
}
