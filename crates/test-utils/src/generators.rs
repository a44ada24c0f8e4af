//! Deterministic synthetic profile clouds.

use chrono::{DateTime, Duration, Utc};

use storm_common::{ProfileObservation, StormTrack};

/// Profiles on a regular lat/lon/time lattice centred on `(lat, lon, time)`.
///
/// `half_cells` lattice steps are generated on each side of the centre in
/// every dimension, so the cloud holds `(2 * half_cells + 1)^3` profiles.
/// Each profile gets a distinct platform id and cycle number.
pub fn profile_lattice(
    lat: f64,
    lon: f64,
    time: DateTime<Utc>,
    spacing_deg: f64,
    step: Duration,
    half_cells: i32,
) -> Vec<ProfileObservation> {
    let mut profiles = Vec::new();
    let mut serial = 0u32;

    for i in -half_cells..=half_cells {
        for j in -half_cells..=half_cells {
            for k in -half_cells..=half_cells {
                serial += 1;
                profiles.push(
                    ProfileObservation::new(
                        lat + i as f64 * spacing_deg,
                        lon + j as f64 * spacing_deg,
                        time + step * k,
                    )
                    .with_float(format!("59{:05}", serial), serial % 300),
                );
            }
        }
    }

    profiles
}

/// A lattice around every point of a track, concatenated.
///
/// Neighbouring points produce overlapping clouds when their spacing is
/// small, which exercises deduplication.
pub fn profiles_along_track(
    track: &StormTrack,
    spacing_deg: f64,
    step: Duration,
    half_cells: i32,
) -> Vec<ProfileObservation> {
    track
        .points
        .iter()
        .flat_map(|p| profile_lattice(p.lat, p.lon, p.time, spacing_deg, step, half_cells))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_storm, utc};

    #[test]
    fn test_lattice_size() {
        let cloud = profile_lattice(20.0, -60.0, utc(2023, 9, 1, 0), 1.0, Duration::days(3), 1);
        assert_eq!(cloud.len(), 27);
    }

    #[test]
    fn test_along_track() {
        let cloud = profiles_along_track(&test_storm(), 1.0, Duration::days(3), 1);
        assert_eq!(cloud.len(), 54);
    }
}
