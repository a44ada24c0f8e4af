//! Plain-text phase report.

use std::path::Path;

use colocation::StormPhases;
use storm_common::{Phase, ProfileObservation};

use crate::error::{ReportError, Result};

/// One report line: `platform-cycle, time, lat, lon`.
///
/// The label is left out for profiles without a platform number.
pub fn format_entry(obs: &ProfileObservation) -> String {
    let time = obs.time.format("%Y-%m-%dT%H:%M:%SZ");
    match obs.label() {
        Some(label) => format!(
            "{}, {}, {:.2}, {:.2}",
            label, time, obs.latitude, obs.longitude
        ),
        None => format!("{}, {:.2}, {:.2}", time, obs.latitude, obs.longitude),
    }
}

/// Render the report for one storm. Empty phases read `None`.
pub fn render_report(name: &str, season: i32, phases: &StormPhases) -> String {
    let mut out = String::new();
    out.push_str(&format!("Argo Profiles for Hurricane: {} ({})\n", name, season));

    for phase in Phase::ALL {
        out.push_str(&format!("\n[{}]\n", phase));
        let entries = phases.get(phase);
        if entries.is_empty() {
            out.push_str("None\n");
            continue;
        }
        for obs in entries {
            out.push_str(&format_entry(obs));
            out.push('\n');
        }
    }

    out
}

pub fn write_report(path: &Path, name: &str, season: i32, phases: &StormPhases) -> Result<()> {
    std::fs::write(path, render_report(name, season, phases))
        .map_err(|e| ReportError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_entry_with_float_identity() {
        let obs = ProfileObservation::new(
            20.123,
            -60.987,
            Utc.with_ymd_and_hms(2023, 8, 31, 12, 0, 0).unwrap(),
        )
        .with_float("6903240", 45);
        assert_eq!(format_entry(&obs), "6903240-45, 2023-08-31T12:00:00Z, 20.12, -60.99");
    }

    #[test]
    fn test_entry_without_platform() {
        let obs = ProfileObservation::new(
            20.0,
            -60.0,
            Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
        );
        assert_eq!(format_entry(&obs), "2023-09-01T00:00:00Z, 20.00, -60.00");
    }

    #[test]
    fn test_entry_without_cycle() {
        let mut obs = ProfileObservation::new(
            20.0,
            -60.0,
            Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
        );
        obs.platform_number = Some("4903456".into());
        assert!(format_entry(&obs).starts_with("4903456-?, "));
    }

    #[test]
    fn test_empty_report() {
        let report = render_report("TEST", 2023, &StormPhases::default());
        assert_eq!(
            report,
            "Argo Profiles for Hurricane: TEST (2023)\n\n[Before]\nNone\n\n[During]\nNone\n\n[After]\nNone\n"
        );
    }
}
