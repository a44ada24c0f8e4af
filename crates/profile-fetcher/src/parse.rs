//! Parsing of ERDDAP tabledap CSV responses.
//!
//! ERDDAP `.csv` output has a header row, a units row, then one row per
//! record. Missing numeric values are written as `NaN`.

use std::collections::HashMap;
use std::io::Read;

use storm_common::{parse_utc, ProfileObservation};

use crate::error::{FetchError, Result};

/// Columns requested from the ArgoFloats dataset, in query order.
pub const PROFILE_COLUMNS: [&str; 5] = [
    "platform_number",
    "cycle_number",
    "time",
    "latitude",
    "longitude",
];

/// Observations decoded from one response.
#[derive(Debug, Clone, Default)]
pub struct ParsedProfiles {
    pub observations: Vec<ProfileObservation>,
    /// Rows without a usable time, latitude or longitude (the units row included).
    pub rows_dropped: usize,
}

/// Decode an ERDDAP CSV body.
///
/// Header names are matched case-insensitively so argopy-style upper-case
/// exports (`LATITUDE`, `TIME`, ...) load too. `time`, `latitude` and
/// `longitude` are required columns; the float identifiers are optional.
pub fn parse_profiles_csv<R: Read>(reader: R) -> Result<ParsedProfiles> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| FetchError::Malformed(format!("unreadable header: {}", e)))?;
    let positions: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase(), i))
        .collect();

    let column = |name: &str| -> Result<usize> {
        positions
            .get(name)
            .copied()
            .ok_or_else(|| FetchError::Malformed(format!("missing column '{}'", name)))
    };
    let time_idx = column("time")?;
    let lat_idx = column("latitude")?;
    let lon_idx = column("longitude")?;
    let platform_idx = positions.get("platform_number").copied();
    let cycle_idx = positions.get("cycle_number").copied();

    let mut parsed = ParsedProfiles::default();

    for record in csv_reader.records() {
        let record = record.map_err(|e| FetchError::Malformed(e.to_string()))?;
        let field = |idx: usize| record.get(idx).filter(|v| !v.is_empty() && *v != "NaN");

        let time = field(time_idx).and_then(|v| parse_utc(v).ok());
        let lat = field(lat_idx).and_then(parse_finite);
        let lon = field(lon_idx).and_then(parse_finite);

        let (Some(time), Some(lat), Some(lon)) = (time, lat, lon) else {
            parsed.rows_dropped += 1;
            continue;
        };

        let mut obs = ProfileObservation::new(lat, lon, time);
        obs.platform_number = platform_idx.and_then(field).map(normalize_platform);
        obs.cycle_number = cycle_idx.and_then(field).and_then(parse_cycle);
        parsed.observations.push(obs);
    }

    Ok(parsed)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Platform numbers are WMO ids; some exports render them as floats.
fn normalize_platform(raw: &str) -> String {
    raw.strip_suffix(".0").unwrap_or(raw).to_string()
}

fn parse_cycle(raw: &str) -> Option<u32> {
    if let Ok(cycle) = raw.parse::<u32>() {
        return Some(cycle);
    }
    let value = parse_finite(raw)?;
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
