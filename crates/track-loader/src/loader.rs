//! IBTrACS-style CSV parsing and per-storm grouping.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use storm_common::{parse_utc, StormTrack, TrackPoint};

use crate::error::{Result, RowRejection, TrackLoadError};
use crate::filter::TrackFilter;

/// Required source columns, after header normalization.
pub mod columns {
    pub const NAME: &str = "NAME";
    pub const SEASON: &str = "SEASON";
    pub const ISO_TIME: &str = "ISO_TIME";
    pub const LAT: &str = "LAT";
    pub const LON: &str = "LON";
    pub const SID: &str = "SID";
    pub const BASIN: &str = "BASIN";

    pub const REQUIRED: [&str; 5] = [NAME, SEASON, ISO_TIME, LAT, LON];
}

/// One accepted source row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRow {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "SEASON")]
    pub season: i32,
    #[serde(rename = "ISO_TIME", serialize_with = "serialize_iso_time")]
    pub time: DateTime<Utc>,
    #[serde(rename = "LAT")]
    pub lat: f64,
    #[serde(rename = "LON")]
    pub lon: f64,
    #[serde(rename = "SID")]
    pub sid: Option<String>,
    #[serde(rename = "BASIN")]
    pub basin: Option<String>,
}

fn serialize_iso_time<S: serde::Serializer>(
    time: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Row accounting for one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_accepted: usize,
    /// Rows that parsed but fell outside the season/storm filter.
    pub rows_filtered: usize,
    /// Rejected rows tallied by [`RowRejection::kind`].
    pub rejected: BTreeMap<&'static str, usize>,
}

impl LoadReport {
    pub fn rows_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    fn reject(&mut self, reason: &RowRejection) {
        *self.rejected.entry(reason.kind()).or_insert(0) += 1;
    }
}

/// Parsed, filtered rows plus their accounting.
#[derive(Debug, Clone, Default)]
pub struct TrackRows {
    pub rows: Vec<TrackRow>,
    pub report: LoadReport,
}

impl TrackRows {
    /// Group rows into one track per (name, season), ordered by name then season.
    pub fn into_storms(self) -> Vec<StormTrack> {
        group_storms(self.rows)
    }
}

/// Normalized header name -> column index.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_uppercase(), i))
            .collect();

        for required in columns::REQUIRED {
            if !positions.contains_key(required) {
                return Err(TrackLoadError::MissingColumn(required.to_string()));
            }
        }

        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: &str) -> Option<&'r str> {
        let idx = *self.positions.get(column)?;
        record.get(idx).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Load and filter a track file from disk.
#[instrument(skip(filter), fields(path = %path.as_ref().display()))]
pub fn load_rows<P: AsRef<Path>>(path: P, filter: &TrackFilter) -> Result<TrackRows> {
    let file = File::open(path.as_ref())?;
    read_rows(file, filter)
}

/// Parse and filter track rows from any reader.
pub fn read_rows<R: Read>(reader: R, filter: &TrackFilter) -> Result<TrackRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let index = ColumnIndex::from_headers(csv_reader.headers()?)?;
    let mut out = TrackRows::default();

    for record in csv_reader.records() {
        let record = record?;
        out.report.rows_read += 1;

        match parse_row(&index, &record) {
            Ok(row) => {
                if filter.matches(&row.name, row.season) {
                    out.report.rows_accepted += 1;
                    out.rows.push(row);
                } else {
                    out.report.rows_filtered += 1;
                }
            }
            Err(reason) => {
                debug!(line = out.report.rows_read + 1, reason = %reason, "Dropping track row");
                out.report.reject(&reason);
            }
        }
    }

    info!(
        read = out.report.rows_read,
        accepted = out.report.rows_accepted,
        filtered = out.report.rows_filtered,
        rejected = out.report.rows_rejected(),
        filter = %filter.describe(),
        "Parsed track rows"
    );

    Ok(out)
}

/// Load a track file and group it into storms.
///
/// A filter that selects no storm at all is a configuration error.
pub fn load_tracks<P: AsRef<Path>>(path: P, filter: &TrackFilter) -> Result<Vec<StormTrack>> {
    let rows = load_rows(path, filter)?;
    let storms = rows.into_storms();
    if storms.is_empty() {
        return Err(TrackLoadError::NoStormsMatched(filter.describe()));
    }
    info!(storms = storms.len(), "Loaded storm tracks");
    Ok(storms)
}

fn parse_row(
    index: &ColumnIndex,
    record: &csv::StringRecord,
) -> std::result::Result<TrackRow, RowRejection> {
    let name = index
        .get(record, columns::NAME)
        .ok_or(RowRejection::MissingField(columns::NAME))?;

    let season_raw = index
        .get(record, columns::SEASON)
        .ok_or(RowRejection::MissingField(columns::SEASON))?;
    let season = parse_season(season_raw)
        .ok_or_else(|| RowRejection::InvalidSeason(season_raw.to_string()))?;

    let lat_raw = index
        .get(record, columns::LAT)
        .ok_or(RowRejection::MissingField(columns::LAT))?;
    let lat = parse_finite(lat_raw).ok_or_else(|| RowRejection::InvalidLatitude(lat_raw.to_string()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(RowRejection::LatitudeOutOfRange(lat));
    }

    let lon_raw = index
        .get(record, columns::LON)
        .ok_or(RowRejection::MissingField(columns::LON))?;
    let lon = parse_finite(lon_raw).ok_or_else(|| RowRejection::InvalidLongitude(lon_raw.to_string()))?;

    let time_raw = index
        .get(record, columns::ISO_TIME)
        .ok_or(RowRejection::MissingField(columns::ISO_TIME))?;
    let time = parse_utc(time_raw).map_err(|_| RowRejection::InvalidTime(time_raw.to_string()))?;

    Ok(TrackRow {
        name: name.to_string(),
        season,
        time,
        lat,
        lon,
        sid: index.get(record, columns::SID).map(str::to_string),
        basin: index.get(record, columns::BASIN).map(str::to_string),
    })
}

/// Seasons are integral years; "2023.0" is accepted as well.
fn parse_season(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = parse_finite(raw)?;
    if value.fract() == 0.0 && value.abs() < i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Group rows into tracks keyed by (name, season).
pub fn group_storms(rows: Vec<TrackRow>) -> Vec<StormTrack> {
    let mut groups: BTreeMap<(String, i32), Vec<TrackRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.name.clone(), row.season))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((name, season), rows)| {
            let sid = rows.iter().find_map(|r| r.sid.clone());
            let basin = rows.iter().find_map(|r| r.basin.clone());
            let points = rows
                .iter()
                .map(|r| TrackPoint::new(r.time, r.lat, r.lon))
                .collect();
            StormTrack::new(name, season, points)
                .with_sid(sid)
                .with_basin(basin)
        })
        .collect()
}

/// Write accepted rows back out as a cleaned CSV.
pub fn write_rows<W: Write>(writer: W, rows: &[TrackRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
