//! Common test fixtures.
//!
//! The TEST storm has two fixes two days apart; with the default 14 d / 14 d
//! / 1 d windows its point windows overlap heavily, which is what the
//! deduplication tests need.

use chrono::{DateTime, TimeZone, Utc};

use storm_common::{ProfileObservation, StormTrack, TrackPoint};

/// Shorthand for a UTC timestamp on the hour.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day} {hour}h"))
}

/// Storm "TEST": t0 = 2023-09-01T00Z at (20, -60), t1 = 2023-09-03T00Z at (21, -61).
pub fn test_storm() -> StormTrack {
    StormTrack::new(
        "TEST",
        2023,
        vec![
            TrackPoint::new(utc(2023, 9, 1, 0), 20.0, -60.0),
            TrackPoint::new(utc(2023, 9, 3, 0), 21.0, -61.0),
        ],
    )
}

/// Profile with float identity.
pub fn profile(
    platform: &str,
    cycle: u32,
    time: DateTime<Utc>,
    lat: f64,
    lon: f64,
) -> ProfileObservation {
    ProfileObservation::new(lat, lon, time).with_float(platform, cycle)
}

/// Small IBTrACS extract: header, units row, two 2023 storms, one 2022
/// storm and a few rows that must be dropped.
pub const IBTRACS_SAMPLE: &str = "\
SID,SEASON,NUMBER,BASIN,SUBBASIN,NAME,ISO_TIME,NATURE,LAT,LON
 ,Year, , , , , ,degrees_north,degrees_east
2023239N21275,2023,60,NA,GM,IDALIA,2023-08-26 12:00:00,TS,20.8,-86.1
2023239N21275,2023,60,NA,GM,IDALIA,2023-08-26 18:00:00,TS,21.0,-86.0
2023239N21275,2023,60,NA,GM,IDALIA,2023-08-27 00:00:00,TS,, -85.9
2023239N21275,2023,60,NA,GM,IDALIA,2023-08-27 06:00:00,TS,21.3,-85.8
2023228N21253,2023,55,EP,MM,HILARY,2023-08-16 06:00:00,TS,14.6,-101.6
2023228N21253,2023,55,EP,MM,HILARY,2023-08-16 00:00:00,TS,14.2,-101.2
2023228N21253,2023,55,EP,MM,HILARY,not-a-time,TS,14.9,-102.0
2022264N18291,2022,54,NA,NN,FIONA,2022-09-20 00:00:00,TS,20.1,-69.2
2022264N18291,xxxx,54,NA,NN,FIONA,2022-09-20 06:00:00,TS,20.5,-69.5
";

/// ERDDAP-format profile extract around the TEST storm.
pub const ERDDAP_SAMPLE: &str = "\
platform_number,cycle_number,time,latitude,longitude
,,UTC,degrees_north,degrees_east
6903240,45,2023-08-31T12:00:00Z,20.1,-60.1
6903240,46,2023-09-15T00:00:00Z,20.0,-60.0
4903456,12,2023-08-25T00:00:00Z,21.0,-61.0
4903456,13,2023-09-02T00:00:00Z,22.5,-62.5
";
