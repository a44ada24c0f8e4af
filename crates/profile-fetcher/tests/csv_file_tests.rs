//! Tests for the offline CSV profile fetcher.

use std::io::Write;

use chrono::{TimeZone, Utc};
use profile_fetcher::{CsvFileFetcher, FetchError, ProfileFetcher, RegionQuery};
use storm_common::BoundingBox;

const PROFILES: &str = "\
platform_number,cycle_number,time,latitude,longitude
,,UTC,degrees_north,degrees_east
6903240,45,2023-08-31T12:00:00Z,20.1,-60.1
6903240,46,2023-09-15T00:00:00Z,20.0,-60.0
4903456,12,2023-09-02T06:30:00Z,30.0,-60.0
4903456,13,2023-10-20T00:00:00Z,20.0,-60.0
";

fn write_profiles() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROFILES.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn query() -> RegionQuery {
    RegionQuery::new(
        BoundingBox::around_point(20.0, -60.0, 2.0),
        0.0,
        2000.0,
        Utc.with_ymd_and_hms(2023, 8, 18, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 9, 15, 0, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_filters_by_region_and_window() {
    let file = write_profiles();
    let fetcher = CsvFileFetcher::open(file.path()).unwrap();
    assert_eq!(fetcher.len(), 4);

    let found = fetcher.fetch(&query()).await.unwrap();
    let cycles: Vec<_> = found.iter().map(|o| o.cycle_number.unwrap()).collect();

    // Cycle 12 is outside the box, cycle 13 outside the window; cycle 46 sits
    // exactly on the inclusive window end.
    assert_eq!(cycles, vec![45, 46]);
}

#[tokio::test]
async fn test_rejects_invalid_query() {
    let fetcher = CsvFileFetcher::default();
    let mut q = query();
    q.bbox = BoundingBox::new(10.0, 10.0, 5.0, 5.0);
    assert!(matches!(
        fetcher.fetch(&q).await,
        Err(FetchError::InvalidQuery(_))
    ));
}

#[test]
fn test_missing_file() {
    let result = CsvFileFetcher::open("/definitely/not/here.csv");
    assert!(matches!(result, Err(FetchError::SourceFile { .. })));
}

#[test]
fn test_fetcher_usable_behind_arc() {
    let fetcher: std::sync::Arc<dyn ProfileFetcher> =
        std::sync::Arc::new(CsvFileFetcher::default());
    assert_eq!(fetcher.name(), "csv-file");
}
