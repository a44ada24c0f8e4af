//! Tests for storm artifacts: text report, PNG map and run summary.

use colocation::{MatchingConfig, StormOutcome, StormPhases, StormProcessor, StormStage, StormStats};
use report::{
    map_filename, render_map, render_report, text_report_filename, ArtifactWriter, MapStyle,
    RunSummary, StormStatus, StormSummary,
};
use storm_common::{BoundingBox, StormTrack, TrackPoint};
use test_utils::fixtures::{profile, test_storm, utc};
use test_utils::ScriptedFetcher;

// ============================================================================
// Helper functions
// ============================================================================

fn sample_phases() -> StormPhases {
    StormPhases {
        before: vec![profile("4903456", 12, utc(2023, 8, 25, 0), 21.0, -61.0)],
        during: vec![profile("6903240", 45, utc(2023, 8, 31, 12), 20.1, -60.1)],
        after: vec![profile("6903240", 46, utc(2023, 9, 15, 0), 18.0, -56.0)],
    }
}

/// TEST storm box with the default 2 degree storm padding: lon -63..-58, lat 18..23.
fn storm_box() -> BoundingBox {
    test_storm().bounding_box(2.0).unwrap()
}

fn outcome(phases: StormPhases) -> StormOutcome {
    let track = test_storm();
    StormOutcome {
        name: track.name.clone(),
        season: track.season,
        stage: StormStage::Done,
        bbox: track.bounding_box(2.0),
        phases,
        stats: StormStats::default(),
    }
}

// ============================================================================
// Text report
// ============================================================================

#[test]
fn test_report_layout() {
    let text = render_report("TEST", 2023, &sample_phases());
    let expected = "\
Argo Profiles for Hurricane: TEST (2023)

[Before]
4903456-12, 2023-08-25T00:00:00Z, 21.00, -61.00

[During]
6903240-45, 2023-08-31T12:00:00Z, 20.10, -60.10

[After]
6903240-46, 2023-09-15T00:00:00Z, 18.00, -56.00
";
    assert_eq!(text, expected);
}

#[tokio::test]
async fn test_all_transient_report_reads_none() {
    let processor =
        StormProcessor::new(ScriptedFetcher::always_transient(), MatchingConfig::default())
            .unwrap();
    let outcome = processor.process(&test_storm()).await.unwrap();

    let text = render_report(&outcome.name, outcome.season, &outcome.phases);
    assert_eq!(text.matches("None").count(), 3);
}

// ============================================================================
// Map
// ============================================================================

#[test]
fn test_map_extent_and_colors() {
    let style = MapStyle::default();
    let image = render_map(&test_storm(), &storm_box(), &sample_phases(), &style).unwrap();

    // Storm box lon -63..-58, lat 18..23, padded by 5 degrees at 40 px/deg.
    assert_eq!(image.extent, BoundingBox::new(-68.0, 13.0, -53.0, 28.0));
    assert_eq!(image.width, 600);
    assert_eq!(image.height, 600);

    // After marker at (18, -56) sits away from the track.
    let x = ((-56.0 - image.extent.min_lon) * 40.0) as u32;
    let y = ((image.extent.max_lat - 18.0) * 40.0) as u32;
    assert_eq!(image.pixel(x, y), Some(style.after));

    assert_eq!(image.pixel(1, 1), Some(style.background));
    assert!(image.pixel(image.width, 0).is_none());
}

#[test]
fn test_map_scale_capped() {
    let track = StormTrack::new(
        "LONG",
        2023,
        vec![
            TrackPoint::new(utc(2023, 9, 1, 0), 10.0, -100.0),
            TrackPoint::new(utc(2023, 9, 10, 0), 40.0, -10.0),
        ],
    );
    let style = MapStyle::default();
    let storm_box = track.bounding_box(2.0).unwrap();
    let image = render_map(&track, &storm_box, &StormPhases::default(), &style).unwrap();
    assert!(image.width <= style.max_dimension);
    assert!(image.height <= style.max_dimension);
}

#[test]
fn test_map_follows_storm_padding() {
    let style = MapStyle::default();
    let wide = test_storm().bounding_box(4.0).unwrap();
    let image = render_map(&test_storm(), &wide, &sample_phases(), &style).unwrap();
    assert_eq!(image.extent, BoundingBox::new(-70.0, 11.0, -51.0, 30.0));
}

#[test]
fn test_map_requires_storm_box() {
    let dir = tempfile::tempdir().unwrap();
    let mut boxless = outcome(StormPhases::default());
    boxless.bbox = None;
    assert!(ArtifactWriter::new(dir.path()).write(&test_storm(), &boxless).is_err());

    let invalid = BoundingBox::new(f64::NAN, 18.0, -58.0, 23.0);
    assert!(render_map(&test_storm(), &invalid, &StormPhases::default(), &MapStyle::default()).is_err());
}

#[test]
fn test_encoded_map_is_png() {
    let image =
        render_map(&test_storm(), &storm_box(), &sample_phases(), &MapStyle::default()).unwrap();
    let png = image.encode_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

// ============================================================================
// Artifact writer and summary
// ============================================================================

#[test]
fn test_writer_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path());

    let written = writer.write(&test_storm(), &outcome(sample_phases())).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], dir.path().join(text_report_filename("TEST")));
    assert_eq!(written[1], dir.path().join(map_filename("TEST")));
    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("Argo Profiles for Hurricane: TEST (2023)"));
}

#[test]
fn test_writer_without_map_per_season() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ArtifactWriter::new(dir.path()).with_map(false).for_season(2023);

    let written = writer.write(&test_storm(), &outcome(StormPhases::default())).unwrap();

    assert_eq!(written, vec![dir.path().join("2023").join("argo_profiles_test.txt")]);
    assert!(!dir.path().join("2023").join("combined_argo_hurricane_test.png").exists());
}

#[test]
fn test_summary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let mut summary = RunSummary::new("season 2023", "scripted");
    summary.push(StormSummary::skipped("NOWHERE", 2023, "no valid points"));
    summary.finish();
    summary.write(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["filter"], "season 2023");
    assert_eq!(json["storms"][0]["status"], "skipped");
    assert!(json["finished_at"].is_string());
    assert_eq!(summary.count(StormStatus::Skipped), 1);
}
