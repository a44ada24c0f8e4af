//! Per-storm control loop.
//!
//! For each valid track point: plan windows, fetch the point's region, and
//! fold the classified result into the storm's [`PhaseSets`]. A failed fetch
//! costs only its own point.

use std::fmt;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use profile_fetcher::{FetchError, ProfileFetcher};
use storm_common::{BoundingBox, ProfileObservation, StormTrack};

use crate::classify::classify;
use crate::config::MatchingConfig;
use crate::error::{ColocationError, Result};
use crate::phase_sets::{PhaseSets, StormPhases};
use crate::window::{plan_track, PointWindows};

/// Lifecycle of one storm. There is no failed state for point errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StormStage {
    NotStarted,
    Loading,
    Fetching,
    Classifying,
    Finalizing,
    Done,
}

impl fmt::Display for StormStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StormStage::NotStarted => "not_started",
            StormStage::Loading => "loading",
            StormStage::Fetching => "fetching",
            StormStage::Classifying => "classifying",
            StormStage::Finalizing => "finalizing",
            StormStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Per-storm counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StormStats {
    pub points_total: usize,
    pub points_fetched: usize,
    /// Points skipped on the known transient upstream fault.
    pub points_suppressed: usize,
    /// Points skipped on any other fetch error.
    pub points_failed: usize,
    pub observations_fetched: usize,
    pub observations_assigned: usize,
    pub observations_dropped: usize,
}

/// Finished result for one storm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormOutcome {
    pub name: String,
    pub season: i32,
    pub stage: StormStage,
    /// Storm-level box (track extent plus storm padding).
    pub bbox: Option<BoundingBox>,
    pub phases: StormPhases,
    pub stats: StormStats,
}

/// Accumulator threaded through the point fold.
#[derive(Debug, Default)]
struct StormAccumulator {
    sets: PhaseSets,
    stats: StormStats,
}

/// Drives the window planner and a fetcher across storm tracks.
pub struct StormProcessor<F> {
    fetcher: F,
    config: MatchingConfig,
}

impl<F: ProfileFetcher> StormProcessor<F> {
    /// Build a processor; the configuration is validated once here.
    pub fn new(fetcher: F, config: MatchingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { fetcher, config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run every valid point of `track` through fetch and classification.
    ///
    /// Fails only when the track has no usable points.
    #[instrument(skip(self, track), fields(storm = %track.name, season = track.season))]
    pub async fn process(&self, track: &StormTrack) -> Result<StormOutcome> {
        debug!(stage = %StormStage::Loading, "Planning point windows");

        let windows = plan_track(track.valid_points(), &self.config);
        if windows.is_empty() {
            return Err(ColocationError::NoValidTrackPoints {
                name: track.name.clone(),
                season: track.season,
            });
        }

        let initial = StormAccumulator {
            stats: StormStats {
                points_total: windows.len(),
                ..StormStats::default()
            },
            ..StormAccumulator::default()
        };

        let acc = stream::iter(windows.iter().enumerate())
            .map(|(index, w)| self.fetch_point(index, w))
            .buffer_unordered(self.config.max_concurrent_fetches)
            .fold(initial, |mut acc, (index, w, result)| async move {
                absorb_point(&mut acc, track, index, w, result);
                acc
            })
            .await;

        debug!(stage = %StormStage::Finalizing, "Deduplicating phase sets");
        let StormAccumulator { sets, stats } = acc;
        let phases = sets.finalize();
        let counts = phases.counts();

        info!(
            points = stats.points_total,
            fetched = stats.points_fetched,
            suppressed = stats.points_suppressed,
            failed = stats.points_failed,
            before = counts.before,
            during = counts.during,
            after = counts.after,
            "Storm processed"
        );

        Ok(StormOutcome {
            name: track.name.clone(),
            season: track.season,
            stage: StormStage::Done,
            bbox: track.bounding_box(self.config.storm_padding_deg),
            phases,
            stats,
        })
    }

    async fn fetch_point<'w>(
        &self,
        index: usize,
        windows: &'w PointWindows,
    ) -> (
        usize,
        &'w PointWindows,
        std::result::Result<Vec<ProfileObservation>, FetchError>,
    ) {
        trace!(point = index, stage = %StormStage::Fetching, "Fetching point window");
        let query = windows.query(self.config.depth_min, self.config.depth_max);
        let result = match tokio::time::timeout(self.config.fetch_timeout, self.fetcher.fetch(&query))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.config.fetch_timeout)),
        };
        (index, windows, result)
    }
}

fn absorb_point(
    acc: &mut StormAccumulator,
    track: &StormTrack,
    index: usize,
    windows: &PointWindows,
    result: std::result::Result<Vec<ProfileObservation>, FetchError>,
) {
    match result {
        Ok(observations) => {
            trace!(point = index, stage = %StormStage::Classifying, "Classifying point results");
            acc.stats.points_fetched += 1;
            acc.stats.observations_fetched += observations.len();

            let classification = classify(windows, observations);
            acc.stats.observations_assigned += classification.assigned.len();
            acc.stats.observations_dropped += classification.dropped();
            acc.sets.absorb(classification);
        }
        Err(e) if e.is_suppressed() => {
            acc.stats.points_suppressed += 1;
            trace!(point = index, "Point skipped on transient upstream fault");
        }
        Err(e) => {
            acc.stats.points_failed += 1;
            warn!(
                storm = %track.name,
                season = track.season,
                point = index,
                time = %windows.point.time,
                lat = windows.point.lat,
                lon = windows.point.lon,
                error = %e,
                "Skipping point due to fetch error"
            );
        }
    }
}
