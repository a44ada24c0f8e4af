//! Storm-by-storm driver for a colocation run.
//!
//! Storms are processed one after another; a storm that fails (no usable
//! track, artifacts not writable) is recorded in the summary and the run moves
//! on to the next.

use std::collections::BTreeSet;

use tracing::{error, info, warn};

use colocation::{ColocationError, StormProcessor};
use profile_fetcher::ProfileFetcher;
use report::{ArtifactWriter, RunSummary, StormStatus, StormSummary};
use storm_common::StormTrack;

pub struct Runner<F> {
    processor: StormProcessor<F>,
    writer: ArtifactWriter,
}

impl<F: ProfileFetcher> Runner<F> {
    pub fn new(processor: StormProcessor<F>, writer: ArtifactWriter) -> Self {
        Self { processor, writer }
    }

    pub fn processor(&self) -> &StormProcessor<F> {
        &self.processor
    }

    /// Process every storm and record one summary entry per storm.
    pub async fn run(&self, tracks: &[StormTrack], summary: &mut RunSummary) {
        let seasons: BTreeSet<i32> = tracks.iter().map(|t| t.season).collect();
        let split_seasons = seasons.len() > 1;
        let count = tracks.len();

        info!(
            storms = count,
            seasons = seasons.len(),
            source = self.processor.fetcher().name(),
            "Starting colocation run"
        );

        for (idx, track) in tracks.iter().enumerate() {
            info!(
                storm = %track.name,
                season = track.season,
                points = track.len(),
                "[{}/{}] Processing storm",
                idx + 1,
                count
            );

            let writer = if split_seasons {
                self.writer.for_season(track.season)
            } else {
                self.writer.clone()
            };

            summary.push(self.run_storm(track, &writer).await);
        }

        summary.finish();
        let totals = summary.totals();
        info!(
            storms = summary.storms.len(),
            completed = summary.count(StormStatus::Completed),
            skipped = summary.count(StormStatus::Skipped),
            failed = summary.count(StormStatus::Failed),
            before = totals.before,
            during = totals.during,
            after = totals.after,
            "Colocation run complete"
        );
    }

    async fn run_storm(&self, track: &StormTrack, writer: &ArtifactWriter) -> StormSummary {
        let outcome = match self.processor.process(track).await {
            Ok(outcome) => outcome,
            Err(e @ ColocationError::NoValidTrackPoints { .. }) => {
                warn!(storm = %track.name, season = track.season, error = %e, "Skipping storm");
                return StormSummary::skipped(&track.name, track.season, e);
            }
            Err(e) => {
                error!(storm = %track.name, season = track.season, error = %e, "Storm failed");
                return StormSummary::failed(&track.name, track.season, e);
            }
        };

        match writer.write(track, &outcome) {
            Ok(paths) => StormSummary::completed(&outcome, paths),
            Err(e) => {
                error!(storm = %track.name, season = track.season, error = %e, "Failed to write storm artifacts");
                StormSummary::failed(&track.name, track.season, e)
            }
        }
    }
}
