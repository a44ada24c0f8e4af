//! Machine-readable run summary (`summary.json`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use colocation::{PhaseCounts, StormOutcome, StormStats};

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StormStatus {
    Completed,
    /// The storm failed before any fetch (e.g. no usable track points).
    Skipped,
    /// Artifacts could not be written.
    Failed,
}

/// One storm's line in the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct StormSummary {
    pub name: String,
    pub season: i32,
    pub status: StormStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub counts: PhaseCounts,
    pub stats: StormStats,
    pub artifacts: Vec<PathBuf>,
}

impl StormSummary {
    pub fn completed(outcome: &StormOutcome, artifacts: Vec<PathBuf>) -> Self {
        Self {
            name: outcome.name.clone(),
            season: outcome.season,
            status: StormStatus::Completed,
            error: None,
            counts: outcome.phases.counts(),
            stats: outcome.stats,
            artifacts,
        }
    }

    pub fn skipped(name: &str, season: i32, error: impl ToString) -> Self {
        Self::without_results(name, season, StormStatus::Skipped, error.to_string())
    }

    pub fn failed(name: &str, season: i32, error: impl ToString) -> Self {
        Self::without_results(name, season, StormStatus::Failed, error.to_string())
    }

    fn without_results(name: &str, season: i32, status: StormStatus, error: String) -> Self {
        Self {
            name: name.to_string(),
            season,
            status,
            error: Some(error),
            counts: PhaseCounts::default(),
            stats: StormStats::default(),
            artifacts: Vec::new(),
        }
    }
}

/// Whole-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub filter: String,
    pub source: String,
    pub storms: Vec<StormSummary>,
}

impl RunSummary {
    pub fn new(filter: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            filter: filter.into(),
            source: source.into(),
            storms: Vec::new(),
        }
    }

    pub fn push(&mut self, storm: StormSummary) {
        self.storms.push(storm);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn count(&self, status: StormStatus) -> usize {
        self.storms.iter().filter(|s| s.status == status).count()
    }

    /// Profiles across all storms, phase by phase.
    pub fn totals(&self) -> PhaseCounts {
        self.storms.iter().fold(PhaseCounts::default(), |acc, s| PhaseCounts {
            before: acc.before + s.counts.before,
            during: acc.during + s.counts.during,
            after: acc.after + s.counts.after,
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| ReportError::write(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| ReportError::write(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_totals() {
        let mut summary = RunSummary::new("season 2023", "csv-file");
        let mut a = StormSummary::skipped("A", 2023, "no points");
        a.status = StormStatus::Completed;
        a.counts = PhaseCounts { before: 1, during: 2, after: 3 };
        summary.push(a);
        summary.push(StormSummary::skipped("B", 2023, "no points"));

        assert_eq!(summary.count(StormStatus::Completed), 1);
        assert_eq!(summary.count(StormStatus::Skipped), 1);
        assert_eq!(summary.totals().total(), 6);
    }

    #[test]
    fn test_serialized_shape() {
        let summary = StormSummary::failed("LEE", 2023, "disk full");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "disk full");
        assert_eq!(json["counts"]["before"], 0);
    }
}
