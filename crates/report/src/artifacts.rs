//! Per-storm artifact set.

use std::path::{Path, PathBuf};

use tracing::info;

use colocation::StormOutcome;
use storm_common::StormTrack;

use crate::error::{ReportError, Result};
use crate::map::{write_map, MapStyle};
use crate::naming::{map_filename, text_report_filename};
use crate::text::write_report;

/// Where and how storm artifacts are written.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    draw_map: bool,
    style: MapStyle,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            draw_map: true,
            style: MapStyle::default(),
        }
    }

    pub fn with_map(mut self, draw_map: bool) -> Self {
        self.draw_map = draw_map;
        self
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writer rooted at `<output_dir>/<season>`.
    pub fn for_season(&self, season: i32) -> Self {
        Self {
            output_dir: self.output_dir.join(season.to_string()),
            ..self.clone()
        }
    }

    /// Write the text report and, if enabled, the map. Returns the paths written.
    ///
    /// The map is framed on the outcome's storm box.
    pub fn write(&self, track: &StormTrack, outcome: &StormOutcome) -> Result<Vec<PathBuf>> {
        let phases = &outcome.phases;
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ReportError::write(&self.output_dir, e))?;

        let mut written = Vec::with_capacity(2);

        let report_path = self.output_dir.join(text_report_filename(&track.name));
        write_report(&report_path, &track.name, track.season, phases)?;
        written.push(report_path);

        if self.draw_map {
            let storm_box = outcome
                .bbox
                .ok_or_else(|| ReportError::EmptyTrack(track.name.clone()))?;
            let map_path = self.output_dir.join(map_filename(&track.name));
            write_map(&map_path, track, &storm_box, phases, &self.style)?;
            written.push(map_path);
        }

        info!(storm = %track.name, season = track.season, files = written.len(), "Wrote storm artifacts");
        Ok(written)
    }
}
