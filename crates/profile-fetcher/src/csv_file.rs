//! Offline fetcher over a local profile CSV.

use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use storm_common::ProfileObservation;

use crate::error::{FetchError, Result};
use crate::parse::parse_profiles_csv;
use crate::query::RegionQuery;
use crate::ProfileFetcher;

/// Serves region queries from profiles loaded once from an ERDDAP-format CSV.
///
/// Only position and time are filtered; the file carries no pressure levels,
/// so the query's depth range is not applied.
#[derive(Debug, Clone, Default)]
pub struct CsvFileFetcher {
    observations: Vec<ProfileObservation>,
}

impl CsvFileFetcher {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source_err = |message: String| FetchError::SourceFile {
            path: path.display().to_string(),
            message,
        };

        let file = File::open(path).map_err(|e| source_err(e.to_string()))?;
        let parsed = parse_profiles_csv(file).map_err(|e| source_err(e.to_string()))?;

        info!(
            path = %path.display(),
            profiles = parsed.observations.len(),
            dropped = parsed.rows_dropped,
            "Loaded offline profile file"
        );

        Ok(Self::from_observations(parsed.observations))
    }

    pub fn from_observations(observations: Vec<ProfileObservation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[async_trait]
impl ProfileFetcher for CsvFileFetcher {
    async fn fetch(&self, query: &RegionQuery) -> Result<Vec<ProfileObservation>> {
        query.validate()?;
        Ok(self
            .observations
            .iter()
            .filter(|obs| query.matches(obs.latitude, obs.longitude, &obs.time))
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "csv-file"
    }
}
