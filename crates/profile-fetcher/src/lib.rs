//! Profile fetcher adapters.
//!
//! The [`ProfileFetcher`] trait is the boundary between the colocation core
//! and wherever Argo profiles come from:
//!
//! - [`ErddapFetcher`]: live queries against an ERDDAP tabledap server
//! - [`CsvFileFetcher`]: a pre-downloaded CSV served from memory
//!
//! Each call answers one region/depth/time query and either returns the
//! matching observations or a typed [`FetchError`].

use std::sync::Arc;

use async_trait::async_trait;

use storm_common::ProfileObservation;

mod csv_file;
pub mod erddap;
pub mod error;
pub mod parse;
pub mod query;

pub use csv_file::CsvFileFetcher;
pub use erddap::{ErddapConfig, ErddapFetcher, RetryPolicy, DEFAULT_ERDDAP_URL};
pub use error::{FetchError, Result};
pub use parse::{parse_profiles_csv, ParsedProfiles};
pub use query::RegionQuery;

/// A source of profile observations for region/time queries.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch every profile inside the query's box, depth range and closed
    /// time window.
    async fn fetch(&self, query: &RegionQuery) -> Result<Vec<ProfileObservation>>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "profiles"
    }
}

#[async_trait]
impl<T: ProfileFetcher + ?Sized> ProfileFetcher for Arc<T> {
    async fn fetch(&self, query: &RegionQuery) -> Result<Vec<ProfileObservation>> {
        (**self).fetch(query).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
