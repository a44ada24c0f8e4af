//! ERDDAP tabledap fetcher for Argo profiles.
//!
//! Issues one `.csv` request per region query against the `ArgoFloats`
//! dataset, asking for the distinct profile positions inside the box, depth
//! range and time window. Server-side failures and dropped connections are
//! retried with exponential backoff before being reported.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use storm_common::ProfileObservation;

use crate::error::{FetchError, Result};
use crate::parse::{parse_profiles_csv, PROFILE_COLUMNS};
use crate::query::RegionQuery;
use crate::ProfileFetcher;

/// Default Ifremer ERDDAP endpoint for the Argo profile dataset.
pub const DEFAULT_ERDDAP_URL: &str = "https://erddap.ifremer.fr/erddap/tabledap/ArgoFloats";

/// Body fragment ERDDAP uses when a query is valid but selects nothing.
const NO_MATCHING_RESULTS: &str = "Your query produced no matching results";

/// Retry schedule for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Initial delay, doubled after every failure.
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        std::cmp::min(self.initial_delay.saturating_mul(factor), self.max_delay)
    }
}

/// Configuration for [`ErddapFetcher`].
#[derive(Debug, Clone)]
pub struct ErddapConfig {
    /// Dataset URL without the file-type extension.
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl Default for ErddapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ERDDAP_URL.to_string(),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            user_agent: concat!("storm-colocation/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP fetcher for an ERDDAP tabledap Argo dataset.
pub struct ErddapFetcher {
    client: Client,
    config: ErddapConfig,
}

impl ErddapFetcher {
    pub fn new(config: ErddapConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ErddapConfig {
        &self.config
    }

    /// Build the tabledap `.csv` request URL for a query.
    pub fn request_url(&self, query: &RegionQuery) -> Result<Url> {
        build_request_url(&self.config.base_url, query)
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<ProfileObservation>> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.config.request_timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("error reading response body: {}", e)))?;

        if status.is_success() {
            let parsed = parse_profiles_csv(body.as_bytes())?;
            debug!(
                profiles = parsed.observations.len(),
                dropped = parsed.rows_dropped,
                "Decoded ERDDAP response"
            );
            return Ok(parsed.observations);
        }

        classify_failure(status, &body)
    }
}

#[async_trait]
impl ProfileFetcher for ErddapFetcher {
    #[instrument(skip(self, query), fields(start = %query.start, end = %query.end))]
    async fn fetch(&self, query: &RegionQuery) -> Result<Vec<ProfileObservation>> {
        query.validate()?;
        let url = self.request_url(query)?;
        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(observations) => return Ok(observations),
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    attempt += 1;
                    let delay = retry.delay_for(attempt);
                    warn!(
                        error = %e,
                        retry = attempt,
                        max_retries = retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Profile fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        "erddap"
    }
}

/// Map a non-success response to a result.
///
/// "No matching results" is an empty answer, not a failure. 5xx and 429 are
/// the service's transient fault class.
fn classify_failure(status: StatusCode, body: &str) -> Result<Vec<ProfileObservation>> {
    if body.contains(NO_MATCHING_RESULTS) {
        return Ok(Vec::new());
    }

    let message = summarize_body(body);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Err(FetchError::Transient(format!("HTTP {}: {}", status.as_u16(), message)))
    } else {
        Err(FetchError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// First non-empty line of an error page, trimmed to a loggable length.
fn summarize_body(body: &str) -> String {
    let line = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    line.chars().take(200).collect()
}

fn erddap_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn build_request_url(base_url: &str, query: &RegionQuery) -> Result<Url> {
    let constraints = [
        format!("longitude>={}", query.bbox.min_lon),
        format!("longitude<={}", query.bbox.max_lon),
        format!("latitude>={}", query.bbox.min_lat),
        format!("latitude<={}", query.bbox.max_lat),
        format!("pres>={}", query.depth_min),
        format!("pres<={}", query.depth_max),
        format!("time>={}", erddap_time(&query.start)),
        format!("time<={}", erddap_time(&query.end)),
        "distinct()".to_string(),
    ];

    let raw = format!(
        "{}.csv?{}&{}",
        base_url.trim_end_matches('/'),
        PROFILE_COLUMNS.join(","),
        constraints.join("&")
    );

    Url::parse(&raw).map_err(|e| FetchError::InvalidQuery(format!("{}: {}", raw, e)))
}
