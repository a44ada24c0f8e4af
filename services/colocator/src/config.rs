//! Run configuration.
//!
//! Layered: built-in defaults, then an optional YAML file, then CLI flags.
//! YAML durations are whole hours (windows) or seconds (timeouts, retries).

use std::path::Path;
use std::time::Duration as StdDuration;

use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use colocation::MatchingConfig;
use profile_fetcher::{ErddapConfig, RetryPolicy, DEFAULT_ERDDAP_URL};

/// Root configuration loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub lookback_hours: i64,
    pub lookahead_hours: i64,
    pub margin_hours: i64,
    pub point_padding_deg: f64,
    pub storm_padding_deg: f64,
    pub depth_min: f64,
    pub depth_max: f64,
    pub fetch_timeout_secs: u64,
    pub max_concurrent_fetches: usize,
    pub map: bool,
    pub erddap: ErddapSection,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lookback_hours: 14 * 24,
            lookahead_hours: 14 * 24,
            margin_hours: 24,
            point_padding_deg: 2.0,
            storm_padding_deg: 2.0,
            depth_min: 0.0,
            depth_max: 2000.0,
            fetch_timeout_secs: 120,
            max_concurrent_fetches: 1,
            map: true,
            erddap: ErddapSection::default(),
        }
    }
}

/// ERDDAP endpoint and retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErddapSection {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
    pub initial_retry_delay_secs: u64,
    pub max_retry_delay_secs: u64,
}

impl Default for ErddapSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ERDDAP_URL.to_string(),
            request_timeout_secs: 120,
            connect_timeout_secs: 30,
            max_retries: 3,
            initial_retry_delay_secs: 2,
            max_retry_delay_secs: 30,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RunConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded run config");
        Ok(config)
    }

    /// Defaults when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn matching(&self) -> Result<MatchingConfig> {
        Ok(MatchingConfig {
            lookback: hours("lookback_hours", self.lookback_hours)?,
            lookahead: hours("lookahead_hours", self.lookahead_hours)?,
            margin: hours("margin_hours", self.margin_hours)?,
            point_padding_deg: self.point_padding_deg,
            storm_padding_deg: self.storm_padding_deg,
            depth_min: self.depth_min,
            depth_max: self.depth_max,
            fetch_timeout: StdDuration::from_secs(self.fetch_timeout_secs),
            max_concurrent_fetches: self.max_concurrent_fetches,
        })
    }

    pub fn erddap(&self) -> ErddapConfig {
        let section = &self.erddap;
        ErddapConfig {
            base_url: section.base_url.clone(),
            request_timeout: StdDuration::from_secs(section.request_timeout_secs),
            connect_timeout: StdDuration::from_secs(section.connect_timeout_secs),
            retry: RetryPolicy {
                max_retries: section.max_retries,
                initial_delay: StdDuration::from_secs(section.initial_retry_delay_secs),
                max_delay: StdDuration::from_secs(section.max_retry_delay_secs),
            },
            ..ErddapConfig::default()
        }
    }
}

fn hours(field: &str, value: i64) -> Result<Duration> {
    Duration::try_hours(value).ok_or_else(|| anyhow!("{} is out of range: {}", field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_matching_config() {
        assert_eq!(RunConfig::default().matching().unwrap(), MatchingConfig::default());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
lookback_hours: 240
margin_hours: 12
max_concurrent_fetches: 4
erddap:
  base_url: "https://example.org/erddap/tabledap/ArgoFloats"
  max_retries: 1
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        let matching = config.matching().unwrap();

        assert_eq!(matching.lookback, Duration::days(10));
        assert_eq!(matching.lookahead, Duration::days(14));
        assert_eq!(matching.margin, Duration::hours(12));
        assert_eq!(matching.max_concurrent_fetches, 4);

        let erddap = config.erddap();
        assert_eq!(erddap.base_url, "https://example.org/erddap/tabledap/ArgoFloats");
        assert_eq!(erddap.retry.max_retries, 1);
        assert_eq!(erddap.retry.initial_delay, StdDuration::from_secs(2));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_yaml::from_str::<RunConfig>("lookback_days: 3\n").is_err());
    }

    #[test]
    fn test_out_of_range_hours_rejected() {
        let config: RunConfig = serde_yaml::from_str("lookback_hours: 9000000000000000\n").unwrap();
        assert!(config.matching().is_err());
    }

    #[test]
    fn test_huge_window_fails_validation() {
        let yaml = "lookback_hours: 10000000000\nlookahead_hours: 10000000000\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.matching().unwrap().validate().is_err());
    }
}
