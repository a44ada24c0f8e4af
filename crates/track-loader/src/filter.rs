//! Season and storm-name selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default target season.
pub const DEFAULT_SEASON: i32 = 2023;

/// Which seasons to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonFilter {
    Single(i32),
    All,
}

impl Default for SeasonFilter {
    fn default() -> Self {
        SeasonFilter::Single(DEFAULT_SEASON)
    }
}

impl SeasonFilter {
    pub fn matches(&self, season: i32) -> bool {
        match self {
            SeasonFilter::Single(target) => *target == season,
            SeasonFilter::All => true,
        }
    }
}

/// Row selection applied after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFilter {
    #[serde(default)]
    pub season: SeasonFilter,
    /// Upper-cased storm names to keep; `None` keeps every storm.
    #[serde(default)]
    pub storms: Option<BTreeSet<String>>,
}

impl TrackFilter {
    pub fn season(season: i32) -> Self {
        Self {
            season: SeasonFilter::Single(season),
            storms: None,
        }
    }

    pub fn all_seasons() -> Self {
        Self {
            season: SeasonFilter::All,
            storms: None,
        }
    }

    /// Restrict to the given storm names (compared case-insensitively).
    pub fn with_storms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_uppercase())
            .filter(|n| !n.is_empty())
            .collect();
        self.storms = if names.is_empty() { None } else { Some(names) };
        self
    }

    pub fn matches(&self, name: &str, season: i32) -> bool {
        if !self.season.matches(season) {
            return false;
        }
        match &self.storms {
            Some(names) => names.contains(&name.to_uppercase()),
            None => true,
        }
    }

    /// Description used in "no storms matched" errors and logs.
    pub fn describe(&self) -> String {
        let season = match self.season {
            SeasonFilter::Single(year) => format!("season {}", year),
            SeasonFilter::All => "all seasons".to_string(),
        };
        match &self.storms {
            Some(names) => format!(
                "{}, storms [{}]",
                season,
                names.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            None => season,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_target_season() {
        let filter = TrackFilter::default();
        assert!(filter.matches("IDALIA", 2023));
        assert!(!filter.matches("IDALIA", 2022));
    }

    #[test]
    fn test_allow_list_case_insensitive() {
        let filter = TrackFilter::season(2023).with_storms(["Adrian", "hilary"]);
        assert!(filter.matches("ADRIAN", 2023));
        assert!(filter.matches("HILARY", 2023));
        assert!(!filter.matches("IDALIA", 2023));
    }

    #[test]
    fn test_empty_allow_list_keeps_all() {
        let filter = TrackFilter::all_seasons().with_storms(Vec::<String>::new());
        assert!(filter.storms.is_none());
        assert!(filter.matches("ANY", 1990));
    }

    #[test]
    fn test_describe() {
        let filter = TrackFilter::season(2023).with_storms(["LIDIA"]);
        assert_eq!(filter.describe(), "season 2023, storms [LIDIA]");
    }
}
