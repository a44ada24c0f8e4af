//! Temporal phase of a profile relative to a storm fix.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Before,
    During,
    After,
}

impl Phase {
    /// Classification order; the first matching phase wins.
    pub const ALL: [Phase; 3] = [Phase::Before, Phase::During, Phase::After];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "Before",
            Phase::During => "During",
            Phase::After => "After",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
