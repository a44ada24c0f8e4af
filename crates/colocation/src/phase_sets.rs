//! Storm-level accumulation of classified profiles.

use std::collections::BTreeMap;

use serde::Serialize;

use storm_common::{Phase, ProfileKey, ProfileObservation};

use crate::classify::PointClassification;

/// Three identity-keyed sets, one per phase.
///
/// Keying by [`ProfileKey`] makes re-inserting a profile fetched again under
/// an overlapping point window a no-op, and iteration is already in identity
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseSets {
    before: BTreeMap<ProfileKey, ProfileObservation>,
    during: BTreeMap<ProfileKey, ProfileObservation>,
    after: BTreeMap<ProfileKey, ProfileObservation>,
}

impl PhaseSets {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, phase: Phase) -> &BTreeMap<ProfileKey, ProfileObservation> {
        match phase {
            Phase::Before => &self.before,
            Phase::During => &self.during,
            Phase::After => &self.after,
        }
    }

    fn set_mut(&mut self, phase: Phase) -> &mut BTreeMap<ProfileKey, ProfileObservation> {
        match phase {
            Phase::Before => &mut self.before,
            Phase::During => &mut self.during,
            Phase::After => &mut self.after,
        }
    }

    /// Insert one observation; returns false if it was already present.
    pub fn insert(&mut self, phase: Phase, obs: ProfileObservation) -> bool {
        let set = self.set_mut(phase);
        let key = obs.key();
        if set.contains_key(&key) {
            return false;
        }
        set.insert(key, obs);
        true
    }

    /// Add a point's classification; returns how many entries were new.
    pub fn absorb(&mut self, classification: PointClassification) -> usize {
        let mut added = 0;
        for (phase, obs) in classification.assigned {
            if self.insert(phase, obs) {
                added += 1;
            }
        }
        added
    }

    /// Union with another accumulator.
    pub fn merge(&mut self, other: PhaseSets) {
        for phase in Phase::ALL {
            let target = self.set_mut(phase);
            for (key, obs) in other.set(phase) {
                target.entry(key.clone()).or_insert_with(|| obs.clone());
            }
        }
    }

    pub fn len(&self, phase: Phase) -> usize {
        self.set(phase).len()
    }

    pub fn iter(&self, phase: Phase) -> impl Iterator<Item = &ProfileObservation> + '_ {
        self.set(phase).values()
    }

    pub fn counts(&self) -> PhaseCounts {
        PhaseCounts {
            before: self.before.len(),
            during: self.during.len(),
            after: self.after.len(),
        }
    }

    /// Freeze into identity-sorted sequences.
    pub fn finalize(self) -> StormPhases {
        StormPhases {
            before: self.before.into_values().collect(),
            during: self.during.into_values().collect(),
            after: self.after.into_values().collect(),
        }
    }
}

/// Final, deduplicated, identity-sorted profiles of one storm.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StormPhases {
    pub before: Vec<ProfileObservation>,
    pub during: Vec<ProfileObservation>,
    pub after: Vec<ProfileObservation>,
}

impl StormPhases {
    pub fn get(&self, phase: Phase) -> &[ProfileObservation] {
        match phase {
            Phase::Before => &self.before,
            Phase::During => &self.during,
            Phase::After => &self.after,
        }
    }

    pub fn counts(&self) -> PhaseCounts {
        PhaseCounts {
            before: self.before.len(),
            during: self.during.len(),
            after: self.after.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.during.is_empty() && self.after.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub before: usize,
    pub during: usize,
    pub after: usize,
}

impl PhaseCounts {
    pub fn total(&self) -> usize {
        self.before + self.during + self.after
    }
}
