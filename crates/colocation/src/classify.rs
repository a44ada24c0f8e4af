//! Phase classification of one fetch result.

use storm_common::{Phase, ProfileObservation};

use crate::window::PointWindows;

/// Outcome of classifying the observations returned for one track point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointClassification {
    pub assigned: Vec<(Phase, ProfileObservation)>,
    /// Well-formed observations outside every phase window.
    pub out_of_window: usize,
    /// Observations with unusable coordinates.
    pub malformed: usize,
}

impl PointClassification {
    pub fn count(&self, phase: Phase) -> usize {
        self.assigned.iter().filter(|(p, _)| *p == phase).count()
    }

    pub fn dropped(&self) -> usize {
        self.out_of_window + self.malformed
    }
}

/// Assign each observation to the phase whose window contains its time,
/// judged against the windows of the point whose fetch returned it.
///
/// Nothing here fails: malformed and out-of-window observations are counted
/// and dropped.
pub fn classify<I>(windows: &PointWindows, observations: I) -> PointClassification
where
    I: IntoIterator<Item = ProfileObservation>,
{
    let mut result = PointClassification::default();

    for obs in observations {
        if !obs.is_well_formed() {
            result.malformed += 1;
            continue;
        }
        match windows.phase_of(&obs.time) {
            Some(phase) => result.assigned.push((phase, obs)),
            None => result.out_of_window += 1,
        }
    }

    result
}
