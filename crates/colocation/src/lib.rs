//! Storm / Argo profile colocation.
//!
//! A windowed join between a storm track and a cloud of float profiles:
//!
//! - [`window`]: per-point box, fetch window and Before/During/After windows
//! - [`classify`]: assigns one fetch's profiles to phases
//! - [`phase_sets`]: identity-keyed storm-level accumulation and dedupe
//! - [`pipeline`]: the per-storm control loop with point-level error isolation

pub mod classify;
pub mod config;
pub mod error;
pub mod phase_sets;
pub mod pipeline;
pub mod window;

pub use classify::{classify, PointClassification};
pub use config::MatchingConfig;
pub use error::{ColocationError, Result};
pub use phase_sets::{PhaseCounts, PhaseSets, StormPhases};
pub use pipeline::{StormOutcome, StormProcessor, StormStage, StormStats};
pub use window::{plan_track, PointWindows};
