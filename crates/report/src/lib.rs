//! Output artifacts for colocated storms.
//!
//! - [`text`]: the per-storm phase report
//! - [`map`]: the per-storm PNG map (tiny-skia raster, hand-written PNG encoder)
//! - [`summary`]: the run-level `summary.json`

pub mod artifacts;
pub mod error;
pub mod map;
pub mod naming;
pub mod png;
pub mod summary;
pub mod text;

pub use artifacts::ArtifactWriter;
pub use error::{ReportError, Result};
pub use map::{render_map, write_map, MapImage, MapStyle};
pub use naming::{map_filename, slug, text_report_filename, SUMMARY_FILENAME};
pub use summary::{RunSummary, StormStatus, StormSummary};
pub use text::{format_entry, render_report, write_report};
