//! Per-point window planning.
//!
//! Every track point yields one spatial box, one closed fetch window and three
//! phase windows that partition it:
//!
//! ```text
//! t - lookback          t - margin      t + margin          t + lookahead
//!      [------ Before ------)[------ During ------](------ After ------]
//! ```
//!
//! Both margin instants belong to During.

use chrono::{DateTime, Utc};
use tracing::warn;

use profile_fetcher::RegionQuery;
use storm_common::{BoundingBox, Phase, TimeInterval, TrackPoint};

use crate::config::MatchingConfig;

/// Windows derived from a single track point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointWindows {
    pub point: TrackPoint,
    pub bbox: BoundingBox,
    /// `[t - lookback, t + lookahead]`
    pub fetch: TimeInterval,
    /// `[t - lookback, t - margin)`
    pub before: TimeInterval,
    /// `[t - margin, t + margin]`
    pub during: TimeInterval,
    /// `(t + margin, t + lookahead]`
    pub after: TimeInterval,
}

impl PointWindows {
    /// Plan the windows for one point. Pure; assumes a validated config.
    ///
    /// Returns `None` when a window edge falls outside the representable
    /// time range.
    pub fn plan(point: &TrackPoint, config: &MatchingConfig) -> Option<Self> {
        let t = point.time;
        let fetch_start = t.checked_sub_signed(config.lookback)?;
        let fetch_end = t.checked_add_signed(config.lookahead)?;
        let during_start = t.checked_sub_signed(config.margin)?;
        let during_end = t.checked_add_signed(config.margin)?;

        Some(Self {
            point: *point,
            bbox: BoundingBox::around_point(point.lat, point.lon, config.point_padding_deg),
            fetch: TimeInterval::closed(fetch_start, fetch_end),
            before: TimeInterval::closed_open(fetch_start, during_start),
            during: TimeInterval::closed(during_start, during_end),
            after: TimeInterval::open_closed(during_end, fetch_end),
        })
    }

    pub fn interval(&self, phase: Phase) -> &TimeInterval {
        match phase {
            Phase::Before => &self.before,
            Phase::During => &self.during,
            Phase::After => &self.after,
        }
    }

    /// Phase of a timestamp against these windows.
    ///
    /// Tests run Before, During, After and the first match wins; a time
    /// outside the fetch window matches nothing.
    pub fn phase_of(&self, time: &DateTime<Utc>) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|phase| self.interval(*phase).contains(time))
    }

    /// Fetch query covering this point's box and combined window.
    pub fn query(&self, depth_min: f64, depth_max: f64) -> RegionQuery {
        RegionQuery::new(
            self.bbox,
            depth_min,
            depth_max,
            self.fetch.start,
            self.fetch.end,
        )
    }
}

/// Plan windows for every point, in order. Points whose windows cannot be
/// represented are skipped.
pub fn plan_track<'a, I>(points: I, config: &MatchingConfig) -> Vec<PointWindows>
where
    I: IntoIterator<Item = &'a TrackPoint>,
{
    points
        .into_iter()
        .filter_map(|p| {
            let planned = PointWindows::plan(p, config);
            if planned.is_none() {
                warn!(time = %p.time, "Skipping point with out-of-range windows");
            }
            planned
        })
        .collect()
}
