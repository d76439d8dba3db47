//! Group overlap scoring service
//!
//! The fitness function for assignment: how much meeting time a candidate
//! shares with a group's current combined availability.

use tracing::trace;

use crate::models::time_window::TimeWindow;
use crate::services::time_window::TimeWindowService;
use crate::utils::errors::Result;

/// Result of scoring a candidate against a group.
#[derive(Debug, Clone)]
pub struct OverlapScore {
    /// Total shared meeting time in hours.
    pub duration_hours: f64,
    /// The intersecting windows themselves; becomes the group's new combined
    /// set when the candidate is assigned.
    pub intersection: Vec<TimeWindow>,
}

/// Overlap scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScorer {
    time_windows: TimeWindowService,
}

impl OverlapScorer {
    /// Create a new OverlapScorer instance
    pub fn new(time_windows: TimeWindowService) -> Self {
        Self { time_windows }
    }

    /// Score a candidate's windows against a group's combined windows.
    ///
    /// An empty group has no constraint to intersect against, so the
    /// intersection is the candidate's windows verbatim.
    pub fn score(
        &self,
        group_windows: &[TimeWindow],
        candidate_windows: &[TimeWindow],
    ) -> Result<OverlapScore> {
        let intersection = if group_windows.is_empty() {
            candidate_windows.to_vec()
        } else {
            self.time_windows
                .intersect_all_pairs(group_windows, candidate_windows)?
        };
        let duration_hours = self.time_windows.total_duration_hours(&intersection);
        trace!(
            group_windows = group_windows.len(),
            candidate_windows = candidate_windows.len(),
            duration_hours = duration_hours,
            "Scored candidate against group"
        );
        Ok(OverlapScore {
            duration_hours,
            intersection,
        })
    }
}
