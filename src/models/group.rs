//! Group model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_window::TimeWindow;

/// A capacity-bounded discussion group within a plan.
///
/// `combined_windows` is the running intersection of all current members'
/// availability; it shrinks monotonically as members are added and is
/// recomputed authoritatively by the plan evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub capacity: usize,
    pub combined_windows: Vec<TimeWindow>,
    pub distinct_countries: usize,
}

impl Group {
    /// Create a new empty group.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity,
            combined_windows: Vec::new(),
            distinct_countries: 0,
        }
    }

    /// Pre-seed the group's combined windows (used before the first member
    /// is assigned, so the initial scoring has something to intersect
    /// against).
    pub fn with_seed_windows(mut self, windows: Vec<TimeWindow>) -> Self {
        self.combined_windows = windows;
        self
    }
}
