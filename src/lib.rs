//! cohortmatch
//!
//! Availability matching and group assignment for cohort scheduling.
//! This library provides the interval algebra over recurring weekend time
//! windows, timezone-aware availability projection, overlap scoring, and the
//! greedy engine that partitions a roster into capacity-bounded discussion
//! groups.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CohortMatchError, Result};

// Re-export main components for easy access
pub use models::{Group, MeetingDay, Participant, Placement, Plan, TimeWindow};
pub use services::{
    AssignmentEngine, AssignmentSummary, AvailabilityService, OverlapScorer, PlanEvaluator,
    ServiceFactory, TimeWindowService,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
