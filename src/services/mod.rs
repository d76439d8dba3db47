//! Services module
//!
//! This module contains the scheduling core: the interval algebra and the
//! components layered on top of it. Dependencies are passed explicitly so
//! every service can be substituted in tests.

pub mod assignment;
pub mod availability;
pub mod evaluator;
pub mod scoring;
pub mod time_window;

// Re-export commonly used services
pub use assignment::{AssignmentEngine, AssignmentSummary};
pub use availability::AvailabilityService;
pub use evaluator::PlanEvaluator;
pub use scoring::{OverlapScore, OverlapScorer};
pub use time_window::{BoundaryOrdering, TimeWindowService, WindowUnion};

use crate::config::Settings;

/// Service factory for creating and wiring all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub time_window_service: TimeWindowService,
    pub availability_service: AvailabilityService,
    pub overlap_scorer: OverlapScorer,
    pub plan_evaluator: PlanEvaluator,
    pub assignment_engine: AssignmentEngine,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Self {
        let time_window_service = TimeWindowService::new();
        let availability_service = AvailabilityService::new(time_window_service);
        let overlap_scorer = OverlapScorer::new(time_window_service);
        let plan_evaluator = PlanEvaluator::new(time_window_service);
        let assignment_engine = AssignmentEngine::new(
            time_window_service,
            overlap_scorer,
            plan_evaluator,
            settings,
        );

        Self {
            time_window_service,
            availability_service,
            overlap_scorer,
            plan_evaluator,
            assignment_engine,
        }
    }
}
