//! Plan evaluation service
//!
//! Authoritative recomputation of every group's combined availability and
//! country-diversity count from final membership. Evaluation is idempotent
//! and independent of assignment order, so it also backs manual overrides:
//! moving a participant re-runs the full evaluation rather than patching
//! incrementally.

use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use crate::models::plan::Plan;
use crate::models::time_window::TimeWindow;
use crate::services::time_window::TimeWindowService;
use crate::utils::errors::{CohortMatchError, Result};

/// Plan evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanEvaluator {
    time_windows: TimeWindowService,
}

impl PlanEvaluator {
    /// Create a new PlanEvaluator instance
    pub fn new(time_windows: TimeWindowService) -> Self {
        Self { time_windows }
    }

    /// Recompute each group's combined windows and diversity metric from its
    /// current members.
    ///
    /// The fold starts empty and takes the first contributing member's
    /// windows verbatim: intersecting against an empty set is vacuously
    /// empty and would zero the group out forever.
    pub fn evaluate(&self, plan: &mut Plan) -> Result<()> {
        for group_idx in 0..plan.groups.len() {
            let group_id = plan.groups[group_idx].id;
            let members: Vec<(Vec<TimeWindow>, Option<String>)> = plan
                .placements
                .iter()
                .filter(|p| p.group_id == Some(group_id))
                .map(|p| {
                    (
                        p.participant.availability.clone(),
                        p.participant.country.clone(),
                    )
                })
                .collect();

            let mut combined: Vec<TimeWindow> = Vec::new();
            let mut countries: HashSet<String> = HashSet::new();
            for (availability, country) in &members {
                if combined.is_empty() {
                    combined = availability.clone();
                } else {
                    combined = self
                        .time_windows
                        .intersect_all_pairs(&combined, availability)?;
                }
                if let Some(country) = country {
                    let trimmed = country.trim();
                    if !trimmed.is_empty() {
                        countries.insert(trimmed.to_lowercase());
                    }
                }
            }

            crate::utils::logging::log_group_evaluation(
                group_id,
                members.len(),
                combined.len(),
                countries.len(),
            );
            plan.groups[group_idx].combined_windows = combined;
            plan.groups[group_idx].distinct_countries = countries.len();
        }
        Ok(())
    }

    /// Move a placement to another group (or to the waitlist with `None`),
    /// then re-evaluate the whole plan.
    ///
    /// This is the manual-override path (operator drag-and-drop); it does
    /// not enforce capacity, but logs a warning when the target group ends
    /// up over its limit.
    pub fn move_placement(
        &self,
        plan: &mut Plan,
        placement_id: Uuid,
        target_group: Option<Uuid>,
    ) -> Result<()> {
        if let Some(group_id) = target_group {
            if plan.group(group_id).is_none() {
                return Err(CohortMatchError::GroupNotFound { group_id });
            }
        }

        let placement = plan
            .placements
            .iter_mut()
            .find(|p| p.id == placement_id)
            .ok_or(CohortMatchError::PlacementNotFound { placement_id })?;
        let previous_group = placement.group_id;
        placement.group_id = target_group;
        crate::utils::logging::log_placement_move(placement_id, previous_group, target_group);

        if let Some(group_id) = target_group {
            if let Some(group) = plan.group(group_id) {
                let members = plan.member_count(group_id);
                if members > group.capacity {
                    warn!(
                        group_id = %group_id,
                        members = members,
                        capacity = group.capacity,
                        "Manual move exceeds group capacity"
                    );
                }
            }
        }

        self.evaluate(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group::Group;
    use crate::models::participant::Participant;
    use crate::models::placement::Placement;
    use crate::models::time_window::MeetingDay;
    use assert_matches::assert_matches;

    fn friday(start: &str, end: &str) -> TimeWindow {
        let svc = TimeWindowService::new();
        svc.build_window(
            MeetingDay::Friday,
            svc.parse_clock_time(start).unwrap(),
            svc.parse_clock_time(end).unwrap(),
            0.0,
            None,
        )
        .unwrap()
    }

    fn plan_with_two_members() -> (Plan, Uuid) {
        let mut plan = Plan::new("Evaluation test", 4);
        let group = Group::new("Group 1", 4);
        let group_id = group.id;
        plan.groups.push(group);

        let alice = Participant::new("Alice", 0.0)
            .with_country("Portugal")
            .with_availability(vec![friday("08:00:00", "12:00:00")]);
        let bob = Participant::new("Bob", 0.0)
            .with_country("portugal ")
            .with_availability(vec![friday("10:00:00", "14:00:00")]);

        for participant in [alice, bob] {
            let mut placement = Placement::from_participant(participant);
            placement.group_id = Some(group_id);
            plan.add_placement(placement);
        }
        (plan, group_id)
    }

    #[test]
    fn test_evaluate_intersects_member_availability() {
        let (mut plan, group_id) = plan_with_two_members();
        let evaluator = PlanEvaluator::new(TimeWindowService::new());
        evaluator.evaluate(&mut plan).unwrap();

        let group = plan.group(group_id).unwrap();
        assert_eq!(group.combined_windows.len(), 1);
        assert!((group.combined_windows[0].duration_hours() - 2.0).abs() < f64::EPSILON);
        // Case-insensitive, trimmed country matching
        assert_eq!(group.distinct_countries, 1);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let (mut plan, group_id) = plan_with_two_members();
        let evaluator = PlanEvaluator::new(TimeWindowService::new());
        evaluator.evaluate(&mut plan).unwrap();
        let first = plan.group(group_id).unwrap().combined_windows.clone();
        evaluator.evaluate(&mut plan).unwrap();
        let second = plan.group(group_id).unwrap().combined_windows.clone();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
        }
    }

    #[test]
    fn test_move_to_waitlist_reevaluates() {
        let (mut plan, group_id) = plan_with_two_members();
        let evaluator = PlanEvaluator::new(TimeWindowService::new());
        evaluator.evaluate(&mut plan).unwrap();

        let placement_id = plan.placements[1].id;
        evaluator
            .move_placement(&mut plan, placement_id, None)
            .unwrap();

        assert_eq!(plan.waitlisted().len(), 1);
        let group = plan.group(group_id).unwrap();
        // Sole remaining member's availability verbatim
        assert_eq!(group.combined_windows.len(), 1);
        assert!((group.combined_windows[0].duration_hours() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_to_unknown_group_fails() {
        let (mut plan, _) = plan_with_two_members();
        let evaluator = PlanEvaluator::new(TimeWindowService::new());
        let placement_id = plan.placements[0].id;
        assert_matches!(
            evaluator.move_placement(&mut plan, placement_id, Some(Uuid::new_v4())),
            Err(CohortMatchError::GroupNotFound { .. })
        );
    }

    #[test]
    fn test_move_unknown_placement_fails() {
        let (mut plan, group_id) = plan_with_two_members();
        let evaluator = PlanEvaluator::new(TimeWindowService::new());
        assert_matches!(
            evaluator.move_placement(&mut plan, Uuid::new_v4(), Some(group_id)),
            Err(CohortMatchError::PlacementNotFound { .. })
        );
    }
}
