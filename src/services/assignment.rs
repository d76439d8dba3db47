//! Group assignment engine
//!
//! Partitions a plan's roster into capacity-bounded groups using a
//! two-phase greedy strategy: anchor placements are processed first, then
//! everyone else, each through the same overlap-scoring step. A placement no
//! group can host with positive overlap stays waitlisted; assignment never
//! force-places, and never errors on "no fit".

use tracing::{debug, info};

use crate::config::Settings;
use crate::models::plan::Plan;
use crate::models::time_window::{MeetingDay, TimeWindow};
use crate::services::evaluator::PlanEvaluator;
use crate::services::scoring::{OverlapScore, OverlapScorer};
use crate::services::time_window::TimeWindowService;
use crate::utils::errors::{CohortMatchError, Result};

/// Outcome of one assignment pass, reported to the caller as normal output
/// (waitlisting is not an error).
#[derive(Debug, Clone)]
pub struct AssignmentSummary {
    pub groups_created: usize,
    pub placed: usize,
    pub waitlisted: usize,
    /// Sum of the final combined-window durations across all groups.
    pub total_overlap_hours: f64,
}

/// Group assignment engine.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    time_windows: TimeWindowService,
    scorer: OverlapScorer,
    evaluator: PlanEvaluator,
    settings: Settings,
}

struct Candidate {
    group_idx: usize,
    score: OverlapScore,
    member_count: usize,
}

impl AssignmentEngine {
    /// Create a new AssignmentEngine instance
    pub fn new(
        time_windows: TimeWindowService,
        scorer: OverlapScorer,
        evaluator: PlanEvaluator,
        settings: Settings,
    ) -> Self {
        Self {
            time_windows,
            scorer,
            evaluator,
            settings,
        }
    }

    /// Run a full assignment pass over the plan.
    ///
    /// Resets all placements and groups, creates
    /// `ceil(placements / capacity)` groups (or `group_count_override` when
    /// supplied) seeded with the default full-weekend window set, greedily
    /// places anchors then the rest, and finishes with an authoritative
    /// evaluation pass. Callers must treat the whole pass as one atomic
    /// unit; concurrent mutation of the same plan is undefined.
    pub fn generate(
        &self,
        plan: &mut Plan,
        group_count_override: Option<usize>,
    ) -> Result<AssignmentSummary> {
        if plan.group_capacity == 0 {
            return Err(CohortMatchError::Config(
                "Plan group capacity must be greater than 0".to_string(),
            ));
        }

        plan.clear_assignments();
        let group_count = group_count_override
            .unwrap_or_else(|| plan.placements.len().div_ceil(plan.group_capacity));
        let seed_windows = self.default_seed_windows()?;
        for n in 1..=group_count {
            plan.groups.push(
                crate::models::group::Group::new(format!("Group {n}"), plan.group_capacity)
                    .with_seed_windows(seed_windows.clone()),
            );
        }
        info!(
            plan_id = %plan.id,
            placements = plan.placements.len(),
            groups = group_count,
            capacity = plan.group_capacity,
            "Seeded plan for assignment"
        );

        // Phase 1: anchors. Phase 2: everyone else. Within each phase,
        // priority placements go first; otherwise roster order is kept.
        let mut order: Vec<usize> = (0..plan.placements.len()).collect();
        order.sort_by_key(|&idx| {
            let p = &plan.placements[idx];
            (!p.is_anchor, !p.is_priority)
        });

        let mut placed = 0;
        for idx in order {
            if self.assign_placement(plan, idx)? {
                placed += 1;
            }
        }

        // Authoritative recomputation from final membership.
        self.evaluator.evaluate(plan)?;

        let total_overlap_hours = plan
            .groups
            .iter()
            .map(|g| self.time_windows.total_duration_hours(&g.combined_windows))
            .sum();
        let summary = AssignmentSummary {
            groups_created: group_count,
            placed,
            waitlisted: plan.placements.len() - placed,
            total_overlap_hours,
        };
        crate::utils::logging::log_assignment_outcome(
            plan.id,
            summary.placed,
            summary.waitlisted,
            summary.total_overlap_hours,
        );
        Ok(summary)
    }

    /// Greedily place one placement into the best-fitting group.
    ///
    /// Groups at capacity or with zero overlap are filtered out; the rest
    /// sort by overlap duration descending, ties broken by ascending member
    /// count so emptier groups fill first. Returns `false` when the
    /// placement stays waitlisted.
    fn assign_placement(&self, plan: &mut Plan, placement_idx: usize) -> Result<bool> {
        let candidate_windows = plan.placements[placement_idx]
            .participant
            .availability
            .clone();

        let mut candidates: Vec<Candidate> = Vec::new();
        for (group_idx, group) in plan.groups.iter().enumerate() {
            let member_count = plan.member_count(group.id);
            if member_count >= group.capacity {
                continue;
            }
            let score = self.scorer.score(&group.combined_windows, &candidate_windows)?;
            if score.duration_hours <= 0.0 {
                continue;
            }
            candidates.push(Candidate {
                group_idx,
                score,
                member_count,
            });
        }
        candidates.sort_by(|a, b| {
            b.score
                .duration_hours
                .total_cmp(&a.score.duration_hours)
                .then(a.member_count.cmp(&b.member_count))
        });

        match candidates.into_iter().next() {
            Some(best) => {
                let group_id = plan.groups[best.group_idx].id;
                // New membership and the shrunken combined set are applied
                // as one atomic swap.
                plan.placements[placement_idx].group_id = Some(group_id);
                plan.groups[best.group_idx].combined_windows = best.score.intersection;
                debug!(
                    placement_id = %plan.placements[placement_idx].id,
                    group_id = %group_id,
                    overlap_hours = best.score.duration_hours,
                    "Placed participant"
                );
                Ok(true)
            }
            None => {
                debug!(
                    placement_id = %plan.placements[placement_idx].id,
                    "No group with positive overlap, waitlisting"
                );
                Ok(false)
            }
        }
    }

    /// The default availability a fresh group starts with: the full
    /// Friday-to-Sunday day range from settings, so the very first
    /// assignment has something to intersect against.
    fn default_seed_windows(&self) -> Result<Vec<TimeWindow>> {
        let start = self
            .time_windows
            .parse_clock_time(&self.settings.scheduling.day_start)?;
        let end = self
            .time_windows
            .parse_clock_time(&self.settings.scheduling.day_end)?;
        MeetingDay::all()
            .into_iter()
            .map(|day| self.time_windows.build_window(day, start, end, 0.0, None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::Participant;
    use crate::models::placement::Placement;

    fn engine() -> AssignmentEngine {
        let time_windows = TimeWindowService::new();
        AssignmentEngine::new(
            time_windows,
            OverlapScorer::new(time_windows),
            PlanEvaluator::new(time_windows),
            Settings::default(),
        )
    }

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

    fn add_participant(plan: &mut Plan, name: &str, windows: Vec<TimeWindow>) {
        plan.add_placement(Placement::from_participant(
            Participant::new(name, 0.0).with_availability(windows),
        ));
    }

    #[test]
    fn test_group_count_is_ceiling_of_roster_over_capacity() {
        let engine = engine();
        let mut plan = Plan::new("Count test", 2);
        for n in 0..5 {
            add_participant(&mut plan, &format!("P{n}"), vec![friday("08:00:00", "10:00:00")]);
        }
        let summary = engine.generate(&mut plan, None).unwrap();
        assert_eq!(summary.groups_created, 3);
        assert_eq!(plan.groups.len(), 3);
    }

    #[test]
    fn test_explicit_group_count_is_honored() {
        let engine = engine();
        let mut plan = Plan::new("Override test", 2);
        for n in 0..4 {
            add_participant(&mut plan, &format!("P{n}"), vec![friday("08:00:00", "10:00:00")]);
        }
        let summary = engine.generate(&mut plan, Some(4)).unwrap();
        assert_eq!(summary.groups_created, 4);
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let engine = engine();
        let mut plan = Plan::new("Capacity test", 2);
        for n in 0..7 {
            add_participant(&mut plan, &format!("P{n}"), vec![friday("08:00:00", "12:00:00")]);
        }
        engine.generate(&mut plan, None).unwrap();
        for group in &plan.groups {
            assert!(plan.member_count(group.id) <= group.capacity);
        }
    }

    // Concrete scenario: three staggered availabilities into 2 groups of 2.
    #[test]
    fn test_staggered_roster_totals_at_least_three_hours() {
        let engine = engine();
        let mut plan = Plan::new("Staggered test", 2);
        add_participant(&mut plan, "P1", vec![friday("08:00:00", "10:00:00")]);
        add_participant(&mut plan, "P2", vec![friday("09:00:00", "11:00:00")]);
        add_participant(&mut plan, "P3", vec![friday("10:00:00", "12:00:00")]);

        let summary = engine.generate(&mut plan, None).unwrap();
        assert_eq!(summary.waitlisted, 0);
        assert_eq!(summary.placed, 3);
        assert!(summary.total_overlap_hours >= 3.0 - 1e-9);
        // Every placed group retains positive overlap
        for group in &plan.groups {
            if plan.member_count(group.id) > 0 {
                assert!(
                    engine
                        .time_windows
                        .total_duration_hours(&group.combined_windows)
                        > 0.0
                );
            }
        }
    }

    // A candidate sharing no instant with any group is waitlisted, never
    // force-assigned.
    #[test]
    fn test_zero_overlap_participant_is_waitlisted() {
        let engine = engine();
        let mut plan = Plan::new("Waitlist test", 2);
        add_participant(&mut plan, "P1", vec![friday("08:00:00", "10:00:00")]);
        add_participant(&mut plan, "P2", vec![friday("08:00:00", "10:00:00")]);
        // Only one group; it fills with P1/P2, and P3 cannot fit anywhere.
        add_participant(&mut plan, "P3", vec![friday("14:00:00", "16:00:00")]);

        let summary = engine.generate(&mut plan, Some(1)).unwrap();
        assert_eq!(summary.placed, 2);
        assert_eq!(summary.waitlisted, 1);
        let waitlisted = plan.waitlisted();
        assert_eq!(waitlisted.len(), 1);
        assert_eq!(waitlisted[0].participant.full_name, "P3");
    }

    #[test]
    fn test_participant_without_windows_is_waitlisted() {
        let engine = engine();
        let mut plan = Plan::new("Empty availability test", 2);
        add_participant(&mut plan, "P1", vec![friday("08:00:00", "10:00:00")]);
        add_participant(&mut plan, "Empty", vec![]);

        let summary = engine.generate(&mut plan, None).unwrap();
        assert_eq!(summary.waitlisted, 1);
        assert_eq!(plan.waitlisted()[0].participant.full_name, "Empty");
    }

    #[test]
    fn test_anchors_are_processed_first() {
        let engine = engine();
        let mut plan = Plan::new("Anchor test", 1);
        // One seat total. The anchor is listed last in the roster but must
        // win the seat because its phase runs first.
        add_participant(&mut plan, "General", vec![friday("08:00:00", "10:00:00")]);
        plan.add_placement(Placement::from_participant(
            Participant::new("Anchor", 0.0)
                .as_anchor()
                .with_availability(vec![friday("08:00:00", "10:00:00")]),
        ));

        let summary = engine.generate(&mut plan, Some(1)).unwrap();
        assert_eq!(summary.placed, 1);
        let waitlisted = plan.waitlisted();
        assert_eq!(waitlisted.len(), 1);
        assert_eq!(waitlisted[0].participant.full_name, "General");
    }

    #[test]
    fn test_priority_placements_win_contested_seats() {
        let engine = engine();
        let mut plan = Plan::new("Priority test", 1);
        // One seat total, no anchors. The priority placement is listed last
        // in the roster but goes first within its phase.
        add_participant(&mut plan, "General", vec![friday("08:00:00", "10:00:00")]);
        plan.add_placement(
            Placement::from_participant(
                Participant::new("Priority", 0.0)
                    .with_availability(vec![friday("08:00:00", "10:00:00")]),
            )
            .with_priority(),
        );

        let summary = engine.generate(&mut plan, Some(1)).unwrap();
        assert_eq!(summary.placed, 1);
        let waitlisted = plan.waitlisted();
        assert_eq!(waitlisted.len(), 1);
        assert_eq!(waitlisted[0].participant.full_name, "General");
    }

    #[test]
    fn test_tie_break_prefers_emptier_group() {
        let engine = engine();
        let mut plan = Plan::new("Tie-break test", 3);
        // P1 and P2 share identical availability; with two groups the second
        // participant must go to the still-empty group rather than stack.
        add_participant(&mut plan, "P1", vec![friday("08:00:00", "10:00:00")]);
        add_participant(&mut plan, "P2", vec![friday("08:00:00", "10:00:00")]);

        engine.generate(&mut plan, Some(2)).unwrap();
        for group in &plan.groups {
            assert_eq!(plan.member_count(group.id), 1);
        }
    }

    #[test]
    fn test_regenerate_resets_previous_assignment() {
        let engine = engine();
        let mut plan = Plan::new("Reset test", 2);
        add_participant(&mut plan, "P1", vec![friday("08:00:00", "10:00:00")]);
        add_participant(&mut plan, "P2", vec![friday("08:00:00", "10:00:00")]);

        engine.generate(&mut plan, None).unwrap();
        let first_groups: Vec<_> = plan.groups.iter().map(|g| g.id).collect();
        engine.generate(&mut plan, None).unwrap();

        // Old groups are gone, every placement re-homed into the new ones
        for group_id in first_groups {
            assert!(plan.group(group_id).is_none());
        }
        assert_eq!(plan.waitlisted().len(), 0);
    }
}
