//! Plan model
//!
//! The aggregate root for one cohort-matching exercise: a named collection
//! of groups and placements plus the group-size capacity setting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::Group;
use super::placement::Placement;

/// A named cohort-matching plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub group_capacity: usize,
    pub groups: Vec<Group>,
    pub placements: Vec<Placement>,
}

impl Plan {
    /// Create a new empty plan.
    pub fn new(name: impl Into<String>, group_capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group_capacity,
            groups: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Add an unassigned placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Look up a group by id.
    pub fn group(&self, group_id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Current members of a group (derived view over placements).
    pub fn members_of(&self, group_id: Uuid) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .collect()
    }

    /// Current member count of a group.
    pub fn member_count(&self, group_id: Uuid) -> usize {
        self.placements
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .count()
    }

    /// Placements with no assigned group.
    pub fn waitlisted(&self) -> Vec<&Placement> {
        self.placements.iter().filter(|p| p.is_waitlisted()).collect()
    }

    /// Reset to the empty assignment state: every placement loses its group
    /// and all groups are removed.
    pub fn clear_assignments(&mut self) {
        for placement in &mut self.placements {
            placement.group_id = None;
        }
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::Participant;

    #[test]
    fn test_membership_views() {
        let mut plan = Plan::new("Test cohort", 4);
        let group = Group::new("Group 1", 4);
        let group_id = group.id;
        plan.groups.push(group);

        let mut placed = Placement::from_participant(Participant::new("Ada", 0.0));
        placed.group_id = Some(group_id);
        plan.add_placement(placed);
        plan.add_placement(Placement::from_participant(Participant::new("Grace", 1.0)));

        assert_eq!(plan.member_count(group_id), 1);
        assert_eq!(plan.members_of(group_id).len(), 1);
        assert_eq!(plan.waitlisted().len(), 1);

        plan.clear_assignments();
        assert!(plan.groups.is_empty());
        assert_eq!(plan.waitlisted().len(), 2);
    }
}
