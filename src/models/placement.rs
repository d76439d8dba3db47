//! Placement model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::participant::Participant;

/// Associates one participant with at most one group within a plan.
///
/// `group_id` is the single source of truth for membership: a placement with
/// `group_id == None` is waitlisted. Assignment moves a placement by swapping
/// this one field, so membership changes are atomic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub id: Uuid,
    pub participant: Participant,
    pub group_id: Option<Uuid>,
    pub is_anchor: bool,
    pub is_priority: bool,
}

impl Placement {
    /// Create an unassigned placement, copying the anchor flag from the
    /// participant at placement time.
    pub fn from_participant(participant: Participant) -> Self {
        let is_anchor = participant.is_anchor;
        Self {
            id: Uuid::new_v4(),
            participant,
            group_id: None,
            is_anchor,
            is_priority: false,
        }
    }

    /// Mark the placement as priority.
    pub fn with_priority(mut self) -> Self {
        self.is_priority = true;
        self
    }

    /// Whether the placement currently has no group.
    pub fn is_waitlisted(&self) -> bool {
        self.group_id.is_none()
    }
}
