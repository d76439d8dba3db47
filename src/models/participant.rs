//! Participant model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_window::{MeetingDay, TimeWindow};

/// A cohort participant with timezone-normalized weekly availability.
///
/// `utc_offset_hours` is the participant's offset from UTC (fractional for
/// half-hour timezones, e.g. +5.5). The offset is resolved externally before
/// the participant enters the core; no timezone lookup happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub country: Option<String>,
    pub utc_offset_hours: f64,
    pub is_anchor: bool,
    pub availability: Vec<TimeWindow>,
}

impl Participant {
    /// Create a new participant with no availability.
    pub fn new(full_name: impl Into<String>, utc_offset_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: None,
            country: None,
            utc_offset_hours,
            is_anchor: false,
            availability: Vec::new(),
        }
    }

    /// Set the participant's country (used only for diversity scoring).
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the participant's contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Flag the participant as an anchor (processed first during assignment).
    pub fn as_anchor(mut self) -> Self {
        self.is_anchor = true;
        self
    }

    /// Replace the participant's availability windows.
    pub fn with_availability(mut self, availability: Vec<TimeWindow>) -> Self {
        self.availability = availability;
        self
    }
}

/// A raw availability entry as collected from a participant, before
/// normalization into [`TimeWindow`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AvailabilitySelection {
    /// A free-text preference label, e.g. "Friday morning (7am-12pm)".
    /// Unrecognized labels are dropped at projection time.
    Label(String),
    /// An already-structured day/start/end triple in local clock time.
    Slot {
        day: MeetingDay,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain_sets_optional_fields() {
        let participant = Participant::new("Ada", 5.5)
            .with_country("India")
            .with_email("ada@example.org")
            .as_anchor();
        assert_eq!(participant.email.as_deref(), Some("ada@example.org"));
        assert_eq!(participant.country.as_deref(), Some("India"));
        assert!(participant.is_anchor);
        assert!(participant.availability.is_empty());
    }
}
