//! Time window model
//!
//! A `TimeWindow` is a recurring weekly availability interval, normalized to
//! absolute instants on a canonical reference week so that windows from
//! different participants and timezones compare as plain timestamps.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{CohortMatchError, Result};

/// The three weekend days a discussion group can meet on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MeetingDay {
    Friday,
    Saturday,
    Sunday,
}

impl MeetingDay {
    /// Map a day offset (0 = Friday, 1 = Saturday, 2 = Sunday) to a day tag.
    pub fn from_offset(offset: i64) -> Result<Self> {
        match offset {
            0 => Ok(MeetingDay::Friday),
            1 => Ok(MeetingDay::Saturday),
            2 => Ok(MeetingDay::Sunday),
            other => Err(CohortMatchError::InvalidDayOffset(other)),
        }
    }

    /// Day offset from the reference week's Friday.
    pub fn offset(&self) -> i64 {
        match self {
            MeetingDay::Friday => 0,
            MeetingDay::Saturday => 1,
            MeetingDay::Sunday => 2,
        }
    }

    /// Human-readable day name.
    pub fn label(&self) -> &'static str {
        match self {
            MeetingDay::Friday => "Friday",
            MeetingDay::Saturday => "Saturday",
            MeetingDay::Sunday => "Sunday",
        }
    }

    /// All meeting days in week order.
    pub fn all() -> [MeetingDay; 3] {
        [MeetingDay::Friday, MeetingDay::Saturday, MeetingDay::Sunday]
    }
}

impl std::fmt::Display for MeetingDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A recurring weekly availability interval.
///
/// `start` and `end` are absolute instants on the reference week; `start`
/// strictly precedes `end` (enforced at construction). The optional source
/// fields carry the raw local clock times and the owning participant so the
/// host application can display windows in member-local time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    pub id: Uuid,
    pub day: MeetingDay,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub local_start: Option<NaiveTime>,
    pub local_end: Option<NaiveTime>,
    pub participant_id: Option<Uuid>,
}

impl TimeWindow {
    /// Create a new time window with a fresh identity.
    ///
    /// Returns [`CohortMatchError::WindowOrderViolation`] unless
    /// `start < end`.
    pub fn new(day: MeetingDay, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(CohortMatchError::WindowOrderViolation { start, end });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            day,
            start,
            end,
            local_start: None,
            local_end: None,
            participant_id: None,
        })
    }

    /// Attach the raw local clock times this window was normalized from.
    pub fn with_local_times(mut self, local_start: NaiveTime, local_end: NaiveTime) -> Self {
        self.local_start = Some(local_start);
        self.local_end = Some(local_end);
        self
    }

    /// Attach the owning participant.
    pub fn with_participant(mut self, participant_id: Uuid) -> Self {
        self.participant_id = Some(participant_id);
        self
    }

    /// Window length in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}
