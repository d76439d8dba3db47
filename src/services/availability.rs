//! Availability projection service
//!
//! Converts a participant's raw selections (free-text preference labels or
//! already-structured day/start/end triples) into timezone-normalized
//! [`TimeWindow`]s on the reference week.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::participant::AvailabilitySelection;
use crate::models::time_window::{MeetingDay, TimeWindow};
use crate::services::time_window::TimeWindowService;
use crate::utils::errors::Result;

/// Label fragment that expands to every canonical slot.
const CATCH_ALL_LABEL: &str = "all options work for me";

/// The nine canonical preference labels (three day-periods across the three
/// meeting days) and their local clock ranges.
const CANONICAL_SLOTS: [(&str, MeetingDay, &str, &str); 9] = [
    ("friday morning (7am-12pm)", MeetingDay::Friday, "07:00:00", "12:00:00"),
    ("friday afternoon (12pm-5pm)", MeetingDay::Friday, "12:00:00", "17:00:00"),
    ("friday evening (5pm-10pm)", MeetingDay::Friday, "17:00:00", "22:00:00"),
    ("saturday morning (7am-12pm)", MeetingDay::Saturday, "07:00:00", "12:00:00"),
    ("saturday afternoon (12pm-5pm)", MeetingDay::Saturday, "12:00:00", "17:00:00"),
    ("saturday evening (5pm-10pm)", MeetingDay::Saturday, "17:00:00", "22:00:00"),
    ("sunday morning (7am-12pm)", MeetingDay::Sunday, "07:00:00", "12:00:00"),
    ("sunday afternoon (12pm-5pm)", MeetingDay::Sunday, "12:00:00", "17:00:00"),
    ("sunday evening (5pm-10pm)", MeetingDay::Sunday, "17:00:00", "22:00:00"),
];

/// Availability projection service.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityService {
    time_windows: TimeWindowService,
}

impl AvailabilityService {
    /// Create a new AvailabilityService instance
    pub fn new(time_windows: TimeWindowService) -> Self {
        Self { time_windows }
    }

    /// Project raw selections into normalized windows using the
    /// participant's UTC offset.
    ///
    /// Unrecognized labels produce no window; they are a data-quality
    /// boundary, not an error condition, and are logged at `warn` level.
    pub fn project_selections(
        &self,
        selections: &[AvailabilitySelection],
        utc_offset_hours: f64,
        participant_id: Uuid,
    ) -> Result<Vec<TimeWindow>> {
        let mut windows = Vec::new();
        for selection in selections {
            match selection {
                AvailabilitySelection::Label(label) => {
                    for (day, start, end) in self.expand_label(label) {
                        windows.push(self.slot_window(
                            day,
                            start,
                            end,
                            utc_offset_hours,
                            participant_id,
                        )?);
                    }
                }
                AvailabilitySelection::Slot {
                    day,
                    start_time,
                    end_time,
                } => {
                    windows.push(self.time_windows.build_window(
                        *day,
                        *start_time,
                        *end_time,
                        utc_offset_hours,
                        Some(participant_id),
                    )?);
                }
            }
        }
        debug!(
            participant_id = %participant_id,
            selections = selections.len(),
            windows = windows.len(),
            "Projected availability selections"
        );
        Ok(windows)
    }

    /// Expand a preference label into `{day, start, end}` triples.
    ///
    /// The catch-all label expands to all nine canonical slots; unknown
    /// labels expand to nothing. Unicode dashes are folded to ASCII hyphens
    /// first, since exported form data mixes the two.
    fn expand_label(&self, label: &str) -> Vec<(MeetingDay, &'static str, &'static str)> {
        let normalized = label.trim().to_lowercase().replace(['\u{2013}', '\u{2014}'], "-");
        if normalized.contains(CATCH_ALL_LABEL) {
            return CANONICAL_SLOTS
                .iter()
                .map(|(_, day, start, end)| (*day, *start, *end))
                .collect();
        }
        for (canonical, day, start, end) in CANONICAL_SLOTS {
            if normalized == canonical {
                return vec![(day, start, end)];
            }
        }
        warn!(label = %label, "Unrecognized availability label, dropping");
        Vec::new()
    }

    fn slot_window(
        &self,
        day: MeetingDay,
        start: &str,
        end: &str,
        utc_offset_hours: f64,
        participant_id: Uuid,
    ) -> Result<TimeWindow> {
        let start_time = self.time_windows.parse_clock_time(start)?;
        let end_time = self.time_windows.parse_clock_time(end)?;
        self.time_windows.build_window(
            day,
            start_time,
            end_time,
            utc_offset_hours,
            Some(participant_id),
        )
    }
}
