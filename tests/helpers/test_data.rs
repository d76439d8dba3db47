//! Test data helpers for creating test objects
//!
//! This module provides helper functions for building participants, rosters
//! and plans with known availability shapes.

use cohortmatch::models::AvailabilitySelection;
use cohortmatch::{
    MeetingDay, Participant, Placement, Plan, TimeWindow, TimeWindowService,
};

/// Build a normalized window on a given day from clock-time strings at the
/// given UTC offset.
pub fn window_at(
    day: MeetingDay,
    start: &str,
    end: &str,
    utc_offset_hours: f64,
) -> TimeWindow {
    let service = TimeWindowService::new();
    service
        .build_window(
            day,
            service.parse_clock_time(start).expect("valid start time"),
            service.parse_clock_time(end).expect("valid end time"),
            utc_offset_hours,
            None,
        )
        .expect("valid window")
}

/// Build a Friday window at UTC offset 0.
pub fn friday_window(start: &str, end: &str) -> TimeWindow {
    window_at(MeetingDay::Friday, start, end, 0.0)
}

/// Build a participant with explicit availability windows.
pub fn participant_with_windows(
    name: &str,
    country: &str,
    utc_offset_hours: f64,
    windows: Vec<TimeWindow>,
) -> Participant {
    Participant::new(name, utc_offset_hours)
        .with_country(country)
        .with_availability(windows)
}

/// Build a structured slot selection from clock-time strings.
pub fn slot_selection(day: MeetingDay, start: &str, end: &str) -> AvailabilitySelection {
    let service = TimeWindowService::new();
    AvailabilitySelection::Slot {
        day,
        start_time: service.parse_clock_time(start).expect("valid start time"),
        end_time: service.parse_clock_time(end).expect("valid end time"),
    }
}

/// Build a plan whose roster is the given participants, all unassigned.
pub fn plan_with_roster(name: &str, group_capacity: usize, roster: Vec<Participant>) -> Plan {
    let mut plan = Plan::new(name, group_capacity);
    for participant in roster {
        plan.add_placement(Placement::from_participant(participant));
    }
    plan
}
