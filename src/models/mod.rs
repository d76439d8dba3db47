//! Data models module
//!
//! This module contains all data structures used throughout the library

pub mod group;
pub mod participant;
pub mod placement;
pub mod plan;
pub mod time_window;

// Re-export commonly used models
pub use group::Group;
pub use participant::{AvailabilitySelection, Participant};
pub use placement::Placement;
pub use plan::Plan;
pub use time_window::{MeetingDay, TimeWindow};
