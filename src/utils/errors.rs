//! Error handling for cohortmatch
//!
//! This module defines the main error types used throughout the library
//! and provides a unified error handling strategy.
//!
//! The core raises errors only for invariant violations and bad input at the
//! construction boundary. "Non-ideal" scheduling outcomes (a participant no
//! group can host, an unknown availability label) are represented in return
//! values, never as errors.

use thiserror::Error;

/// Main error type for cohortmatch operations
#[derive(Error, Debug)]
pub enum CohortMatchError {
    #[error("Invalid clock time '{0}': expected HH:MM:SS")]
    InvalidClockTime(String),

    #[error("Invalid day offset {0}: expected 0 (Friday), 1 (Saturday) or 2 (Sunday)")]
    InvalidDayOffset(i64),

    #[error("Time window order violation: start {start} is not before end {end}")]
    WindowOrderViolation {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    #[error("Unrecognized boundary ordering between windows {window_a} and {window_b}")]
    UnrecognizedBoundaryOrdering {
        window_a: uuid::Uuid,
        window_b: uuid::Uuid,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: uuid::Uuid },

    #[error("Placement not found: {placement_id}")]
    PlacementNotFound { placement_id: uuid::Uuid },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for cohortmatch operations
pub type Result<T> = std::result::Result<T, CohortMatchError>;

impl CohortMatchError {
    /// Check if the error signals a broken core invariant (upstream data
    /// corruption) as opposed to rejectable input or a bad lookup.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            CohortMatchError::WindowOrderViolation { .. }
                | CohortMatchError::UnrecognizedBoundaryOrdering { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CohortMatchError::WindowOrderViolation { .. } => ErrorSeverity::Critical,
            CohortMatchError::UnrecognizedBoundaryOrdering { .. } => ErrorSeverity::Critical,
            CohortMatchError::Config(_) => ErrorSeverity::Critical,
            CohortMatchError::ConfigLoad(_) => ErrorSeverity::Critical,
            CohortMatchError::InvalidClockTime(_) => ErrorSeverity::Warning,
            CohortMatchError::InvalidDayOffset(_) => ErrorSeverity::Warning,
            CohortMatchError::GroupNotFound { .. } => ErrorSeverity::Warning,
            CohortMatchError::PlacementNotFound { .. } => ErrorSeverity::Warning,
            CohortMatchError::Serialization(_) => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
