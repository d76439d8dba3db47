//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for hosts embedding the cohortmatch core.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "cohortmatch.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log the outcome of an assignment pass with structured data
pub fn log_assignment_outcome(
    plan_id: uuid::Uuid,
    placed: usize,
    waitlisted: usize,
    total_overlap_hours: f64,
) {
    if waitlisted > 0 {
        warn!(
            plan_id = %plan_id,
            placed = placed,
            waitlisted = waitlisted,
            total_overlap_hours = total_overlap_hours,
            "Assignment left participants waitlisted"
        );
    } else {
        info!(
            plan_id = %plan_id,
            placed = placed,
            total_overlap_hours = total_overlap_hours,
            "Assignment placed full roster"
        );
    }
}

/// Log a manual placement move
pub fn log_placement_move(
    placement_id: uuid::Uuid,
    from_group: Option<uuid::Uuid>,
    to_group: Option<uuid::Uuid>,
) {
    info!(
        placement_id = %placement_id,
        from_group = ?from_group,
        to_group = ?to_group,
        "Placement moved by operator"
    );
}

/// Log a group evaluation result
pub fn log_group_evaluation(
    group_id: uuid::Uuid,
    members: usize,
    combined_windows: usize,
    distinct_countries: usize,
) {
    debug!(
        group_id = %group_id,
        members = members,
        combined_windows = combined_windows,
        distinct_countries = distinct_countries,
        "Group evaluation recorded"
    );
}
