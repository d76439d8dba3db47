//! Configuration validation module
//!
//! This module provides validation functions for configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::services::time_window::TimeWindowService;
use crate::utils::errors::{CohortMatchError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_scheduling_config(&settings.scheduling)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate scheduling configuration
fn validate_scheduling_config(config: &super::SchedulingConfig) -> Result<()> {
    if config.default_group_capacity == 0 {
        return Err(CohortMatchError::Config(
            "Default group capacity must be greater than 0".to_string(),
        ));
    }

    let time_windows = TimeWindowService::new();
    let day_start = time_windows
        .parse_clock_time(&config.day_start)
        .map_err(|_| {
            CohortMatchError::Config(format!("Invalid day start time: {}", config.day_start))
        })?;
    let day_end = time_windows.parse_clock_time(&config.day_end).map_err(|_| {
        CohortMatchError::Config(format!("Invalid day end time: {}", config.day_end))
    })?;

    if day_start >= day_end {
        return Err(CohortMatchError::Config(
            "Day start time must be before day end time".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CohortMatchError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CohortMatchError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
