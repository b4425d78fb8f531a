//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// File name of the engine settings inside a configuration directory.
pub const ENGINE_CONFIG_FILE: &str = "engine.yaml";

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Premium rates, thresholds, night windows, rest days
/// └── snapshot.yaml  # Optional reference data for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Standard hours: {}", loader.config().standard_monthly_hours);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` is missing, is not valid YAML, or
    /// holds values the engine cannot use.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let engine_path = path.as_ref().join(ENGINE_CONFIG_FILE);
        let config = load_yaml::<EngineConfig>(&engine_path)?;
        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

/// Loads and parses a YAML file.
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

fn validate(config: &EngineConfig) -> EngineResult<()> {
    if config.standard_monthly_hours <= Decimal::ZERO {
        return Err(invalid("standard_monthly_hours", "must be greater than zero"));
    }

    let premiums = [
        ("premiums.overtime", config.premiums.overtime),
        ("premiums.holiday_work", config.premiums.holiday_work),
        ("premiums.night_work", config.premiums.night_work),
        (
            "holiday_work.minimum_daily_hours",
            config.holiday_work.minimum_daily_hours,
        ),
    ];
    for (field, value) in premiums {
        if value < Decimal::ZERO {
            return Err(invalid(field, "must not be negative"));
        }
    }

    if config.special_holiday.averaging_days <= 0 {
        return Err(invalid(
            "special_holiday.averaging_days",
            "must be greater than zero",
        ));
    }
    if config.special_holiday.compensation_percent < 0 {
        return Err(invalid(
            "special_holiday.compensation_percent",
            "must not be negative",
        ));
    }

    let windows = &config.night_windows;
    if windows.early_clock_in_cutoff > windows.early_window_end {
        return Err(invalid(
            "night_windows.early_clock_in_cutoff",
            "must not be after early_window_end",
        ));
    }
    if windows.late_window_start > windows.late_clock_out_cutoff {
        return Err(invalid(
            "night_windows.late_window_start",
            "must not be after late_clock_out_cutoff",
        ));
    }

    // 2000 is a leap year, so 02/29 is accepted.
    for month_day in &config.rest_days.year_end_window {
        if NaiveDate::from_ymd_opt(2000, month_day.month, month_day.day).is_none() {
            return Err(invalid(
                "rest_days.year_end_window",
                format!("{:02}/{:02} is not a calendar day", month_day.month, month_day.day),
            ));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
