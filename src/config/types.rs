//! Configuration types for the salary calculation engine.
//!
//! These structures are deserialized from `engine.yaml`. Every field has a
//! built-in default so a partial file only overrides what it names.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Premium multipliers applied to the hourly base-pay rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumRates {
    /// Multiplier for hours beyond the standard monthly hours.
    pub overtime: Decimal,
    /// Multiplier for qualifying rest-day hours.
    pub holiday_work: Decimal,
    /// Multiplier for night-window hours.
    pub night_work: Decimal,
}

impl Default for PremiumRates {
    fn default() -> Self {
        Self {
            overtime: Decimal::new(125, 2),
            holiday_work: Decimal::new(1, 1),
            night_work: Decimal::new(25, 2),
        }
    }
}

/// Rest-day work settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayWorkConfig {
    /// A rest day counts only when its bucketed hours reach this minimum.
    pub minimum_daily_hours: Decimal,
}

impl Default for HolidayWorkConfig {
    fn default() -> Self {
        Self {
            minimum_daily_hours: Decimal::new(20, 1),
        }
    }
}

/// Boundaries of the early-morning and late-evening night windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightWindowConfig {
    /// Clock-in at or before this time earns early-morning minutes.
    pub early_clock_in_cutoff: NaiveTime,
    /// End of the early-morning window.
    pub early_window_end: NaiveTime,
    /// Start of the late-evening window.
    pub late_window_start: NaiveTime,
    /// Clock-out at or after this time earns late-evening minutes.
    pub late_clock_out_cutoff: NaiveTime,
}

impl Default for NightWindowConfig {
    fn default() -> Self {
        Self {
            early_clock_in_cutoff: NaiveTime::from_hms_opt(4, 30, 0).unwrap_or_default(),
            early_window_end: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
            late_window_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            late_clock_out_cutoff: NaiveTime::from_hms_opt(22, 30, 0).unwrap_or_default(),
        }
    }
}

/// Company-ordered closure compensation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialHolidayConfig {
    /// The special-holiday type that marks a company-ordered closure.
    pub closure_category: String,
    /// Divisor turning monthly gross into an average daily amount.
    pub averaging_days: i64,
    /// Share of the average daily amount paid per closure day, in percent.
    pub compensation_percent: i64,
}

impl Default for SpecialHolidayConfig {
    fn default() -> Self {
        Self {
            closure_category: "臨時休業".to_string(),
            averaging_days: 21,
            compensation_percent: 60,
        }
    }
}

/// A month/day pair, independent of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
}

impl MonthDay {
    /// Creates a month/day pair.
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Returns true if `date` falls on this month/day.
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Rest-day classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestDayConfig {
    /// Dates treated as rest days every year.
    pub year_end_window: Vec<MonthDay>,
}

impl Default for RestDayConfig {
    fn default() -> Self {
        Self {
            year_end_window: vec![
                MonthDay::new(12, 29),
                MonthDay::new(12, 30),
                MonthDay::new(12, 31),
                MonthDay::new(1, 1),
                MonthDay::new(1, 2),
                MonthDay::new(1, 3),
                MonthDay::new(1, 4),
            ],
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use salary_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.standard_monthly_hours, Decimal::new(1575, 1));
/// assert_eq!(config.special_holiday.averaging_days, 21);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Contracted monthly hours; the premium-rate denominator.
    pub standard_monthly_hours: Decimal,
    /// Premium multipliers.
    pub premiums: PremiumRates,
    /// Rest-day work settings.
    pub holiday_work: HolidayWorkConfig,
    /// Night window boundaries.
    pub night_windows: NightWindowConfig,
    /// Closure compensation settings.
    pub special_holiday: SpecialHolidayConfig,
    /// Rest-day classification settings.
    pub rest_days: RestDayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standard_monthly_hours: Decimal::new(1575, 1),
            premiums: PremiumRates::default(),
            holiday_work: HolidayWorkConfig::default(),
            night_windows: NightWindowConfig::default(),
            special_holiday: SpecialHolidayConfig::default(),
            rest_days: RestDayConfig::default(),
        }
    }
}
