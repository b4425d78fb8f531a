//! Rest-day work rule.
//!
//! Hours worked on rest days earn a premium on top of ordinary pay. Only
//! days whose bucketed hours reach the configured minimum qualify, and the
//! same filtered sum drives both the hour count and the salary.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{AttendanceRecord, AuditStep};

use super::{BasePay, RestDayCalendar, premium_amount, truncate_to_i64, worked_hours};

/// The result of the rest-day work rule.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayWorkResult {
    /// Filtered sum of bucketed rest-day hours.
    pub qualifying_hours: Decimal,
    /// Number of rest days that met the minimum.
    pub qualifying_days: usize,
    /// Rest days with recorded work below the minimum.
    pub excluded_days: usize,
    /// Whole rest-day work hours.
    pub holiday_work_hours: i64,
    /// Rest-day work pay.
    pub holiday_work_salary: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Calculates rest-day work hours and salary.
pub fn calculate_holiday_work(
    attendance: &[AttendanceRecord],
    calendar: &RestDayCalendar,
    base_pay: &BasePay,
    config: &EngineConfig,
    step_number: u32,
) -> HolidayWorkResult {
    let minimum = config.holiday_work.minimum_daily_hours;

    let rest_day_hours: Vec<Decimal> = attendance
        .iter()
        .filter(|r| calendar.is_rest_day(r.date))
        .filter_map(worked_hours)
        .collect();
    let (qualifying, excluded): (Vec<Decimal>, Vec<Decimal>) =
        rest_day_hours.into_iter().partition(|h| *h >= minimum);

    let qualifying_hours: Decimal = qualifying.iter().copied().sum();
    let holiday_work_hours = truncate_to_i64(qualifying_hours);
    let holiday_work_salary = premium_amount(
        base_pay.total(),
        config.standard_monthly_hours,
        config.premiums.holiday_work,
        qualifying_hours,
    );

    HolidayWorkResult {
        qualifying_hours,
        qualifying_days: qualifying.len(),
        excluded_days: excluded.len(),
        holiday_work_hours,
        holiday_work_salary,
        audit_step: AuditStep {
            step_number,
            rule_id: "holiday_work".to_string(),
            rule_name: "Rest-Day Work".to_string(),
            input: serde_json::json!({
                "rest_days_worked": qualifying.len() + excluded.len(),
                "minimum_daily_hours": minimum.to_string(),
                "base_pay": base_pay.total(),
                "multiplier": config.premiums.holiday_work.to_string()
            }),
            output: serde_json::json!({
                "qualifying_days": qualifying.len(),
                "excluded_days": excluded.len(),
                "qualifying_hours": qualifying_hours.to_string(),
                "holiday_work_hours": holiday_work_hours,
                "holiday_work_salary": holiday_work_salary
            }),
            reasoning: format!(
                "{} rest days reached {} hours for {} hours in total ({} excluded)",
                qualifying.len(),
                minimum,
                qualifying_hours,
                excluded.len()
            ),
        },
    }
}
