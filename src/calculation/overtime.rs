//! Monthly overtime rule.
//!
//! Overtime is measured against the standard monthly hours rather than per
//! day: bucketed hours across every recorded day are summed and the excess
//! is paid at the overtime multiplier.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::{AttendanceRecord, AuditStep};

use super::{BasePay, premium_amount, truncate_to_i64, worked_hours};

/// The result of the overtime rule.
#[derive(Debug, Clone, PartialEq)]
pub struct OvertimeResult {
    /// Sum of bucketed hours over recorded days.
    pub total_hours: Decimal,
    /// `total_hours - standard_monthly_hours`; may be negative.
    pub excess_hours: Decimal,
    /// Whole overtime hours, 0 when there is no excess.
    pub overtime_hours: i64,
    /// Overtime pay, 0 when there is no excess.
    pub overtime_salary: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Calculates overtime hours and salary for a period's attendance.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{calculate_overtime, BasePay};
/// use salary_engine::config::EngineConfig;
/// use salary_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// // 22 days of 09:00-18:30 = 209 hours, 51.5 over 157.5
/// let attendance: Vec<AttendanceRecord> = (1..=22)
///     .map(|d| AttendanceRecord::worked(
///         1,
///         NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
///     ))
///     .collect();
/// let base = BasePay { age_salary: 80_000, ability_salary: 50_000 };
///
/// let result = calculate_overtime(&attendance, &base, &EngineConfig::default(), 1);
/// assert_eq!(result.overtime_hours, 51);
/// assert_eq!(result.overtime_salary, 53_134);
/// ```
pub fn calculate_overtime(
    attendance: &[AttendanceRecord],
    base_pay: &BasePay,
    config: &EngineConfig,
    step_number: u32,
) -> OvertimeResult {
    let recorded: Vec<Decimal> = attendance.iter().filter_map(worked_hours).collect();
    let total_hours: Decimal = recorded.iter().copied().sum();
    let excess_hours = total_hours - config.standard_monthly_hours;

    let (overtime_hours, overtime_salary) = if excess_hours > Decimal::ZERO {
        (
            truncate_to_i64(excess_hours),
            premium_amount(
                base_pay.total(),
                config.standard_monthly_hours,
                config.premiums.overtime,
                excess_hours,
            ),
        )
    } else {
        (0, 0)
    };

    let reasoning = if excess_hours > Decimal::ZERO {
        format!(
            "{} hours over {} recorded days exceed {} by {}; paid at {}x of base pay {}",
            total_hours,
            recorded.len(),
            config.standard_monthly_hours,
            excess_hours,
            config.premiums.overtime,
            base_pay.total()
        )
    } else {
        format!(
            "{} hours over {} recorded days within standard {}; no overtime",
            total_hours,
            recorded.len(),
            config.standard_monthly_hours
        )
    };

    OvertimeResult {
        total_hours,
        excess_hours,
        overtime_hours,
        overtime_salary,
        audit_step: AuditStep {
            step_number,
            rule_id: "overtime".to_string(),
            rule_name: "Monthly Overtime".to_string(),
            input: serde_json::json!({
                "recorded_days": recorded.len(),
                "total_hours": total_hours.to_string(),
                "standard_monthly_hours": config.standard_monthly_hours.to_string(),
                "base_pay": base_pay.total(),
                "multiplier": config.premiums.overtime.to_string()
            }),
            output: serde_json::json!({
                "excess_hours": excess_hours.to_string(),
                "overtime_hours": overtime_hours,
                "overtime_salary": overtime_salary
            }),
            reasoning,
        },
    }
}
