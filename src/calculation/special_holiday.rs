//! Company-ordered closure compensation.
//!
//! Closure days are paid at a percentage of an average daily gross, where
//! the average is the month's gross (every pay component except the
//! closure compensation itself and the deduction) divided by a fixed number
//! of days. Both divisions truncate.

use crate::config::SpecialHolidayConfig;
use crate::models::{AttendanceRecord, AuditStep, SalaryComponent, SalaryResult};

/// The components that make up the monthly gross used for averaging.
pub const GROSS_COMPONENTS: [SalaryComponent; 10] = [
    SalaryComponent::AgeSalary,
    SalaryComponent::AbilitySalary,
    SalaryComponent::JobTitleSalary,
    SalaryComponent::SpecialWorkSalary,
    SalaryComponent::ControlSalary,
    SalaryComponent::CommuteSalary,
    SalaryComponent::BusinessTripSalary,
    SalaryComponent::OvertimeSalary,
    SalaryComponent::HolidayWorkSalary,
    SalaryComponent::NightWorkSalary,
];

/// Counts attendance records marked with the closure category.
///
/// Clock times are not consulted.
pub fn count_closure_days(attendance: &[AttendanceRecord], closure_category: &str) -> i64 {
    attendance
        .iter()
        .filter(|r| r.special_holiday_type.as_deref() == Some(closure_category))
        .count() as i64
}

/// The result of the closure compensation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialHolidayResult {
    /// Number of closure days in the period.
    pub special_holiday_days: i64,
    /// Sum of the gross components.
    pub monthly_gross: i64,
    /// `monthly_gross / averaging_days`, truncated.
    pub average_daily_gross: i64,
    /// Closure compensation.
    pub special_holiday_salary: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Calculates closure days and compensation.
///
/// `partial` must already hold every component in [`GROSS_COMPONENTS`].
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_special_holiday;
/// use salary_engine::config::SpecialHolidayConfig;
/// use salary_engine::models::{AttendanceRecord, SalaryComponent, SalaryResult};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let mut partial = SalaryResult::new(1, start);
/// partial.set(SalaryComponent::AgeSalary, 80_000);
/// partial.set(SalaryComponent::AbilitySalary, 50_000);
///
/// let config = SpecialHolidayConfig::default();
/// let closure = AttendanceRecord {
///     special_holiday_type: Some(config.closure_category.clone()),
///     ..AttendanceRecord::unrecorded(1, start)
/// };
///
/// let result = calculate_special_holiday(&[closure], &partial, &config, 1);
/// // 130000 / 21 = 6190; 1 * 6190 * 60 / 100 = 3714
/// assert_eq!(result.average_daily_gross, 6_190);
/// assert_eq!(result.special_holiday_salary, 3_714);
/// ```
pub fn calculate_special_holiday(
    attendance: &[AttendanceRecord],
    partial: &SalaryResult,
    config: &SpecialHolidayConfig,
    step_number: u32,
) -> SpecialHolidayResult {
    let special_holiday_days = count_closure_days(attendance, &config.closure_category);
    let monthly_gross = partial.sum_of(&GROSS_COMPONENTS);
    let average_daily_gross = if config.averaging_days > 0 {
        monthly_gross / config.averaging_days
    } else {
        0
    };
    let special_holiday_salary = special_holiday_days
        .saturating_mul(average_daily_gross)
        .saturating_mul(config.compensation_percent)
        / 100;

    SpecialHolidayResult {
        special_holiday_days,
        monthly_gross,
        average_daily_gross,
        special_holiday_salary,
        audit_step: AuditStep {
            step_number,
            rule_id: "special_holiday".to_string(),
            rule_name: "Closure Compensation".to_string(),
            input: serde_json::json!({
                "closure_category": config.closure_category,
                "monthly_gross": monthly_gross,
                "averaging_days": config.averaging_days,
                "compensation_percent": config.compensation_percent
            }),
            output: serde_json::json!({
                "special_holiday_days": special_holiday_days,
                "average_daily_gross": average_daily_gross,
                "special_holiday_salary": special_holiday_salary
            }),
            reasoning: format!(
                "{} closure days at {}% of average daily gross {} ({} / {})",
                special_holiday_days,
                config.compensation_percent,
                average_daily_gross,
                monthly_gross,
                config.averaging_days
            ),
        },
    }
}
