//! Persisted salary result rows.
//!
//! A [`SalaryResult`] is keyed by `(employee_id, period_start)` and holds one
//! integer per [`SalaryComponent`]. The component list is explicit and
//! versioned by [`RESULT_SCHEMA_VERSION`]; the engine never discovers fields
//! from the store's schema.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Version of the component list in [`SalaryComponent::ALL`].
pub const RESULT_SCHEMA_VERSION: u32 = 1;

/// What a component value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentUnit {
    /// Whole currency units.
    Currency,
    /// Whole hours.
    Hours,
    /// Whole days.
    Days,
}

/// A named field of a salary result row.
///
/// # Example
///
/// ```
/// use salary_engine::models::{ComponentUnit, SalaryComponent};
///
/// assert_eq!(SalaryComponent::OvertimeSalary.as_str(), "overtime_salary");
/// assert_eq!(SalaryComponent::OvertimeHours.unit(), ComponentUnit::Hours);
/// assert_eq!(SalaryComponent::ALL.len(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComponent {
    /// Salary looked up by age.
    AgeSalary,
    /// Salary looked up by ability grade.
    AbilitySalary,
    /// Allowance looked up by job-title grade.
    JobTitleSalary,
    /// Allowance looked up by special-work grade.
    SpecialWorkSalary,
    /// Sum of control allowances starting in the period.
    ControlSalary,
    /// Sum of commute allowances starting in the period.
    CommuteSalary,
    /// Per-day business trip premiums.
    BusinessTripSalary,
    /// Premium for hours beyond the standard monthly hours.
    OvertimeSalary,
    /// Premium for work on rest days.
    HolidayWorkSalary,
    /// Premium for work in the night windows.
    NightWorkSalary,
    /// Compensation for company-ordered closure days.
    SpecialHolidaySalary,
    /// Deductions. Business policy undefined; always 0.
    Deduction,
    /// Overtime hours, truncated.
    OvertimeHours,
    /// Qualifying rest-day hours, truncated.
    HolidayWorkHours,
    /// Night-window hours, truncated.
    NightWorkHours,
    /// Number of company-ordered closure days.
    SpecialHolidayDays,
    /// Non-working time. Business policy undefined; always 0.
    NonWorkingTime,
    /// Paid holiday days. Business policy undefined; always 0.
    PaidHolidayDays,
}

impl SalaryComponent {
    /// Every component, in result-row order.
    pub const ALL: [SalaryComponent; 18] = [
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
        SalaryComponent::SpecialHolidaySalary,
        SalaryComponent::Deduction,
        SalaryComponent::OvertimeHours,
        SalaryComponent::HolidayWorkHours,
        SalaryComponent::NightWorkHours,
        SalaryComponent::SpecialHolidayDays,
        SalaryComponent::NonWorkingTime,
        SalaryComponent::PaidHolidayDays,
    ];

    /// The field name used in persisted rows and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryComponent::AgeSalary => "age_salary",
            SalaryComponent::AbilitySalary => "ability_salary",
            SalaryComponent::JobTitleSalary => "job_title_salary",
            SalaryComponent::SpecialWorkSalary => "special_work_salary",
            SalaryComponent::ControlSalary => "control_salary",
            SalaryComponent::CommuteSalary => "commute_salary",
            SalaryComponent::BusinessTripSalary => "business_trip_salary",
            SalaryComponent::OvertimeSalary => "overtime_salary",
            SalaryComponent::HolidayWorkSalary => "holiday_work_salary",
            SalaryComponent::NightWorkSalary => "night_work_salary",
            SalaryComponent::SpecialHolidaySalary => "special_holiday_salary",
            SalaryComponent::Deduction => "deduction",
            SalaryComponent::OvertimeHours => "overtime_hours",
            SalaryComponent::HolidayWorkHours => "holiday_work_hours",
            SalaryComponent::NightWorkHours => "night_work_hours",
            SalaryComponent::SpecialHolidayDays => "special_holiday_days",
            SalaryComponent::NonWorkingTime => "non_working_time",
            SalaryComponent::PaidHolidayDays => "paid_holiday_days",
        }
    }

    /// The unit the component's value is expressed in.
    pub fn unit(&self) -> ComponentUnit {
        match self {
            SalaryComponent::OvertimeHours
            | SalaryComponent::HolidayWorkHours
            | SalaryComponent::NightWorkHours
            | SalaryComponent::NonWorkingTime => ComponentUnit::Hours,
            SalaryComponent::SpecialHolidayDays | SalaryComponent::PaidHolidayDays => {
                ComponentUnit::Days
            }
            _ => ComponentUnit::Currency,
        }
    }
}

impl std::fmt::Display for SalaryComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's salary components for one period.
///
/// # Example
///
/// ```
/// use salary_engine::models::{SalaryComponent, SalaryResult};
/// use chrono::NaiveDate;
///
/// let mut result = SalaryResult::new(1001, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
/// assert_eq!(result.get(SalaryComponent::AgeSalary), 0);
///
/// result.set(SalaryComponent::AgeSalary, 80_000);
/// assert_eq!(result.get(SalaryComponent::AgeSalary), 80_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// The employee the row belongs to.
    pub employee_id: EmployeeId,
    /// The start date of the period; together with the employee, the row key.
    pub period_start: NaiveDate,
    /// Component values.
    pub components: BTreeMap<SalaryComponent, i64>,
}

impl SalaryResult {
    /// Creates a row with every known component initialised to 0.
    pub fn new(employee_id: EmployeeId, period_start: NaiveDate) -> Self {
        Self {
            employee_id,
            period_start,
            components: SalaryComponent::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    /// Returns a component's value, 0 when unset.
    pub fn get(&self, component: SalaryComponent) -> i64 {
        self.components.get(&component).copied().unwrap_or(0)
    }

    /// Sets a component's value.
    pub fn set(&mut self, component: SalaryComponent, value: i64) {
        self.components.insert(component, value);
    }

    /// Sums the given components, saturating at the `i64` bounds.
    pub fn sum_of(&self, components: &[SalaryComponent]) -> i64 {
        components
            .iter()
            .fold(0_i64, |total, c| total.saturating_add(self.get(*c)))
    }
}
