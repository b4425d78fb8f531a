//! Base-pay rules: age, ability, job-title and special-work salaries.
//!
//! These rules have no dependency on other components. Each looks up one
//! rate table; a missing grade or a key with no row yields 0.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, Employee, Grade, PayPeriod, RateTable};
use crate::store::DataStore;

/// The result of a single-component rule, including the amount and audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentResult {
    /// The computed component value.
    pub amount: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Age salary plus ability salary, memoised once per employee per run.
///
/// Every time-based premium is a fraction of this amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePay {
    /// The employee's age salary.
    pub age_salary: i64,
    /// The employee's ability salary.
    pub ability_salary: i64,
}

impl BasePay {
    /// Returns `age_salary + ability_salary`, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.age_salary.saturating_add(self.ability_salary)
    }
}

/// Looks up the age salary for the employee's age on the period start date.
///
/// The age is the calendar-year difference, reduced by one when the period
/// starts before the birthday's month/day (see [`Employee::age_on`]).
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_age_salary;
/// use salary_engine::models::{Employee, PayPeriod, RateTable};
/// use salary_engine::store::{InMemoryStore, StoreSnapshot};
/// use chrono::NaiveDate;
///
/// let mut snapshot = StoreSnapshot::default();
/// snapshot.rates_mut(RateTable::Age).insert(33, 80_000);
/// let store = InMemoryStore::from_snapshot(snapshot);
///
/// let employee = Employee {
///     id: 1,
///     department_id: 10,
///     birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
///     ability_grade: None,
///     job_title_grade: None,
///     special_work_grade: None,
/// };
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
/// ).unwrap();
///
/// let result = calculate_age_salary(&store, &employee, &period, 1).unwrap();
/// assert_eq!(result.amount, 80_000);
/// ```
pub fn calculate_age_salary(
    store: &dyn DataStore,
    employee: &Employee,
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    let age = employee.age_on(period.start_date);
    let rate = store.lookup_rate(RateTable::Age, age)?;
    let amount = rate.unwrap_or(0);

    let reasoning = match rate {
        Some(rate) => format!(
            "Age {} on {} (born {}) matched age salary {}",
            age, period.start_date, employee.birth_date, rate
        ),
        None => format!("No age salary row for age {}; using 0", age),
    };

    Ok(ComponentResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "age_salary".to_string(),
            rule_name: "Age Salary".to_string(),
            input: serde_json::json!({
                "birth_date": employee.birth_date.to_string(),
                "period_start": period.start_date.to_string(),
                "age": age
            }),
            output: serde_json::json!({
                "amount": amount,
                "matched": rate.is_some()
            }),
            reasoning,
        },
    })
}

/// Looks up the ability salary by ability grade.
pub fn calculate_ability_salary(
    store: &dyn DataStore,
    employee: &Employee,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    lookup_grade_salary(
        store,
        RateTable::AbilityGrade,
        employee.ability_grade,
        ("ability_salary", "Ability Salary"),
        step_number,
    )
}

/// Looks up the job-title salary by job-title grade.
pub fn calculate_job_title_salary(
    store: &dyn DataStore,
    employee: &Employee,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    lookup_grade_salary(
        store,
        RateTable::JobTitleGrade,
        employee.job_title_grade,
        ("job_title_salary", "Job-Title Salary"),
        step_number,
    )
}

/// Looks up the special-work salary by special-work grade.
pub fn calculate_special_work_salary(
    store: &dyn DataStore,
    employee: &Employee,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    lookup_grade_salary(
        store,
        RateTable::SpecialWorkGrade,
        employee.special_work_grade,
        ("special_work_salary", "Special-Work Salary"),
        step_number,
    )
}

fn lookup_grade_salary(
    store: &dyn DataStore,
    table: RateTable,
    grade: Option<Grade>,
    (rule_id, rule_name): (&str, &str),
    step_number: u32,
) -> EngineResult<ComponentResult> {
    // A null grade never reaches the store.
    let rate = match grade {
        Some(grade) => store.lookup_rate(table, grade)?,
        None => None,
    };
    let amount = rate.unwrap_or(0);

    let reasoning = match (grade, rate) {
        (None, _) => format!("No {} assigned; using 0", table),
        (Some(grade), None) => format!("No {} row for grade {}; using 0", table, grade),
        (Some(grade), Some(rate)) => format!("Grade {} matched {} salary {}", grade, table, rate),
    };

    Ok(ComponentResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "table": table.to_string(),
                "grade": grade
            }),
            output: serde_json::json!({
                "amount": amount,
                "matched": rate.is_some()
            }),
            reasoning,
        },
    })
}
