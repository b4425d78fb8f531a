//! Business-trip salary rule.
//!
//! The tier table is keyed by job-title grade threshold and trip type. An
//! employee resolves the highest tier at or below their job-title grade
//! (a null grade counts as 0), and every attendance record whose trip type
//! has a rate at that tier earns that rate. Clock times play no part.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AuditStep, BusinessTripRate, Employee, Grade};
use crate::store::DataStore;

use super::ComponentResult;

/// Resolves the highest defined tier not exceeding the job-title grade.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::resolve_trip_tier;
/// use salary_engine::models::BusinessTripRate;
///
/// let rates = vec![
///     BusinessTripRate { target_job_title_grade: 0, trip_type: "domestic".into(), amount: 3000 },
///     BusinessTripRate { target_job_title_grade: 3, trip_type: "domestic".into(), amount: 4000 },
/// ];
/// assert_eq!(resolve_trip_tier(&rates, Some(2)), Some(0));
/// assert_eq!(resolve_trip_tier(&rates, Some(5)), Some(3));
/// assert_eq!(resolve_trip_tier(&rates, None), Some(0));
/// ```
pub fn resolve_trip_tier(rates: &[BusinessTripRate], job_title_grade: Option<Grade>) -> Option<Grade> {
    let grade = job_title_grade.unwrap_or(0);
    rates
        .iter()
        .map(|r| r.target_job_title_grade)
        .filter(|tier| *tier <= grade)
        .max()
}

/// Sums trip rates at a tier over the attendance records.
///
/// Returns the total and the number of trip days by type.
pub fn sum_trip_rates(
    rates: &[BusinessTripRate],
    tier: Grade,
    attendance: &[AttendanceRecord],
) -> (i64, BTreeMap<String, usize>) {
    let mut total: i64 = 0;
    let mut days_by_type: BTreeMap<String, usize> = BTreeMap::new();

    for trip_type in attendance.iter().filter_map(|r| r.business_trip_type.as_deref()) {
        let mut matched = false;
        for rate in rates
            .iter()
            .filter(|r| r.target_job_title_grade == tier && r.trip_type == trip_type)
        {
            total = total.saturating_add(rate.amount);
            matched = true;
        }
        if matched {
            *days_by_type.entry(trip_type.to_string()).or_default() += 1;
        }
    }

    (total, days_by_type)
}

/// Calculates the business-trip salary for one employee.
pub fn calculate_business_trip_salary(
    store: &dyn DataStore,
    employee: &Employee,
    attendance: &[AttendanceRecord],
    step_number: u32,
) -> EngineResult<ComponentResult> {
    let rates = store.business_trip_rates()?;
    let tier = resolve_trip_tier(&rates, employee.job_title_grade);

    let (amount, days_by_type) = match tier {
        Some(tier) => sum_trip_rates(&rates, tier, attendance),
        None => (0, BTreeMap::new()),
    };

    let reasoning = match tier {
        None => format!(
            "No trip tier at or below job-title grade {}; using 0",
            employee.job_title_grade.unwrap_or(0)
        ),
        Some(tier) => format!(
            "Job-title grade {} resolved tier {}; {} matching trip days sum to {}",
            employee.job_title_grade.unwrap_or(0),
            tier,
            days_by_type.values().sum::<usize>(),
            amount
        ),
    };

    Ok(ComponentResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "business_trip_salary".to_string(),
            rule_name: "Business-Trip Salary".to_string(),
            input: serde_json::json!({
                "job_title_grade": employee.job_title_grade,
                "defined_tiers": rates.len()
            }),
            output: serde_json::json!({
                "tier": tier,
                "days_by_type": days_by_type,
                "amount": amount
            }),
            reasoning,
        },
    })
}
