//! Control and commute allowance rules.

use crate::error::EngineResult;
use crate::models::{AllowanceKind, AuditStep, EmployeeId, PayPeriod};
use crate::store::DataStore;

use super::ComponentResult;

/// Sums the control allowance records starting within the period.
pub fn calculate_control_salary(
    store: &dyn DataStore,
    employee_id: EmployeeId,
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    calculate_allowance(store, AllowanceKind::Control, employee_id, period, step_number)
}

/// Sums the commute allowance records starting within the period.
pub fn calculate_commute_salary(
    store: &dyn DataStore,
    employee_id: EmployeeId,
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    calculate_allowance(store, AllowanceKind::Commute, employee_id, period, step_number)
}

/// Sums one kind of allowance for an employee.
///
/// Records count when their validity start date lies within the period,
/// both ends inclusive. Each kind is summed on its own.
pub fn calculate_allowance(
    store: &dyn DataStore,
    kind: AllowanceKind,
    employee_id: EmployeeId,
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<ComponentResult> {
    let amount = store.sum_allowance(kind, employee_id, period)?;

    let (rule_id, rule_name) = match kind {
        AllowanceKind::Control => ("control_salary", "Control Salary"),
        AllowanceKind::Commute => ("commute_salary", "Commute Salary"),
    };

    Ok(ComponentResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "kind": kind.to_string(),
                "period_start": period.start_date.to_string(),
                "period_end": period.end_date.to_string()
            }),
            output: serde_json::json!({ "amount": amount }),
            reasoning: format!(
                "{} records starting {}..={} sum to {}",
                kind, period.start_date, period.end_date, amount
            ),
        },
    })
}
