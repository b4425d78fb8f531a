//! Placeholder rules for components without defined business rules.
//!
//! Deduction, non-working time and paid holiday days always come out as 0.
//! Each placeholder still produces an audit step and a warning so callers can
//! tell a real zero from an unimplemented one.

use tracing::debug;

use crate::models::{AuditStep, AuditWarning, EmployeeId, SalaryComponent};

/// The components computed by placeholder rules.
pub const UNRESOLVED_COMPONENTS: [SalaryComponent; 3] = [
    SalaryComponent::Deduction,
    SalaryComponent::NonWorkingTime,
    SalaryComponent::PaidHolidayDays,
];

/// The result of a placeholder rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedResult {
    /// The component this placeholder stands in for.
    pub component: SalaryComponent,
    /// Always 0.
    pub amount: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
    /// Warning flagging the component as unresolved.
    pub warning: AuditWarning,
}

/// Placeholder for tax and social-insurance deductions.
pub fn calculate_deduction(employee_id: EmployeeId, step_number: u32) -> UnresolvedResult {
    unresolved(SalaryComponent::Deduction, employee_id, step_number)
}

/// Placeholder for non-working time accounting.
pub fn calculate_non_working_time(employee_id: EmployeeId, step_number: u32) -> UnresolvedResult {
    unresolved(SalaryComponent::NonWorkingTime, employee_id, step_number)
}

/// Placeholder for paid holiday accrual.
pub fn calculate_paid_holiday_days(employee_id: EmployeeId, step_number: u32) -> UnresolvedResult {
    unresolved(SalaryComponent::PaidHolidayDays, employee_id, step_number)
}

fn unresolved(component: SalaryComponent, employee_id: EmployeeId, step_number: u32) -> UnresolvedResult {
    debug!(employee_id, component = %component, "Unresolved component set to 0");

    UnresolvedResult {
        component,
        amount: 0,
        audit_step: AuditStep {
            step_number,
            rule_id: component.as_str().to_string(),
            rule_name: format!("{} (not implemented)", component),
            input: serde_json::json!({ "employee_id": employee_id }),
            output: serde_json::json!({ "amount": 0, "resolved": false }),
            reasoning: format!("No business rule is defined for {}; using 0", component),
        },
        warning: AuditWarning {
            code: "UNRESOLVED_COMPONENT".to_string(),
            message: format!("{} has no business rule and was set to 0", component),
            severity: "medium".to_string(),
        },
    }
}
