//! Calculation run models.
//!
//! This module contains the [`CalculationRun`] type returned by a payroll run
//! and the audit structures that record every rule decision behind a
//! [`SalaryResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DepartmentId, PayPeriod, SalaryComponent, SalaryResult};

/// A single step in the audit trace recording a rule decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number within the employee's calculation.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate results that were produced but may need attention,
/// such as components whose business rules are not yet defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one employee's calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// One employee's computed result together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCalculation {
    /// The salary result row.
    pub result: SalaryResult,
    /// Every rule decision made for the row.
    pub audit_trace: AuditTrace,
}

/// The outcome of a department payroll run.
///
/// `unresolved` lists the components whose rules are placeholders; a caller
/// can treat a non-empty list as an incomplete payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The department that was calculated.
    pub department_id: DepartmentId,
    /// The period that was calculated.
    pub period: PayPeriod,
    /// Whether the run was the first calculation of the period.
    pub first_calculation: bool,
    /// Per-employee results, in roster order.
    pub employees: Vec<EmployeeCalculation>,
    /// Components computed by placeholder rules.
    pub unresolved: Vec<SalaryComponent>,
    /// Identity rows created by this run.
    pub identity_rows_inserted: usize,
    /// Total run duration in microseconds.
    pub duration_us: u64,
}

impl CalculationRun {
    /// Returns the computed result for an employee, if they were in scope.
    pub fn result_for(&self, employee_id: super::EmployeeId) -> Option<&SalaryResult> {
        self.employees
            .iter()
            .map(|e| &e.result)
            .find(|r| r.employee_id == employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_run() -> CalculationRun {
        let period = PayPeriod::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap();
        CalculationRun {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            department_id: 10,
            period,
            first_calculation: true,
            employees: vec![EmployeeCalculation {
                result: SalaryResult::new(1001, period.start_date),
                audit_trace: AuditTrace::default(),
            }],
            unresolved: vec![SalaryComponent::Deduction],
            identity_rows_inserted: 1,
            duration_us: 10,
        }
    }

    #[test]
    fn test_result_for_known_and_unknown_employee() {
        let run = sample_run();
        assert!(run.result_for(1001).is_some());
        assert!(run.result_for(9999).is_none());
    }

    #[test]
    fn test_run_serialization_contains_required_fields() {
        let json = serde_json::to_value(sample_run()).unwrap();
        assert!(json.get("run_id").is_some());
        assert_eq!(json["department_id"], 10);
        assert_eq!(json["period"]["start_date"], "2024-04-01");
        assert_eq!(json["unresolved"][0], "deduction");
        assert_eq!(json["employees"][0]["result"]["employee_id"], 1001);
    }

    #[test]
    fn test_audit_step_round_trip() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "age_salary".to_string(),
            rule_name: "Age Salary".to_string(),
            input: serde_json::json!({"age": 33}),
            output: serde_json::json!({"amount": 80000}),
            reasoning: "Age 33 matched".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
