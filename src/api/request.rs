//! Request types for the salary engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DepartmentId, PayPeriod};

/// Request body for the `/calculations` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The department to calculate.
    pub department_id: DepartmentId,
    /// First day of the period (inclusive); the result row key.
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Whether this is the first calculation of the period.
    #[serde(default)]
    pub first_calculation: bool,
}

impl CalculationRequest {
    /// Builds the requested pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.period_start, self.period_end)
    }
}
