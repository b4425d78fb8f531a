//! Core data models for the salary calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod calculation_result;
mod employee;
mod pay_period;
mod rates;
mod salary_result;

pub use attendance::AttendanceRecord;
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationRun, EmployeeCalculation,
};
pub use employee::{DepartmentId, Employee, EmployeeId, Grade};
pub use pay_period::PayPeriod;
pub use rates::{AllowanceKind, AllowanceRecord, BusinessTripRate, RateTable};
pub use salary_result::{ComponentUnit, RESULT_SCHEMA_VERSION, SalaryComponent, SalaryResult};
