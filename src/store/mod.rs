//! Data store interface consumed by the engine.
//!
//! The engine never opens connections or discovers schemas itself; it is
//! handed a [`DataStore`] and reads reference data and writes result rows
//! through it. Every method fails with [`EngineError::DataAccess`] when the
//! store is unreachable or a query is malformed. A lookup that simply finds
//! nothing is not a failure and comes back as `None`, an empty collection,
//! or a zero sum.
//!
//! [`EngineError::DataAccess`]: crate::error::EngineError::DataAccess

mod memory;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AllowanceKind, AttendanceRecord, BusinessTripRate, DepartmentId, Employee, EmployeeId,
    PayPeriod, RateTable, SalaryResult,
};

pub use memory::{InMemoryStore, StoreSnapshot, WriteEvent};

/// Read access to reference data and write access to result rows.
pub trait DataStore: Send + Sync {
    /// Employee identifiers in a department, in roster order.
    fn list_employee_ids(&self, department_id: DepartmentId) -> EngineResult<Vec<EmployeeId>>;

    /// Employee master data. A missing employee is a data access failure.
    fn get_employee(&self, employee_id: EmployeeId) -> EngineResult<Employee>;

    /// Attendance records dated within the period, in date order.
    fn get_attendance(
        &self,
        employee_id: EmployeeId,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// The company holiday calendar.
    fn get_holidays(&self) -> EngineResult<BTreeSet<NaiveDate>>;

    /// Looks up a salary amount by key in a single-key rate table.
    fn lookup_rate(&self, table: RateTable, key: i32) -> EngineResult<Option<i64>>;

    /// Every row of the business-trip tier table.
    fn business_trip_rates(&self) -> EngineResult<Vec<BusinessTripRate>>;

    /// Sum of an employee's allowance amounts whose start date is in the period.
    fn sum_allowance(
        &self,
        kind: AllowanceKind,
        employee_id: EmployeeId,
        period: &PayPeriod,
    ) -> EngineResult<i64>;

    /// Whether a result row exists for `(employee_id, period_start)`.
    fn result_exists(&self, employee_id: EmployeeId, period_start: NaiveDate)
    -> EngineResult<bool>;

    /// Creates the bare identity row for `(employee_id, period_start)`.
    fn insert_result_row(&self, employee_id: EmployeeId, period_start: NaiveDate)
    -> EngineResult<()>;

    /// Upserts every component of a result row in one atomic write.
    fn write_result_row(&self, result: &SalaryResult) -> EngineResult<()>;

    /// Reads a stored result row.
    fn get_result(
        &self,
        employee_id: EmployeeId,
        period_start: NaiveDate,
    ) -> EngineResult<Option<SalaryResult>>;
}
