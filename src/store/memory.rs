//! In-memory [`DataStore`] implementation.
//!
//! Reference data is held in a [`StoreSnapshot`], which can be built in code
//! or loaded from YAML. Result rows live in a map keyed by
//! `(employee_id, period_start)`, so a row can never be duplicated.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::load_yaml;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceKind, AllowanceRecord, AttendanceRecord, BusinessTripRate, DepartmentId, Employee,
    EmployeeId, PayPeriod, RateTable, SalaryResult,
};

use super::DataStore;

/// Serializable contents of an [`InMemoryStore`].
///
/// # Example
///
/// ```
/// use salary_engine::models::RateTable;
/// use salary_engine::store::{DataStore, InMemoryStore, StoreSnapshot};
///
/// let mut snapshot = StoreSnapshot::default();
/// snapshot.rates_mut(RateTable::Age).insert(33, 80_000);
///
/// let store = InMemoryStore::from_snapshot(snapshot);
/// assert_eq!(store.lookup_rate(RateTable::Age, 33).unwrap(), Some(80_000));
/// assert_eq!(store.lookup_rate(RateTable::Age, 34).unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    /// Employee master data.
    pub employees: Vec<Employee>,
    /// Attendance records for all employees.
    pub attendance: Vec<AttendanceRecord>,
    /// Company holidays.
    pub holidays: BTreeSet<NaiveDate>,
    /// Age → salary.
    pub age_rates: BTreeMap<i32, i64>,
    /// Ability grade → salary.
    pub ability_rates: BTreeMap<i32, i64>,
    /// Job-title grade → salary.
    pub job_title_rates: BTreeMap<i32, i64>,
    /// Special-work grade → salary.
    pub special_work_rates: BTreeMap<i32, i64>,
    /// Business-trip tier table.
    pub business_trip_rates: Vec<BusinessTripRate>,
    /// Control allowance records.
    pub control_allowances: Vec<AllowanceRecord>,
    /// Commute allowance records.
    pub commute_allowances: Vec<AllowanceRecord>,
    /// Previously stored result rows.
    pub results: Vec<SalaryResult>,
}

impl StoreSnapshot {
    /// Loads a snapshot from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        load_yaml(path.as_ref())
    }

    /// Returns one of the single-key rate tables.
    pub fn rates(&self, table: RateTable) -> &BTreeMap<i32, i64> {
        match table {
            RateTable::Age => &self.age_rates,
            RateTable::AbilityGrade => &self.ability_rates,
            RateTable::JobTitleGrade => &self.job_title_rates,
            RateTable::SpecialWorkGrade => &self.special_work_rates,
        }
    }

    /// Returns one of the single-key rate tables for editing.
    pub fn rates_mut(&mut self, table: RateTable) -> &mut BTreeMap<i32, i64> {
        match table {
            RateTable::Age => &mut self.age_rates,
            RateTable::AbilityGrade => &mut self.ability_rates,
            RateTable::JobTitleGrade => &mut self.job_title_rates,
            RateTable::SpecialWorkGrade => &mut self.special_work_rates,
        }
    }

    /// Returns the records of one allowance kind.
    pub fn allowances(&self, kind: AllowanceKind) -> &[AllowanceRecord] {
        match kind {
            AllowanceKind::Control => &self.control_allowances,
            AllowanceKind::Commute => &self.commute_allowances,
        }
    }

    /// Returns the records of one allowance kind for editing.
    pub fn allowances_mut(&mut self, kind: AllowanceKind) -> &mut Vec<AllowanceRecord> {
        match kind {
            AllowanceKind::Control => &mut self.control_allowances,
            AllowanceKind::Commute => &mut self.commute_allowances,
        }
    }
}

/// A write applied to the result table, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent {
    /// An identity row was inserted.
    InsertRow {
        /// The row's employee.
        employee_id: EmployeeId,
        /// The row's period start.
        period_start: NaiveDate,
    },
    /// A full result row was upserted.
    WriteRow {
        /// The row's employee.
        employee_id: EmployeeId,
        /// The row's period start.
        period_start: NaiveDate,
    },
}

#[derive(Debug, Default)]
struct StoreState {
    reference: StoreSnapshot,
    results: BTreeMap<(EmployeeId, NaiveDate), SalaryResult>,
}

/// A thread-safe in-memory data store.
///
/// Operations can be made to fail on demand with
/// [`InMemoryStore::fail_operation`], which is how callers exercise the
/// engine's abort-on-failure behaviour. Result-table writes are only recorded
/// when the store is built with [`InMemoryStore::with_write_log`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    write_log: Option<Mutex<Vec<WriteEvent>>>,
    failing: Mutex<BTreeSet<String>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the snapshot's reference data and results.
    pub fn from_snapshot(mut snapshot: StoreSnapshot) -> Self {
        let results = std::mem::take(&mut snapshot.results)
            .into_iter()
            .map(|r| ((r.employee_id, r.period_start), r))
            .collect();
        Self {
            state: RwLock::new(StoreState {
                reference: snapshot,
                results,
            }),
            write_log: None,
            failing: Mutex::new(BTreeSet::new()),
        }
    }

    /// Loads a store from a YAML snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        StoreSnapshot::load(path).map(Self::from_snapshot)
    }

    /// Enables recording of result-table writes, read back with
    /// [`InMemoryStore::write_log`] or [`InMemoryStore::take_write_log`].
    pub fn with_write_log(mut self) -> Self {
        self.write_log = Some(Mutex::new(Vec::new()));
        self
    }

    /// Makes every later call of `operation` fail with a data access error.
    pub fn fail_operation(&self, operation: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(operation.to_string());
        }
    }

    /// Clears all injected failures.
    pub fn clear_failures(&self) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.clear();
        }
    }

    /// Returns the recorded result-table writes. Empty unless recording is on.
    pub fn write_log(&self) -> Vec<WriteEvent> {
        self.write_log
            .as_ref()
            .and_then(|log| log.lock().ok().map(|log| log.clone()))
            .unwrap_or_default()
    }

    /// Returns the recorded writes and clears the log.
    pub fn take_write_log(&self) -> Vec<WriteEvent> {
        self.write_log
            .as_ref()
            .and_then(|log| log.lock().ok().map(|mut log| std::mem::take(&mut *log)))
            .unwrap_or_default()
    }

    /// Returns the number of stored result rows.
    pub fn result_count(&self) -> EngineResult<usize> {
        Ok(self.read("result_count")?.results.len())
    }

    /// Returns the current contents, stored results included.
    pub fn snapshot(&self) -> EngineResult<StoreSnapshot> {
        let state = self.read("snapshot")?;
        let mut snapshot = state.reference.clone();
        snapshot.results = state.results.values().cloned().collect();
        Ok(snapshot)
    }

    fn check(&self, operation: &str) -> EngineResult<()> {
        let injected = self
            .failing
            .lock()
            .map(|failing| failing.contains(operation))
            .unwrap_or(false);
        if injected {
            return Err(EngineError::data_access(operation, "injected failure"));
        }
        Ok(())
    }

    fn read(&self, operation: &str) -> EngineResult<RwLockReadGuard<'_, StoreState>> {
        self.check(operation)?;
        self.state
            .read()
            .map_err(|_| EngineError::data_access(operation, "store lock poisoned"))
    }

    fn write(&self, operation: &str) -> EngineResult<RwLockWriteGuard<'_, StoreState>> {
        self.check(operation)?;
        self.state
            .write()
            .map_err(|_| EngineError::data_access(operation, "store lock poisoned"))
    }

    fn record(&self, event: WriteEvent) {
        if let Some(Ok(mut log)) = self.write_log.as_ref().map(Mutex::lock) {
            log.push(event);
        }
    }
}

impl DataStore for InMemoryStore {
    fn list_employee_ids(&self, department_id: DepartmentId) -> EngineResult<Vec<EmployeeId>> {
        let state = self.read("list_employee_ids")?;
        Ok(state
            .reference
            .employees
            .iter()
            .filter(|e| e.department_id == department_id)
            .map(|e| e.id)
            .collect())
    }

    fn get_employee(&self, employee_id: EmployeeId) -> EngineResult<Employee> {
        let state = self.read("get_employee")?;
        state
            .reference
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| {
                EngineError::data_access("get_employee", format!("employee {employee_id} not found"))
            })
    }

    fn get_attendance(
        &self,
        employee_id: EmployeeId,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let state = self.read("get_attendance")?;
        let mut records: Vec<AttendanceRecord> = state
            .reference
            .attendance
            .iter()
            .filter(|a| a.employee_id == employee_id && period.contains_date(a.date))
            .cloned()
            .collect();
        records.sort_by_key(|a| a.date);
        Ok(records)
    }

    fn get_holidays(&self) -> EngineResult<BTreeSet<NaiveDate>> {
        Ok(self.read("get_holidays")?.reference.holidays.clone())
    }

    fn lookup_rate(&self, table: RateTable, key: i32) -> EngineResult<Option<i64>> {
        let state = self.read("lookup_rate")?;
        Ok(state.reference.rates(table).get(&key).copied())
    }

    fn business_trip_rates(&self) -> EngineResult<Vec<BusinessTripRate>> {
        Ok(self
            .read("business_trip_rates")?
            .reference
            .business_trip_rates
            .clone())
    }

    fn sum_allowance(
        &self,
        kind: AllowanceKind,
        employee_id: EmployeeId,
        period: &PayPeriod,
    ) -> EngineResult<i64> {
        let state = self.read("sum_allowance")?;
        Ok(state
            .reference
            .allowances(kind)
            .iter()
            .filter(|r| r.employee_id == employee_id && period.contains_date(r.start_date))
            .fold(0_i64, |total, r| total.saturating_add(r.amount)))
    }

    fn result_exists(
        &self,
        employee_id: EmployeeId,
        period_start: NaiveDate,
    ) -> EngineResult<bool> {
        let state = self.read("result_exists")?;
        Ok(state.results.contains_key(&(employee_id, period_start)))
    }

    fn insert_result_row(
        &self,
        employee_id: EmployeeId,
        period_start: NaiveDate,
    ) -> EngineResult<()> {
        let mut state = self.write("insert_result_row")?;
        if state.results.contains_key(&(employee_id, period_start)) {
            return Err(EngineError::data_access(
                "insert_result_row",
                format!("result row ({employee_id}, {period_start}) already exists"),
            ));
        }
        state.results.insert(
            (employee_id, period_start),
            SalaryResult::new(employee_id, period_start),
        );
        self.record(WriteEvent::InsertRow {
            employee_id,
            period_start,
        });
        debug!(employee_id, %period_start, "Inserted identity row");
        Ok(())
    }

    fn write_result_row(&self, result: &SalaryResult) -> EngineResult<()> {
        let mut state = self.write("write_result_row")?;
        state
            .results
            .insert((result.employee_id, result.period_start), result.clone());
        self.record(WriteEvent::WriteRow {
            employee_id: result.employee_id,
            period_start: result.period_start,
        });
        Ok(())
    }

    fn get_result(
        &self,
        employee_id: EmployeeId,
        period_start: NaiveDate,
    ) -> EngineResult<Option<SalaryResult>> {
        let state = self.read("get_result")?;
        Ok(state.results.get(&(employee_id, period_start)).cloned())
    }
}
