//! Department payroll runs.
//!
//! [`SalaryCalculator::run_calculation`] resolves the department roster,
//! computes every employee's [`SalaryResult`] and only then hands the
//! results to the [`ResultWriter`]. A failure anywhere in the computation
//! aborts the run before anything is written.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    BasePay, RestDayCalendar, UNRESOLVED_COMPONENTS, calculate_ability_salary,
    calculate_age_salary, calculate_business_trip_salary, calculate_commute_salary,
    calculate_control_salary, calculate_deduction, calculate_holiday_work,
    calculate_job_title_salary, calculate_night_work, calculate_non_working_time,
    calculate_overtime, calculate_paid_holiday_days, calculate_special_holiday,
    calculate_special_work_salary,
};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, CalculationRun, DepartmentId, Employee, EmployeeCalculation, PayPeriod,
    SalaryComponent, SalaryResult,
};
use crate::store::DataStore;

use super::writer::ResultWriter;

/// The engine version recorded on every run.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes and persists salary results for a department.
///
/// # Example
///
/// ```
/// use salary_engine::config::EngineConfig;
/// use salary_engine::engine::SalaryCalculator;
/// use salary_engine::models::{Employee, PayPeriod, RateTable};
/// use salary_engine::store::{InMemoryStore, StoreSnapshot};
/// use chrono::NaiveDate;
/// use std::sync::Arc;
///
/// let mut snapshot = StoreSnapshot::default();
/// snapshot.employees.push(Employee {
///     id: 1,
///     department_id: 10,
///     birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
///     ability_grade: None,
///     job_title_grade: None,
///     special_work_grade: None,
/// });
/// snapshot.rates_mut(RateTable::Age).insert(33, 80_000);
///
/// let calculator = SalaryCalculator::new(
///     Arc::new(InMemoryStore::from_snapshot(snapshot)),
///     Arc::new(EngineConfig::default()),
/// );
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
/// ).unwrap();
///
/// let run = calculator.run_calculation(10, &period, true).unwrap();
/// assert_eq!(run.identity_rows_inserted, 1);
/// assert_eq!(run.employees.len(), 1);
/// ```
pub struct SalaryCalculator {
    store: Arc<dyn DataStore>,
    config: Arc<EngineConfig>,
    writer: ResultWriter,
}

impl SalaryCalculator {
    /// Creates a calculator over a store and configuration.
    pub fn new(store: Arc<dyn DataStore>, config: Arc<EngineConfig>) -> Self {
        Self {
            store,
            config,
            writer: ResultWriter::new(),
        }
    }

    /// Returns the store the calculator reads from and writes to.
    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a payroll calculation for every employee in a department.
    ///
    /// Employees are processed in roster order. The holiday calendar is read
    /// once per run. Results are written only after every employee has been
    /// computed.
    pub fn run_calculation(
        &self,
        department_id: DepartmentId,
        period: &PayPeriod,
        is_first_calculation: bool,
    ) -> EngineResult<CalculationRun> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4();
        let timestamp = Utc::now();

        info!(
            run_id = %run_id,
            department_id,
            period_start = %period.start_date,
            period_end = %period.end_date,
            first_calculation = is_first_calculation,
            "Starting calculation run"
        );

        let employee_ids = self.store.list_employee_ids(department_id)?;
        let calendar = RestDayCalendar::new(self.store.get_holidays()?, &self.config.rest_days);

        let mut employees = Vec::with_capacity(employee_ids.len());
        for employee_id in employee_ids {
            let calculation = self
                .store
                .get_employee(employee_id)
                .and_then(|employee| self.calculate_employee(&employee, period, &calendar))
                .map_err(|err| {
                    warn!(run_id = %run_id, employee_id, error = %err, "Calculation aborted");
                    err
                })?;
            employees.push(calculation);
        }

        let results: Vec<SalaryResult> = employees.iter().map(|e| e.result.clone()).collect();
        let summary = self
            .writer
            .persist(self.store.as_ref(), &results, is_first_calculation)
            .map_err(|err| {
                warn!(run_id = %run_id, error = %err, "Writing results failed");
                err
            })?;

        let unresolved = if employees.is_empty() {
            Vec::new()
        } else {
            UNRESOLVED_COMPONENTS.to_vec()
        };
        if !unresolved.is_empty() {
            warn!(
                run_id = %run_id,
                components = ?unresolved,
                "Components without business rules were set to 0"
            );
        }

        let duration_us = start_time.elapsed().as_micros() as u64;
        info!(
            run_id = %run_id,
            department_id,
            employees = employees.len(),
            identity_rows_inserted = summary.identity_rows_inserted,
            rows_written = summary.rows_written,
            duration_us,
            "Calculation run completed"
        );

        Ok(CalculationRun {
            run_id,
            timestamp,
            engine_version: ENGINE_VERSION.to_string(),
            department_id,
            period: *period,
            first_calculation: is_first_calculation,
            employees,
            unresolved,
            identity_rows_inserted: summary.identity_rows_inserted,
            duration_us,
        })
    }

    /// Computes one employee's result without writing it.
    ///
    /// Base-pay rules run first; the time-based premiums use the memoised
    /// [`BasePay`], and closure compensation runs last because it averages
    /// the other components.
    pub fn calculate_employee(
        &self,
        employee: &Employee,
        period: &PayPeriod,
        calendar: &RestDayCalendar,
    ) -> EngineResult<EmployeeCalculation> {
        let store = self.store.as_ref();
        let config = self.config.as_ref();
        let mut result = SalaryResult::new(employee.id, period.start_date);
        let mut trace = AuditTrace::default();
        let mut step_number: u32 = 1;

        let attendance = store.get_attendance(employee.id, period)?;

        let age = calculate_age_salary(store, employee, period, step_number)?;
        result.set(SalaryComponent::AgeSalary, age.amount);
        trace.steps.push(age.audit_step);
        step_number += 1;

        let ability = calculate_ability_salary(store, employee, step_number)?;
        result.set(SalaryComponent::AbilitySalary, ability.amount);
        trace.steps.push(ability.audit_step);
        step_number += 1;

        let base_pay = BasePay {
            age_salary: age.amount,
            ability_salary: ability.amount,
        };

        let job_title = calculate_job_title_salary(store, employee, step_number)?;
        result.set(SalaryComponent::JobTitleSalary, job_title.amount);
        trace.steps.push(job_title.audit_step);
        step_number += 1;

        let special_work = calculate_special_work_salary(store, employee, step_number)?;
        result.set(SalaryComponent::SpecialWorkSalary, special_work.amount);
        trace.steps.push(special_work.audit_step);
        step_number += 1;

        let control = calculate_control_salary(store, employee.id, period, step_number)?;
        result.set(SalaryComponent::ControlSalary, control.amount);
        trace.steps.push(control.audit_step);
        step_number += 1;

        let commute = calculate_commute_salary(store, employee.id, period, step_number)?;
        result.set(SalaryComponent::CommuteSalary, commute.amount);
        trace.steps.push(commute.audit_step);
        step_number += 1;

        let trip = calculate_business_trip_salary(store, employee, &attendance, step_number)?;
        result.set(SalaryComponent::BusinessTripSalary, trip.amount);
        trace.steps.push(trip.audit_step);
        step_number += 1;

        let overtime = calculate_overtime(&attendance, &base_pay, config, step_number);
        result.set(SalaryComponent::OvertimeHours, overtime.overtime_hours);
        result.set(SalaryComponent::OvertimeSalary, overtime.overtime_salary);
        trace.steps.push(overtime.audit_step);
        step_number += 1;

        let holiday = calculate_holiday_work(&attendance, calendar, &base_pay, config, step_number);
        result.set(SalaryComponent::HolidayWorkHours, holiday.holiday_work_hours);
        result.set(SalaryComponent::HolidayWorkSalary, holiday.holiday_work_salary);
        trace.steps.push(holiday.audit_step);
        step_number += 1;

        let night = calculate_night_work(&attendance, &base_pay, config, step_number);
        result.set(SalaryComponent::NightWorkHours, night.night_work_hours);
        result.set(SalaryComponent::NightWorkSalary, night.night_work_salary);
        trace.steps.push(night.audit_step);
        step_number += 1;

        let closure =
            calculate_special_holiday(&attendance, &result, &config.special_holiday, step_number);
        result.set(SalaryComponent::SpecialHolidayDays, closure.special_holiday_days);
        result.set(SalaryComponent::SpecialHolidaySalary, closure.special_holiday_salary);
        trace.steps.push(closure.audit_step);
        step_number += 1;

        for placeholder in [
            calculate_deduction(employee.id, step_number),
            calculate_non_working_time(employee.id, step_number + 1),
            calculate_paid_holiday_days(employee.id, step_number + 2),
        ] {
            result.set(placeholder.component, placeholder.amount);
            trace.steps.push(placeholder.audit_step);
            trace.warnings.push(placeholder.warning);
        }

        debug!(
            employee_id = employee.id,
            base_pay = base_pay.total(),
            overtime_hours = overtime.overtime_hours,
            steps = trace.steps.len(),
            "Employee calculated"
        );

        Ok(EmployeeCalculation {
            result,
            audit_trace: trace,
        })
    }
}
