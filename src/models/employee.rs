//! Employee master data.
//!
//! Employees are immutable reference data for the engine; the data store owns them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier of an employee in the data store.
pub type EmployeeId = i64;

/// Identifier of a department in the data store.
pub type DepartmentId = i64;

/// A grade used as a rate table key (ability, job-title, special-work).
pub type Grade = i32;

/// Represents an employee whose salary is calculated.
///
/// # Example
///
/// ```
/// use salary_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: 1001,
///     department_id: 10,
///     birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
///     ability_grade: Some(3),
///     job_title_grade: None,
///     special_work_grade: None,
/// };
///
/// // The birthday has not yet been reached on 1 April.
/// assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()), 33);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The department the employee belongs to.
    pub department_id: DepartmentId,
    /// The employee's date of birth.
    pub birth_date: NaiveDate,
    /// Ability grade, keyed into the ability salary table.
    #[serde(default)]
    pub ability_grade: Option<Grade>,
    /// Job-title grade; `None` for employees without a title.
    #[serde(default)]
    pub job_title_grade: Option<Grade>,
    /// Special-work grade; `None` for employees without special duties.
    #[serde(default)]
    pub special_work_grade: Option<Grade>,
}

impl Employee {
    /// Returns the employee's age in whole years on `date`.
    ///
    /// The calendar-year difference is reduced by one when the month/day of
    /// `date` is earlier than the month/day of the birth date.
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        let years = date.year() - self.birth_date.year();
        let birthday_pending =
            (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day());
        if birthday_pending { years - 1 } else { years }
    }
}
