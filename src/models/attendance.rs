//! Daily attendance records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// One employee's attendance entry for one calendar day.
///
/// Clock times are times of day on [`AttendanceRecord::date`]. A missing
/// clock-in or clock-out means no work was recorded for the day, and the
/// record is left out of every time-based premium.
///
/// # Example
///
/// ```
/// use salary_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = AttendanceRecord::worked(
///     1001,
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
/// );
/// assert!(record.recorded_times().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: EmployeeId,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Clock-in time, if recorded.
    #[serde(default)]
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    #[serde(default)]
    pub clock_out: Option<NaiveTime>,
    /// Business-trip category for the day, if the employee travelled.
    #[serde(default)]
    pub business_trip_type: Option<String>,
    /// Special-holiday category for the day (e.g. a company-ordered closure).
    #[serde(default)]
    pub special_holiday_type: Option<String>,
    /// Whether the employee was absent.
    #[serde(default)]
    pub absence: bool,
    /// Whether the day was taken as paid holiday.
    #[serde(default)]
    pub paid_holiday: bool,
}

impl AttendanceRecord {
    /// Creates a plain working-day record with both clock times set.
    pub fn worked(
        employee_id: EmployeeId,
        date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    ) -> Self {
        Self {
            employee_id,
            date,
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
            business_trip_type: None,
            special_holiday_type: None,
            absence: false,
            paid_holiday: false,
        }
    }

    /// Creates a record with no clock times.
    pub fn unrecorded(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            clock_in: None,
            clock_out: None,
            business_trip_type: None,
            special_holiday_type: None,
            absence: false,
            paid_holiday: false,
        }
    }

    /// Returns `(clock_in, clock_out)` when both are present.
    pub fn recorded_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((self.clock_in?, self.clock_out?))
    }
}
