//! Rate tables and allowance records.
//!
//! These are static reference data read by the base-pay rules. Amounts are
//! whole currency units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, Grade};

/// The single-key rate tables the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTable {
    /// Age in whole years → salary.
    Age,
    /// Ability grade → salary.
    AbilityGrade,
    /// Job-title grade → salary.
    JobTitleGrade,
    /// Special-work grade → salary.
    SpecialWorkGrade,
}

impl std::fmt::Display for RateTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateTable::Age => write!(f, "age"),
            RateTable::AbilityGrade => write!(f, "ability_grade"),
            RateTable::JobTitleGrade => write!(f, "job_title_grade"),
            RateTable::SpecialWorkGrade => write!(f, "special_work_grade"),
        }
    }
}

/// The per-employee allowance tables summed over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceKind {
    /// Control (adjustment) allowance.
    Control,
    /// Commute allowance.
    Commute,
}

impl std::fmt::Display for AllowanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllowanceKind::Control => write!(f, "control"),
            AllowanceKind::Commute => write!(f, "commute"),
        }
    }
}

/// An allowance amount that becomes valid on `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRecord {
    /// The employee receiving the allowance.
    pub employee_id: EmployeeId,
    /// The date the allowance becomes valid.
    pub start_date: NaiveDate,
    /// The allowance amount.
    pub amount: i64,
}

/// One row of the business-trip tier table.
///
/// A rate applies to employees whose job-title grade resolves to
/// `target_job_title_grade`, the highest tier not exceeding their grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTripRate {
    /// The job-title grade threshold of this tier.
    pub target_job_title_grade: Grade,
    /// The trip category this rate pays for.
    pub trip_type: String,
    /// Amount paid per attendance day of this trip type.
    pub amount: i64,
}
