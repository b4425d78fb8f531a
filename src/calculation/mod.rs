//! Calculation rules for the salary engine.
//!
//! This module contains one function per pay rule: base-pay lookups by age
//! and grade, period allowance sums, business-trip tiers, the time-based
//! premiums for overtime, rest-day and night work, closure compensation, and
//! placeholders for components whose rules are not defined. Time-based rules
//! share the half-hour bucketing and rest-day classification in
//! [`time_bucketing`] and the premium arithmetic in [`premium`].
//!
//! Rules never write to the store. Each returns its values together with an
//! [`AuditStep`](crate::models::AuditStep).

mod allowances;
mod base_pay;
mod business_trip;
mod holiday_work;
mod night_work;
mod overtime;
pub mod premium;
mod special_holiday;
pub mod time_bucketing;
mod unresolved;

pub use allowances::{calculate_allowance, calculate_commute_salary, calculate_control_salary};
pub use base_pay::{
    BasePay, ComponentResult, calculate_ability_salary, calculate_age_salary,
    calculate_job_title_salary, calculate_special_work_salary,
};
pub use business_trip::{calculate_business_trip_salary, resolve_trip_tier, sum_trip_rates};
pub use holiday_work::{HolidayWorkResult, calculate_holiday_work};
pub use night_work::{NightWorkResult, calculate_night_work, night_minutes};
pub use overtime::{OvertimeResult, calculate_overtime};
pub use premium::{premium_amount, truncate_to_i64};
pub use special_holiday::{
    GROSS_COMPONENTS, SpecialHolidayResult, calculate_special_holiday, count_closure_days,
};
pub use time_bucketing::{
    HALF_HOUR_MINUTES, RestDayCalendar, bucket_minutes, bucketed_hours, minutes_between,
    worked_hours,
};
pub use unresolved::{
    UNRESOLVED_COMPONENTS, UnresolvedResult, calculate_deduction, calculate_non_working_time,
    calculate_paid_holiday_days,
};
