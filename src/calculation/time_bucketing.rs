//! Half-hour time bucketing and rest-day classification.
//!
//! Worked time is counted in whole half-hour units: the minutes between two
//! clock times are divided by 30 with truncation toward zero, then halved to
//! give hours at 0.5 granularity. Every time-based premium goes through
//! [`bucket_minutes`], so the truncation here decides payable amounts.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;

use crate::config::{MonthDay, RestDayConfig};
use crate::models::AttendanceRecord;

/// Minutes in one bucketing unit.
pub const HALF_HOUR_MINUTES: i64 = 30;

/// Signed minutes from `start` to `end` on the same day.
///
/// A clock-out earlier than the clock-in yields a negative value.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Converts minutes to hours in half-hour units, truncating toward zero.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::bucket_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(bucket_minutes(570), Decimal::new(95, 1)); // 9h30m -> 9.5
/// assert_eq!(bucket_minutes(89), Decimal::new(10, 1));  // 1h29m -> 1.0
/// assert_eq!(bucket_minutes(-45), Decimal::new(-5, 1)); // toward zero
/// ```
pub fn bucket_minutes(minutes: i64) -> Decimal {
    Decimal::from(minutes / HALF_HOUR_MINUTES) / Decimal::from(2)
}

/// Bucketed worked hours for a pair of clock times.
///
/// Returns `None` when either time is missing; such days contribute nothing
/// to attendance-based aggregates.
pub fn bucketed_hours(clock_in: Option<NaiveTime>, clock_out: Option<NaiveTime>) -> Option<Decimal> {
    Some(bucket_minutes(minutes_between(clock_in?, clock_out?)))
}

/// Bucketed worked hours for an attendance record.
pub fn worked_hours(record: &AttendanceRecord) -> Option<Decimal> {
    bucketed_hours(record.clock_in, record.clock_out)
}

/// Classifies dates as rest days.
///
/// A date is a rest day when it is a Saturday or Sunday, a listed company
/// holiday, or one of the fixed year-end/new-year dates.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::RestDayCalendar;
/// use salary_engine::config::RestDayConfig;
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// let calendar = RestDayCalendar::new(BTreeSet::new(), &RestDayConfig::default());
///
/// // 2024-04-06 is a Saturday
/// assert!(calendar.is_rest_day(NaiveDate::from_ymd_opt(2024, 4, 6).unwrap()));
/// // 2024-01-03 is a Wednesday inside the new-year window
/// assert!(calendar.is_rest_day(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
/// // 2024-04-08 is an ordinary Monday
/// assert!(!calendar.is_rest_day(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestDayCalendar {
    holidays: BTreeSet<NaiveDate>,
    year_end_window: Vec<MonthDay>,
}

impl RestDayCalendar {
    /// Creates a calendar from company holidays and the configured window.
    pub fn new(holidays: BTreeSet<NaiveDate>, config: &RestDayConfig) -> Self {
        Self {
            holidays,
            year_end_window: config.year_end_window.clone(),
        }
    }

    /// Returns true if `date` is a rest day.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            || self.holidays.contains(&date)
            || self.year_end_window.iter().any(|md| md.matches(date))
    }

    /// Returns true if `date` is a listed company holiday.
    pub fn is_company_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn calendar_with(holidays: &[NaiveDate]) -> RestDayCalendar {
        RestDayCalendar::new(holidays.iter().copied().collect(), &RestDayConfig::default())
    }

    /// TB-001: a 9h30m day buckets to 9.5 hours
    #[test]
    fn test_tb_001_exact_half_hours() {
        assert_eq!(bucketed_hours(Some(time(9, 0)), Some(time(18, 30))), Some(dec("9.5")));
    }

    /// TB-002: partial half-hours are truncated
    #[test]
    fn test_tb_002_partial_half_hour_truncated() {
        assert_eq!(bucketed_hours(Some(time(9, 0)), Some(time(10, 59))), Some(dec("1.5")));
        assert_eq!(bucketed_hours(Some(time(9, 0)), Some(time(9, 29))), Some(dec("0")));
    }

    /// TB-003: missing clock times contribute nothing
    #[test]
    fn test_tb_003_missing_times() {
        assert_eq!(bucketed_hours(None, Some(time(17, 0))), None);
        assert_eq!(bucketed_hours(Some(time(9, 0)), None), None);
        assert_eq!(bucketed_hours(None, None), None);
    }

    /// TB-004: clock-out before clock-in yields a negative duration, truncated toward zero
    #[test]
    fn test_tb_004_negative_duration_truncates_toward_zero() {
        // 22:00 -> 06:00 is -960 minutes
        assert_eq!(bucketed_hours(Some(time(22, 0)), Some(time(6, 0))), Some(dec("-8")));
        // -59 minutes is -1 unit, not -2
        assert_eq!(bucket_minutes(-59), dec("-0.5"));
    }

    #[test]
    fn test_worked_hours_uses_record_times() {
        let record = AttendanceRecord::worked(1, date(2024, 4, 1), time(8, 45), time(17, 20));
        // 515 minutes -> 17 units -> 8.5h
        assert_eq!(worked_hours(&record), Some(dec("8.5")));
    }

    /// RD-001: weekends are rest days
    #[test]
    fn test_rd_001_weekends() {
        let calendar = calendar_with(&[]);
        assert!(calendar.is_rest_day(date(2024, 4, 6))); // Saturday
        assert!(calendar.is_rest_day(date(2024, 4, 7))); // Sunday
        assert!(!calendar.is_rest_day(date(2024, 4, 5))); // Friday
    }

    /// RD-002: listed company holidays are rest days
    #[test]
    fn test_rd_002_company_holiday() {
        let calendar = calendar_with(&[date(2024, 4, 29)]);
        assert!(calendar.is_rest_day(date(2024, 4, 29))); // Monday holiday
        assert!(calendar.is_company_holiday(date(2024, 4, 29)));
        assert!(!calendar.is_rest_day(date(2024, 4, 30)));
    }

    /// RD-003: the year-end window applies on weekdays in any year
    #[test]
    fn test_rd_003_year_end_window() {
        let calendar = calendar_with(&[]);
        for (m, d) in [(12, 29), (12, 30), (12, 31), (1, 1), (1, 2), (1, 3), (1, 4)] {
            assert!(calendar.is_rest_day(date(2025, m, d)), "{m:02}/{d:02} should rest");
        }
        assert!(!calendar.is_rest_day(date(2025, 12, 26))); // Friday
        assert!(!calendar.is_rest_day(date(2025, 1, 6))); // Monday
    }

    proptest! {
        #[test]
        fn prop_bucketed_hours_never_exceed_raw_hours(minutes in 0i64..2880) {
            let hours = bucket_minutes(minutes);
            prop_assert!(hours * Decimal::from(60) <= Decimal::from(minutes));
            prop_assert!(Decimal::from(minutes) - hours * Decimal::from(60) < Decimal::from(30));
        }

        #[test]
        fn prop_bucketing_is_symmetric_around_zero(minutes in 0i64..2880) {
            prop_assert_eq!(bucket_minutes(-minutes), -bucket_minutes(minutes));
        }

        #[test]
        fn prop_bucketed_hours_have_half_hour_granularity(minutes in -2880i64..2880) {
            let doubled = bucket_minutes(minutes) * Decimal::from(2);
            prop_assert_eq!(doubled, doubled.trunc());
        }
    }
}
