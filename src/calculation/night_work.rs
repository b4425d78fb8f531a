//! Night work rule.
//!
//! Night minutes come from two windows around the working day: the early
//! morning before the early window end, and the late evening after the late
//! window start. A third term counts minutes from midnight to a clock-out in
//! the small hours. That term overlaps the other two for some shapes of day
//! and the overlap is counted twice.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::config::{EngineConfig, NightWindowConfig};
use crate::models::{AttendanceRecord, AuditStep};

use super::{BasePay, bucket_minutes, minutes_between, premium_amount, truncate_to_i64};

/// Night minutes for one day's clock times.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::night_minutes;
/// use salary_engine::config::NightWindowConfig;
/// use chrono::NaiveTime;
///
/// let windows = NightWindowConfig::default();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // 04:00 -> 23:00: 60 early minutes plus 60 late minutes
/// assert_eq!(night_minutes(t(4, 0), t(23, 0), &windows), 120);
/// // 09:00 -> 18:00: no night minutes
/// assert_eq!(night_minutes(t(9, 0), t(18, 0), &windows), 0);
/// ```
pub fn night_minutes(clock_in: NaiveTime, clock_out: NaiveTime, windows: &NightWindowConfig) -> i64 {
    let early = if clock_in <= windows.early_clock_in_cutoff {
        minutes_between(clock_in, windows.early_window_end)
    } else {
        0
    };
    let late = if clock_out >= windows.late_clock_out_cutoff {
        minutes_between(windows.late_window_start, clock_out)
    } else {
        0
    };
    let after_midnight = if clock_out <= windows.early_window_end {
        minutes_between(NaiveTime::default(), clock_out)
    } else {
        0
    };
    early + late + after_midnight
}

/// The result of the night work rule.
#[derive(Debug, Clone, PartialEq)]
pub struct NightWorkResult {
    /// Sum of per-day bucketed night hours.
    pub night_hours: Decimal,
    /// Recorded days with any night minutes.
    pub night_days: usize,
    /// Whole night work hours.
    pub night_work_hours: i64,
    /// Night work pay.
    pub night_work_salary: i64,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Calculates night work hours and salary.
///
/// Each recorded day's night minutes are bucketed on their own, then the
/// bucketed hours are summed.
pub fn calculate_night_work(
    attendance: &[AttendanceRecord],
    base_pay: &BasePay,
    config: &EngineConfig,
    step_number: u32,
) -> NightWorkResult {
    let windows = &config.night_windows;

    let daily_minutes: Vec<i64> = attendance
        .iter()
        .filter_map(AttendanceRecord::recorded_times)
        .map(|(clock_in, clock_out)| night_minutes(clock_in, clock_out, windows))
        .collect();
    let night_hours: Decimal = daily_minutes.iter().map(|m| bucket_minutes(*m)).sum();
    let night_days = daily_minutes.iter().filter(|m| **m != 0).count();

    let night_work_hours = truncate_to_i64(night_hours);
    let night_work_salary = premium_amount(
        base_pay.total(),
        config.standard_monthly_hours,
        config.premiums.night_work,
        night_hours,
    );

    NightWorkResult {
        night_hours,
        night_days,
        night_work_hours,
        night_work_salary,
        audit_step: AuditStep {
            step_number,
            rule_id: "night_work".to_string(),
            rule_name: "Night Work".to_string(),
            input: serde_json::json!({
                "recorded_days": daily_minutes.len(),
                "early_window": format!("..{}", windows.early_window_end),
                "late_window": format!("{}..", windows.late_window_start),
                "base_pay": base_pay.total(),
                "multiplier": config.premiums.night_work.to_string()
            }),
            output: serde_json::json!({
                "night_days": night_days,
                "night_hours": night_hours.to_string(),
                "night_work_hours": night_work_hours,
                "night_work_salary": night_work_salary
            }),
            reasoning: format!(
                "{} of {} recorded days had night minutes, {} bucketed hours",
                night_days,
                daily_minutes.len(),
                night_hours
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn worked(d: u32, clock_in: NaiveTime, clock_out: NaiveTime) -> AttendanceRecord {
        AttendanceRecord::worked(1, NaiveDate::from_ymd_opt(2024, 4, d).unwrap(), clock_in, clock_out)
    }

    fn base_pay() -> BasePay {
        BasePay {
            age_salary: 80_000,
            ability_salary: 50_000,
        }
    }

    fn windows() -> NightWindowConfig {
        NightWindowConfig::default()
    }

    /// NW-001: both windows count on a long day
    #[test]
    fn test_nw_001_both_windows() {
        assert_eq!(night_minutes(time(4, 0), time(23, 0), &windows()), 120);
    }

    /// NW-002: clock-in at the early cutoff counts
    #[test]
    fn test_nw_002_early_cutoff_inclusive() {
        assert_eq!(night_minutes(time(4, 30), time(13, 0), &windows()), 30);
        assert_eq!(night_minutes(time(4, 31), time(13, 0), &windows()), 0);
    }

    /// NW-003: late minutes need a clock-out at or after 22:30
    #[test]
    fn test_nw_003_late_cutoff() {
        assert_eq!(night_minutes(time(14, 0), time(22, 29), &windows()), 0);
        assert_eq!(night_minutes(time(14, 0), time(22, 30), &windows()), 30);
    }

    /// NW-004: an early clock-out double counts with the early window
    #[test]
    fn test_nw_004_early_clock_out_double_count() {
        // early: 03:00 -> 05:00 = 120, after midnight: 00:00 -> 04:00 = 240
        assert_eq!(night_minutes(time(3, 0), time(4, 0), &windows()), 360);
    }

    #[test]
    fn test_overnight_shift_after_midnight_term() {
        // clock-out earlier than clock-in: only the after-midnight term applies
        assert_eq!(night_minutes(time(20, 0), time(2, 0), &windows()), 120);
    }

    /// NW-005: per-day bucketing before summing
    #[test]
    fn test_nw_005_buckets_each_day() {
        let attendance = vec![
            worked(1, time(9, 0), time(22, 59)), // 59 minutes -> 0.5h
            worked(2, time(9, 0), time(22, 59)), // 59 minutes -> 0.5h
        ];
        let result = calculate_night_work(&attendance, &base_pay(), &EngineConfig::default(), 1);

        assert_eq!(result.night_hours, dec("1"));
        assert_eq!(result.night_work_hours, 1);
        assert_eq!(result.night_days, 2);
        // 130000 / 157.5 * 0.25 * 1 = 206.34...
        assert_eq!(result.night_work_salary, 206);
    }

    /// NW-006: salary uses the sum before truncation
    #[test]
    fn test_nw_006_salary_uses_untruncated_sum() {
        let attendance = vec![worked(1, time(4, 0), time(23, 0))]; // 2h
        let mut more = attendance.clone();
        more.push(worked(2, time(9, 0), time(22, 59))); // +0.5h
        let result = calculate_night_work(&more, &base_pay(), &EngineConfig::default(), 1);

        assert_eq!(result.night_hours, dec("2.5"));
        assert_eq!(result.night_work_hours, 2);
        // 130000 / 157.5 * 0.25 * 2.5 = 515.87...
        assert_eq!(result.night_work_salary, 515);
    }

    #[test]
    fn test_unrecorded_days_ignored() {
        let attendance = vec![AttendanceRecord::unrecorded(
            1,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        )];
        let result = calculate_night_work(&attendance, &base_pay(), &EngineConfig::default(), 1);
        assert_eq!(result.night_hours, Decimal::ZERO);
        assert_eq!(result.audit_step.input["recorded_days"], 0);
    }
}
