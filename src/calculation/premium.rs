//! Shared premium arithmetic.
//!
//! Premiums are a fraction of the hourly base-pay rate:
//! `base_pay / standard_monthly_hours * multiplier * hours`, truncated
//! toward zero to whole currency units. Operations run left to right in
//! that order.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Truncates toward zero and converts to whole units.
///
/// Values outside the `i64` range saturate.
pub fn truncate_to_i64(value: Decimal) -> i64 {
    let truncated = value.trunc();
    truncated.to_i64().unwrap_or(if truncated.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Computes a truncated premium amount.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::premium_amount;
/// use rust_decimal::Decimal;
///
/// // 130000 / 157.5 * 1.25 * 51.5 = 53134.92...
/// let amount = premium_amount(
///     130_000,
///     Decimal::new(1575, 1),
///     Decimal::new(125, 2),
///     Decimal::new(515, 1),
/// );
/// assert_eq!(amount, 53_134);
/// ```
pub fn premium_amount(
    base_pay: i64,
    standard_monthly_hours: Decimal,
    multiplier: Decimal,
    hours: Decimal,
) -> i64 {
    if standard_monthly_hours.is_zero() {
        return 0;
    }
    truncate_to_i64(Decimal::from(base_pay) / standard_monthly_hours * multiplier * hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_truncate_never_rounds_up() {
        assert_eq!(truncate_to_i64(dec("10.999")), 10);
        assert_eq!(truncate_to_i64(dec("-10.999")), -10);
        assert_eq!(truncate_to_i64(dec("0.5")), 0);
    }

    #[test]
    fn test_truncate_saturates() {
        assert_eq!(truncate_to_i64(Decimal::MAX), i64::MAX);
        assert_eq!(truncate_to_i64(Decimal::MIN), i64::MIN);
    }

    #[test]
    fn test_premium_amount_holiday_rate() {
        // 130000 / 157.5 * 0.1 * 16 = 1320.63...
        assert_eq!(
            premium_amount(130_000, dec("157.5"), dec("0.1"), dec("16")),
            1320
        );
    }

    #[test]
    fn test_premium_amount_zero_hours() {
        assert_eq!(premium_amount(130_000, dec("157.5"), dec("1.25"), Decimal::ZERO), 0);
    }

    #[test]
    fn test_premium_amount_zero_standard_hours_is_zero() {
        assert_eq!(premium_amount(130_000, Decimal::ZERO, dec("1.25"), dec("10")), 0);
    }
}
