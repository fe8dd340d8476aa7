//! Duration arithmetic shared by the coverage evaluator and the payroll
//! calculator.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Returns the elapsed minutes between two timestamps as a decimal.
///
/// Negative when `end` precedes `start`; callers decide how to treat
/// inverted ranges.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::from((end - start).num_seconds()) / Decimal::from(60)
}

/// Returns the elapsed hours between two timestamps as a decimal.
///
/// # Example
///
/// ```
/// use workday_engine::calculation::hours_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(hours_between(start, end), Decimal::from(8));
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::from((end - start).num_seconds()) / Decimal::from(3600)
}

/// Returns the positive overlap in minutes between `[a_start, a_end]` and
/// `[b_start, b_end]`, or zero when the ranges do not intersect.
pub fn overlap_minutes(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> Decimal {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        minutes_between(start, end)
    } else {
        Decimal::ZERO
    }
}

/// Rounds a value to two decimal places, midpoints away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to the nearest whole number, midpoints away from zero.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
