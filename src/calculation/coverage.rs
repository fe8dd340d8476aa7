//! Shift coverage evaluation.
//!
//! This module decides whether a scheduled shift was adequately covered by
//! an employee's clocked-in time, producing a reason string and a coverage
//! percentage. It is the leaf component of missed-shift accounting.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TimeEntry;

use super::hours::{hours_between, overlap_minutes, round2, round_whole};

/// Minimum coverage percentage for a shift to count as adequately attended.
pub const MIN_COVERAGE_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// The outcome of evaluating one shift's coverage.
///
/// Ephemeral: recomputed on every evaluation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Whether worked time reached [`MIN_COVERAGE_PERCENT`] of the window.
    pub is_adequate: bool,
    /// Human-readable explanation of the verdict.
    pub reason: String,
    /// Coverage percentage, rounded to a whole number.
    pub coverage_percent: Decimal,
    /// Hours of clocked time overlapping the shift window, 2 decimals.
    pub worked_hours: Decimal,
    /// Hours the shift required up to the evaluation time, 2 decimals.
    pub required_hours: Decimal,
}

impl CoverageResult {
    /// A terminal inadequate result carrying the full shift window as the
    /// requirement. Used when no worked time can be credited at all.
    fn terminal(reason: &str, shift_start: NaiveDateTime, shift_end: NaiveDateTime) -> Self {
        CoverageResult {
            is_adequate: false,
            reason: reason.to_string(),
            coverage_percent: Decimal::ZERO,
            worked_hours: Decimal::ZERO,
            required_hours: round2(hours_between(shift_start, shift_end)),
        }
    }
}

/// Evaluates how much of a shift window was covered by clocked-in time.
///
/// The evaluation window runs from `shift_start` to the earlier of
/// `shift_end` and `evaluation_time`, so an in-progress shift is judged only
/// on the portion that has already elapsed.
///
/// Rules:
///
/// - No entries at all is terminal: "No check-in found", zero coverage.
/// - An entry without a clock-out is credited up to `evaluation_time` while
///   the shift is still ongoing. Once the window has closed, a single
///   unclosed entry is terminal ("Never clocked out") regardless of any
///   other entries present.
/// - Overlaps are summed per entry without merging; entries that overlap
///   each other double-count the shared minutes.
/// - A zero-length evaluation window yields zero coverage rather than a
///   division error.
///
/// Never fails; "no data" is an inadequate result, not an error.
///
/// # Example
///
/// ```
/// use workday_engine::calculation::evaluate_coverage;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let result = evaluate_coverage(&[], start, end, end);
/// assert!(!result.is_adequate);
/// assert_eq!(result.reason, "No check-in found");
/// assert_eq!(result.required_hours, Decimal::from(8));
/// ```
pub fn evaluate_coverage(
    entries: &[TimeEntry],
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
    evaluation_time: NaiveDateTime,
) -> CoverageResult {
    if entries.is_empty() {
        return CoverageResult::terminal("No check-in found", shift_start, shift_end);
    }

    let window_end = shift_end.min(evaluation_time);
    let mut total_worked_minutes = Decimal::ZERO;

    for entry in entries {
        let effective_end = match entry.clock_out {
            Some(clock_out) => clock_out,
            // Still ongoing: credit the entry up to the evaluation time.
            None if evaluation_time < shift_end => evaluation_time,
            // Shift window closed but the entry was never closed.
            None => {
                return CoverageResult::terminal("Never clocked out", shift_start, shift_end);
            }
        };

        total_worked_minutes +=
            overlap_minutes(entry.clock_in, effective_end, shift_start, window_end);
    }

    let worked_hours = total_worked_minutes / Decimal::from(60);
    let required_hours = hours_between(shift_start, window_end);

    let coverage_percent = if required_hours <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        worked_hours / required_hours * Decimal::from(100)
    };

    let is_adequate = coverage_percent >= MIN_COVERAGE_PERCENT;
    let reason = if is_adequate {
        "Adequate coverage".to_string()
    } else {
        format!("Only {:.1}% coverage", coverage_percent)
    };

    CoverageResult {
        is_adequate,
        reason,
        coverage_percent: round_whole(coverage_percent),
        worked_hours: round2(worked_hours),
        required_hours: round2(required_hours),
    }
}
