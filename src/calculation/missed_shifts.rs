//! Missed-shift accounting.
//!
//! This module scans an employee's shifts for today and for past dates,
//! evaluates each one's coverage, and aggregates the missed count shown as a
//! badge in the dashboard.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::{Shift, TimeEntry};

use super::coverage::evaluate_coverage;

/// Minutes after a shift's scheduled start before absence can be flagged.
pub const GRACE_PERIOD_MINUTES: i64 = 15;

/// Counts the shifts an employee missed or attended inadequately.
///
/// Rules, per shift:
///
/// - Open (claimable) shifts are skipped entirely.
/// - A shift dated today becomes eligible only once `now` is past its start
///   plus [`GRACE_PERIOD_MINUTES`]. It is then evaluated against today's
///   entries at `now`, except that the currently active shift is not counted
///   while the employee is clocked in — an in-progress, properly attended
///   shift must not be flagged before it ends.
/// - A shift dated before today is judged as fully elapsed: its date's
///   entries are fetched through `fetch_entries_for_date` and evaluated at
///   the shift end. A failed fetch counts the shift as missed rather than
///   skipping it, biasing toward flagging over hiding problems.
/// - Shifts dated after today are not evaluated.
///
/// `is_clocked_in` is determined by the caller (whether the employee has an
/// open entry right now). The scanner itself never fails; callers that want
/// the badge's fail-open behavior reset the count to zero when their own
/// record fetches error out.
pub fn count_missed_shifts<F>(
    shifts: &[Shift],
    today_entries: &[TimeEntry],
    is_clocked_in: bool,
    now: NaiveDateTime,
    fetch_entries_for_date: F,
) -> u32
where
    F: Fn(NaiveDate) -> EngineResult<Vec<TimeEntry>>,
{
    let today = now.date();

    let active_shift_id = shifts
        .iter()
        .find(|shift| {
            !shift.is_open
                && shift.date == today
                && shift.start_time <= now
                && now <= shift.end_time
        })
        .map(|shift| shift.id.as_str());

    let mut missed_count = 0;

    for shift in shifts {
        if shift.is_open {
            continue;
        }

        if shift.date == today {
            let grace_end = shift.start_time + Duration::minutes(GRACE_PERIOD_MINUTES);
            if now <= grace_end {
                // Not yet eligible to be missed.
                continue;
            }

            let coverage =
                evaluate_coverage(today_entries, shift.start_time, shift.end_time, now);

            let is_active_and_clocked_in =
                active_shift_id == Some(shift.id.as_str()) && is_clocked_in;

            if !is_active_and_clocked_in && !coverage.is_adequate {
                missed_count += 1;
            }
        } else if shift.date < today {
            match fetch_entries_for_date(shift.date) {
                Ok(entries) => {
                    let coverage = evaluate_coverage(
                        &entries,
                        shift.start_time,
                        shift.end_time,
                        shift.end_time,
                    );
                    if !coverage.is_adequate {
                        missed_count += 1;
                    }
                }
                // Fail-safe: an unreadable day counts as missed.
                Err(_) => missed_count += 1,
            }
        }
    }

    missed_count
}
