//! Shift model.
//!
//! This module defines the Shift struct for representing scheduled work
//! windows assigned to an employee.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a scheduled work shift.
///
/// A shift's scheduled window may cross midnight; the store normalizes an
/// end at or before the start to the following day at creation, so a stored
/// shift always satisfies `start_time < end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee assigned to the shift.
    pub employee_id: String,
    /// The manager who scheduled the shift.
    pub manager_id: String,
    /// The calendar date of the shift (midnight normalized).
    pub date: NaiveDate,
    /// The scheduled start of the shift.
    pub start_time: NaiveDateTime,
    /// The scheduled end of the shift.
    pub end_time: NaiveDateTime,
    /// Unpaid break minutes within the shift.
    #[serde(default)]
    pub break_minutes: i64,
    /// Whether the shift has been published to the employee.
    #[serde(default)]
    pub is_published: bool,
    /// Whether the shift is open for another employee to claim. Open shifts
    /// are excluded from missed-shift accounting.
    #[serde(default)]
    pub is_open: bool,
}

impl Shift {
    /// Returns the scheduled hours for this shift, net of break minutes.
    ///
    /// This is the shift's contribution to a pay period's required hours; it
    /// reflects scheduled (not worked) time.
    ///
    /// # Example
    ///
    /// ```
    /// use workday_engine::models::Shift;
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     manager_id: "mgr_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     start_time: NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2026-03-02 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_minutes: 30,
    ///     is_published: true,
    ///     is_open: false,
    /// };
    /// assert_eq!(shift.scheduled_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn scheduled_hours(&self) -> Decimal {
        let scheduled_minutes = (self.end_time - self.start_time).num_minutes() - self.break_minutes;
        Decimal::from(scheduled_minutes) / Decimal::from(60)
    }

    /// Returns true if this shift's [start, end) window overlaps the given
    /// window.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}
