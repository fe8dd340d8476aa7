//! Time entry model.
//!
//! A time entry is created when an employee clocks in and mutated exactly
//! once when they clock out; it is never deleted by this engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single clock-in/clock-out record for an employee.
///
/// A missing `clock_out` means the employee is either still clocked in or
/// forgot to clock out; the coverage evaluator disambiguates the two by
/// comparing the evaluation time against the shift window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// The manager responsible for the employee.
    pub manager_id: String,
    /// When the employee clocked in.
    pub clock_in: NaiveDateTime,
    /// When the employee clocked out, if they have.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Total worked hours, derived on clock-out (2 decimals).
    #[serde(default)]
    pub total_hours: Option<Decimal>,
    /// Overtime hours beyond the daily threshold, derived on clock-out
    /// (2 decimals).
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
}

impl TimeEntry {
    /// Returns true if the entry has no clock-out yet.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_entry_without_clock_out_is_open() {
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            manager_id: "mgr_001".to_string(),
            clock_in: make_datetime("2026-03-02", "09:00:00"),
            clock_out: None,
            total_hours: None,
            overtime_hours: None,
        };
        assert!(entry.is_open());
    }

    #[test]
    fn test_entry_with_clock_out_is_closed() {
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            manager_id: "mgr_001".to_string(),
            clock_in: make_datetime("2026-03-02", "09:00:00"),
            clock_out: Some(make_datetime("2026-03-02", "17:00:00")),
            total_hours: Some(Decimal::new(800, 2)),
            overtime_hours: Some(Decimal::ZERO),
        };
        assert!(!entry.is_open());
    }

    #[test]
    fn test_deserialization_defaults_optional_fields() {
        let json = r#"{
            "id": "7f8a1f9c-52aa-4f6e-9a27-4cf35f0a8c11",
            "employee_id": "emp_001",
            "manager_id": "mgr_001",
            "clock_in": "2026-03-02T09:00:00"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert!(entry.clock_out.is_none());
        assert!(entry.total_hours.is_none());
        assert!(entry.overtime_hours.is_none());
        assert_eq!(
            entry.clock_in.date(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            manager_id: "mgr_001".to_string(),
            clock_in: make_datetime("2026-03-02", "09:00:00"),
            clock_out: Some(make_datetime("2026-03-02", "18:30:00")),
            total_hours: Some(Decimal::new(950, 2)),
            overtime_hours: Some(Decimal::new(150, 2)),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
