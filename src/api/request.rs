//! Request types for the engine API.
//!
//! This module defines the JSON request structures for the payslip, shift,
//! and time-entry endpoints.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DeductionsOverride, PayslipStatus};
use crate::store::NewShift;

/// Request body for `POST /payslips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayslipRequest {
    /// The employee to generate the payslip for.
    pub employee_id: String,
    /// Start of the pay period (inclusive).
    pub pay_period_start: NaiveDateTime,
    /// End of the pay period (inclusive).
    pub pay_period_end: NaiveDateTime,
    /// Optional explicit overtime hourly rate; derived from the regular
    /// rate when absent.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Optional per-field deduction overrides.
    #[serde(default)]
    pub deductions: Option<DeductionsOverride>,
    /// Free-form notes to store on the payslip.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `PUT /payslips/{id}`.
///
/// A body carrying only `status` skips recalculation entirely; any other
/// field triggers a fresh calculation over the (possibly updated) period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePayslipRequest {
    /// New pay period start; keeps the stored one when absent.
    #[serde(default)]
    pub pay_period_start: Option<NaiveDateTime>,
    /// New pay period end; keeps the stored one when absent.
    #[serde(default)]
    pub pay_period_end: Option<NaiveDateTime>,
    /// Optional explicit overtime hourly rate for the recalculation.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Optional per-field deduction overrides for the recalculation.
    #[serde(default)]
    pub deductions: Option<DeductionsOverride>,
    /// New lifecycle status.
    #[serde(default)]
    pub status: Option<PayslipStatus>,
    /// Replacement notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdatePayslipRequest {
    /// True when the body changes the status and nothing else.
    pub fn is_status_only(&self) -> bool {
        self.status.is_some()
            && self.pay_period_start.is_none()
            && self.pay_period_end.is_none()
            && self.overtime_rate.is_none()
            && self.deductions.is_none()
            && self.notes.is_none()
    }
}

/// Request body for `PATCH /payslips/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new lifecycle status.
    pub status: PayslipStatus,
}

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The employee assigned to the shift.
    pub employee_id: String,
    /// The manager scheduling the shift.
    pub manager_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Wall-clock start time on that date.
    pub start_time: NaiveTime,
    /// Wall-clock end time; at or before the start means next day.
    pub end_time: NaiveTime,
    /// Unpaid break minutes within the shift.
    #[serde(default)]
    pub break_minutes: i64,
    /// Whether the shift is open for claiming.
    #[serde(default)]
    pub is_open: bool,
    /// Whether the shift is published to the employee.
    #[serde(default)]
    pub is_published: bool,
}

impl From<CreateShiftRequest> for NewShift {
    fn from(req: CreateShiftRequest) -> Self {
        NewShift {
            employee_id: req.employee_id,
            manager_id: req.manager_id,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            break_minutes: req.break_minutes,
            is_open: req.is_open,
            is_published: req.is_published,
        }
    }
}

/// Request body for `POST /time-entries/clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// The employee clocking in.
    pub employee_id: String,
    /// The manager responsible for the employee.
    pub manager_id: String,
    /// Explicit clock-in time; the current time when absent.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
}

/// Request body for `PATCH /time-entries/{id}/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The clock-out time to record.
    pub clock_out: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_create_payslip_request() {
        let json = r#"{
            "employee_id": "emp_001",
            "pay_period_start": "2026-03-01T00:00:00",
            "pay_period_end": "2026-03-31T00:00:00",
            "overtime_rate": "45",
            "deductions": { "tax": "120" }
        }"#;

        let request: CreatePayslipRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert_eq!(request.overtime_rate, Some(Decimal::new(45, 0)));
        assert_eq!(
            request.deductions.unwrap().tax,
            Some(Decimal::new(120, 0))
        );
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_deserialize_create_payslip_minimal() {
        let json = r#"{
            "employee_id": "emp_001",
            "pay_period_start": "2026-03-01T00:00:00",
            "pay_period_end": "2026-03-31T00:00:00"
        }"#;

        let request: CreatePayslipRequest = serde_json::from_str(json).unwrap();
        assert!(request.overtime_rate.is_none());
        assert!(request.deductions.is_none());
    }

    #[test]
    fn test_status_only_update_detection() {
        let status_only: UpdatePayslipRequest =
            serde_json::from_str(r#"{ "status": "approved" }"#).unwrap();
        assert!(status_only.is_status_only());

        let recalc: UpdatePayslipRequest = serde_json::from_str(
            r#"{ "status": "approved", "pay_period_start": "2026-03-01T00:00:00" }"#,
        )
        .unwrap();
        assert!(!recalc.is_status_only());

        let empty: UpdatePayslipRequest = serde_json::from_str("{}").unwrap();
        assert!(!empty.is_status_only());
    }

    #[test]
    fn test_create_shift_request_converts_to_new_shift() {
        let json = r#"{
            "employee_id": "emp_001",
            "manager_id": "mgr_001",
            "date": "2026-03-02",
            "start_time": "22:00:00",
            "end_time": "06:00:00",
            "break_minutes": 30
        }"#;

        let request: CreateShiftRequest = serde_json::from_str(json).unwrap();
        let new_shift: NewShift = request.into();
        assert_eq!(new_shift.break_minutes, 30);
        assert!(!new_shift.is_open);
        assert!(!new_shift.is_published);
    }

    #[test]
    fn test_clock_in_request_time_is_optional() {
        let json = r#"{ "employee_id": "emp_001", "manager_id": "mgr_001" }"#;
        let request: ClockInRequest = serde_json::from_str(json).unwrap();
        assert!(request.clock_in.is_none());
    }
}
