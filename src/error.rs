//! Error types for the calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while evaluating coverage or
//! generating payslips.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the calculation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use workday_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee record exists for the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// The employee record has no compensation configured.
    #[error("Employee wage information not found: {employee_id}")]
    WageNotConfigured {
        /// The employee id without a wage.
        employee_id: String,
    },

    /// The employee's pay-period type is outside the supported enum.
    #[error("Unsupported pay type: {pay_type}")]
    UnsupportedPayType {
        /// The unrecognized pay-period value.
        pay_type: String,
    },

    /// A payslip already exists for this employee and exact pay period.
    #[error("Payslip for this period already exists: {employee_id} {period_start}..{period_end}")]
    DuplicatePayslip {
        /// The employee the payslip was generated for.
        employee_id: String,
        /// The start of the duplicated pay period.
        period_start: NaiveDateTime,
        /// The end of the duplicated pay period.
        period_end: NaiveDateTime,
    },

    /// The pay period range is malformed (start is not before end).
    #[error("Invalid pay period: {message}")]
    InvalidPayPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// No payslip record exists for the given id.
    #[error("Payslip not found: {payslip_id}")]
    PayslipNotFound {
        /// The payslip id that was not found.
        payslip_id: String,
    },

    /// No shift record exists for the given id.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was not found.
        shift_id: String,
    },

    /// No time entry record exists for the given id.
    #[error("Time entry not found: {entry_id}")]
    TimeEntryNotFound {
        /// The time entry id that was not found.
        entry_id: String,
    },

    /// The shift window overlaps an existing shift for the same employee.
    #[error("Shift overlaps with an existing shift for employee {employee_id}")]
    ShiftOverlap {
        /// The employee whose schedule already covers this window.
        employee_id: String,
    },

    /// A storage lookup failed.
    #[error("Store error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "emp_001".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_001");
    }

    #[test]
    fn test_wage_not_configured_displays_id() {
        let error = EngineError::WageNotConfigured {
            employee_id: "emp_007".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee wage information not found: emp_007"
        );
    }

    #[test]
    fn test_unsupported_pay_type_displays_value() {
        let error = EngineError::UnsupportedPayType {
            pay_type: "Weekly".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported pay type: Weekly");
    }

    #[test]
    fn test_duplicate_payslip_displays_period() {
        let error = EngineError::DuplicatePayslip {
            employee_id: "emp_001".to_string(),
            period_start: datetime(2026, 3, 1, 0),
            period_end: datetime(2026, 3, 31, 0),
        };
        let message = error.to_string();
        assert!(message.contains("emp_001"));
        assert!(message.contains("2026-03-01"));
        assert!(message.contains("2026-03-31"));
    }

    #[test]
    fn test_invalid_pay_period_displays_message() {
        let error = EngineError::InvalidPayPeriod {
            message: "start must be before end".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid pay period: start must be before end");
    }

    #[test]
    fn test_shift_overlap_displays_employee() {
        let error = EngineError::ShiftOverlap {
            employee_id: "emp_003".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Shift overlaps with an existing shift for employee emp_003"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
