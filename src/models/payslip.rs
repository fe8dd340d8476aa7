//! Payslip model and status lifecycle.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Deductions;

/// Lifecycle status of a payslip.
///
/// Progresses draft → pending → approved → paid. Transitions are not
/// validated by the engine; a paid payslip can still be edited through the
/// recalculation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Freshly generated, not yet submitted for review.
    Draft,
    /// Awaiting approval.
    Pending,
    /// Approved for payment.
    Approved,
    /// Payment issued.
    Paid,
}

/// A generated payslip for one employee and one pay period.
///
/// At most one payslip exists per employee per exact
/// (`pay_period_start`, `pay_period_end`) pair; the store enforces this at
/// insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The employee the payslip was generated for.
    pub employee_id: String,
    /// Human-facing sequence number, `PS{year}{month}{seq:04}`.
    pub payslip_number: String,
    /// Start of the pay period (inclusive).
    pub pay_period_start: NaiveDateTime,
    /// End of the pay period (inclusive).
    pub pay_period_end: NaiveDateTime,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// The wage basis amount the hourly rate was derived from.
    pub wage: Decimal,
    /// The applied overtime hourly rate.
    pub overtime_rate: Decimal,
    /// Pay before deductions.
    pub gross_pay: Decimal,
    /// The deduction breakdown applied to this payslip.
    pub deductions: Deductions,
    /// Pay after deductions.
    pub net_pay: Decimal,
    /// Kept as a distinct field for downstream display; always equals
    /// `net_pay`.
    pub final_bill: Decimal,
    /// Lifecycle status.
    pub status: PayslipStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}
