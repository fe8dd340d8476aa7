//! Payroll calculation.
//!
//! This module turns an employee's scheduled shifts and actual time entries
//! for a pay period into a pay breakdown: regular/overtime hour split, gross
//! pay from a derived hourly rate, and net pay after deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Deductions, DeductionsOverride, Employee, Shift, TimeEntry};

use super::hours::{hours_between, round2};

/// Worked hours beyond this per-entry threshold are paid as overtime.
pub const DAILY_OVERTIME_THRESHOLD_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Hour basis used to derive an hourly rate when no shifts were scheduled in
/// the period.
pub const DEFAULT_PERIOD_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// Overtime premium applied when no explicit overtime rate is supplied.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The result of a payroll calculation for one employee and pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Hours paid at the regular rate, 2 decimals.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate, 2 decimals.
    pub overtime_hours: Decimal,
    /// Pay before deductions, 2 decimals.
    pub gross_pay: Decimal,
    /// The wage basis amount the hourly rate was derived from.
    pub wage: Decimal,
    /// The applied overtime hourly rate, 2 decimals.
    pub overtime_rate: Decimal,
    /// Pay after deductions, 2 decimals.
    pub net_pay: Decimal,
    /// Equals `net_pay`; kept as a distinct field for downstream display.
    pub final_bill: Decimal,
    /// The deduction breakdown that was applied.
    pub deductions: Deductions,
}

/// Calculates the pay breakdown for an employee over a pay period.
///
/// `shifts` are the shifts whose scheduled windows intersect the period and
/// `entries` the time entries that fall in it; both are fetched by the
/// caller. The steps:
///
/// 1. Sum scheduled hours net of breaks across `shifts`. This is the
///    fallback hour basis for deriving an hourly rate from a salary, not a
///    measure of worked time.
/// 2. For each entry with both clock stamps, split its worked duration at
///    [`DAILY_OVERTIME_THRESHOLD_HOURS`] into regular and overtime hours.
///    The cap is per entry, not per calendar day.
/// 3. Derive the hourly rate from the employee's wage basis: a monthly wage
///    divides by the scheduled hours (or [`DEFAULT_PERIOD_HOURS`] when none
///    were scheduled); an annual wage is first divided by twelve.
/// 4. Price the hours, merge deduction overrides over the employee's stored
///    defaults, and net out the total.
///
/// # Errors
///
/// - [`EngineError::WageNotConfigured`] when the employee has no
///   compensation record.
/// - [`EngineError::UnsupportedPayType`] when the wage basis is neither
///   `"Monthly"` nor `"Annual"`.
///
/// # Example
///
/// ```
/// use workday_engine::calculation::calculate_pay;
/// use workday_engine::models::{Compensation, Deductions, Employee};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Dana Reyes".to_string(),
///     compensation: Some(Compensation {
///         wage: Decimal::from(4800),
///         pay_period: "Monthly".to_string(),
///     }),
///     deductions: Deductions::default(),
/// };
///
/// // No shifts scheduled: the 160-hour fallback yields a 30.00 hourly rate.
/// let breakdown = calculate_pay(&employee, &[], &[], None, None).unwrap();
/// assert_eq!(breakdown.gross_pay, Decimal::ZERO);
/// assert_eq!(breakdown.overtime_rate, Decimal::from(45));
/// ```
pub fn calculate_pay(
    employee: &Employee,
    shifts: &[Shift],
    entries: &[TimeEntry],
    overtime_rate: Option<Decimal>,
    deductions: Option<&DeductionsOverride>,
) -> EngineResult<PayBreakdown> {
    let compensation =
        employee
            .compensation
            .as_ref()
            .ok_or_else(|| EngineError::WageNotConfigured {
                employee_id: employee.id.clone(),
            })?;

    // Scheduled hours across the period, net of breaks.
    let required_hours: Decimal = shifts.iter().map(Shift::scheduled_hours).sum();

    // Split actual worked time into regular and overtime per entry.
    let mut regular_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;

    for entry in entries {
        if let Some(clock_out) = entry.clock_out {
            let worked = hours_between(entry.clock_in, clock_out);
            regular_hours += worked.min(DAILY_OVERTIME_THRESHOLD_HOURS);
            overtime_hours += (worked - DAILY_OVERTIME_THRESHOLD_HOURS).max(Decimal::ZERO);
        }
    }

    let rate_basis = if required_hours > Decimal::ZERO {
        required_hours
    } else {
        DEFAULT_PERIOD_HOURS
    };

    let hourly_rate = match compensation.pay_period.as_str() {
        "Monthly" => compensation.wage / rate_basis,
        "Annual" => compensation.wage / Decimal::from(12) / rate_basis,
        other => {
            return Err(EngineError::UnsupportedPayType {
                pay_type: other.to_string(),
            });
        }
    };

    let overtime_rate = overtime_rate.unwrap_or(hourly_rate * OVERTIME_MULTIPLIER);
    let gross_pay = regular_hours * hourly_rate + overtime_hours * overtime_rate;

    let applied_deductions = match deductions {
        Some(overrides) => employee.deductions.merged(overrides),
        None => employee.deductions.clone(),
    };
    let net_pay = gross_pay - applied_deductions.total();

    Ok(PayBreakdown {
        regular_hours: round2(regular_hours),
        overtime_hours: round2(overtime_hours),
        gross_pay: round2(gross_pay),
        wage: compensation.wage,
        overtime_rate: round2(overtime_rate),
        net_pay: round2(net_pay),
        final_bill: round2(net_pay),
        deductions: applied_deductions,
    })
}
