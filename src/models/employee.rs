//! Employee model and related types.
//!
//! This module defines the Employee struct along with its compensation and
//! payroll-deduction sub-records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wage configuration for an employee.
///
/// The `pay_period` is the wage basis unit from which an hourly rate is
/// derived. The engine supports `"Monthly"` and `"Annual"`; any other value
/// makes payroll generation fail with an unsupported-pay-type error. The
/// basis is kept as a string so that failure stays representable for records
/// imported from upstream systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    /// The wage amount for one pay period.
    pub wage: Decimal,
    /// The wage basis unit ("Monthly" or "Annual").
    pub pay_period: String,
}

/// Default payroll deductions stored on an employee record.
///
/// Each field is a non-negative amount withheld from gross pay. Missing
/// fields deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    /// Income tax withholding.
    #[serde(default)]
    pub tax: Decimal,
    /// Social security contribution.
    #[serde(default)]
    pub social_security: Decimal,
    /// Medicare contribution.
    #[serde(default)]
    pub medicare: Decimal,
    /// Insurance premium.
    #[serde(default)]
    pub insurance: Decimal,
    /// Retirement plan contribution.
    #[serde(default)]
    pub retirement: Decimal,
}

impl Deductions {
    /// Returns the sum of all deduction fields.
    ///
    /// # Example
    ///
    /// ```
    /// use workday_engine::models::Deductions;
    /// use rust_decimal::Decimal;
    ///
    /// let deductions = Deductions {
    ///     tax: Decimal::new(10000, 2),        // 100.00
    ///     social_security: Decimal::new(5000, 2), // 50.00
    ///     ..Deductions::default()
    /// };
    /// assert_eq!(deductions.total(), Decimal::new(15000, 2));
    /// ```
    pub fn total(&self) -> Decimal {
        self.tax + self.social_security + self.medicare + self.insurance + self.retirement
    }

    /// Merges per-field overrides into these deductions, override winning.
    ///
    /// Fields absent from the override keep the stored default. Mirrors the
    /// merge applied when a payslip request supplies its own deductions.
    pub fn merged(&self, overrides: &DeductionsOverride) -> Deductions {
        Deductions {
            tax: overrides.tax.unwrap_or(self.tax),
            social_security: overrides.social_security.unwrap_or(self.social_security),
            medicare: overrides.medicare.unwrap_or(self.medicare),
            insurance: overrides.insurance.unwrap_or(self.insurance),
            retirement: overrides.retirement.unwrap_or(self.retirement),
        }
    }
}

/// Per-field deduction overrides supplied with a payslip request.
///
/// A field set to `Some` replaces the employee's stored default for that
/// field only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionsOverride {
    /// Override for income tax withholding.
    #[serde(default)]
    pub tax: Option<Decimal>,
    /// Override for social security contribution.
    #[serde(default)]
    pub social_security: Option<Decimal>,
    /// Override for medicare contribution.
    #[serde(default)]
    pub medicare: Option<Decimal>,
    /// Override for insurance premium.
    #[serde(default)]
    pub insurance: Option<Decimal>,
    /// Override for retirement plan contribution.
    #[serde(default)]
    pub retirement: Option<Decimal>,
}

/// Represents an employee subject to coverage and payroll evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Wage configuration; absent means payroll cannot be generated.
    #[serde(default)]
    pub compensation: Option<Compensation>,
    /// Default payroll deductions.
    #[serde(default)]
    pub deductions: Deductions,
}
