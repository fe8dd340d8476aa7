//! Core data models for the calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payslip;
mod shift;
mod time_entry;

pub use employee::{Compensation, Deductions, DeductionsOverride, Employee};
pub use payslip::{Payslip, PayslipStatus};
pub use shift::Shift;
pub use time_entry::TimeEntry;
