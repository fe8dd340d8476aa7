//! In-memory record store.

use std::sync::RwLock;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{DAILY_OVERTIME_THRESHOLD_HOURS, PayBreakdown, hours_between, round2};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Payslip, PayslipStatus, Shift, TimeEntry};

/// Input for creating a shift.
///
/// Start and end are wall-clock times on the shift's date; an end at or
/// before the start means the shift runs into the next day.
#[derive(Debug, Clone)]
pub struct NewShift {
    /// The employee assigned to the shift.
    pub employee_id: String,
    /// The manager scheduling the shift.
    pub manager_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The wall-clock start time.
    pub start_time: NaiveTime,
    /// The wall-clock end time.
    pub end_time: NaiveTime,
    /// Unpaid break minutes within the shift.
    pub break_minutes: i64,
    /// Whether the shift is open for claiming.
    pub is_open: bool,
    /// Whether the shift is published to the employee.
    pub is_published: bool,
}

#[derive(Default)]
struct Records {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
    entries: Vec<TimeEntry>,
    payslips: Vec<Payslip>,
}

/// Thread-safe in-memory record store.
///
/// Writes that carry invariants (shift overlap, payslip uniqueness) perform
/// their check and insert under a single write lock, so concurrent requests
/// cannot race a duplicate past the check.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<std::sync::RwLockReadGuard<'_, Records>> {
        self.records.read().map_err(|_| EngineError::Store {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<std::sync::RwLockWriteGuard<'_, Records>> {
        self.records.write().map_err(|_| EngineError::Store {
            message: "store lock poisoned".to_string(),
        })
    }

    /// Inserts or replaces an employee record.
    pub fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut records = self.write()?;
        records.employees.retain(|e| e.id != employee.id);
        records.employees.push(employee);
        Ok(())
    }

    /// Looks up an employee by id.
    pub fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Creates a shift, rolling an end at or before the start to the next
    /// day and rejecting windows that overlap the employee's existing
    /// shifts.
    pub fn create_shift(&self, new_shift: NewShift) -> EngineResult<Shift> {
        let start_time = new_shift.date.and_time(new_shift.start_time);
        let mut end_time = new_shift.date.and_time(new_shift.end_time);
        if end_time <= start_time {
            end_time = end_time + Days::new(1);
        }

        let mut records = self.write()?;
        let overlapping = records
            .shifts
            .iter()
            .any(|s| s.employee_id == new_shift.employee_id && s.overlaps(start_time, end_time));
        if overlapping {
            return Err(EngineError::ShiftOverlap {
                employee_id: new_shift.employee_id,
            });
        }

        let shift = Shift {
            id: Uuid::new_v4().to_string(),
            employee_id: new_shift.employee_id,
            manager_id: new_shift.manager_id,
            date: new_shift.date,
            start_time,
            end_time,
            break_minutes: new_shift.break_minutes,
            is_published: new_shift.is_published,
            is_open: new_shift.is_open,
        };
        records.shifts.push(shift.clone());
        Ok(shift)
    }

    /// Looks up a shift by id.
    pub fn shift(&self, shift_id: &str) -> EngineResult<Shift> {
        self.read()?
            .shifts
            .iter()
            .find(|s| s.id == shift_id)
            .cloned()
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })
    }

    /// Returns all shifts assigned to an employee.
    pub fn shifts_for_employee(&self, employee_id: &str) -> EngineResult<Vec<Shift>> {
        Ok(self
            .read()?
            .shifts
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect())
    }

    /// Returns the employee's shifts whose scheduled window intersects the
    /// period: start in range, end in range, or spanning the whole range.
    pub fn shifts_in_period(
        &self,
        employee_id: &str,
        period_start: NaiveDateTime,
        period_end: NaiveDateTime,
    ) -> EngineResult<Vec<Shift>> {
        Ok(self
            .read()?
            .shifts
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .filter(|s| {
                (s.start_time >= period_start && s.start_time <= period_end)
                    || (s.end_time >= period_start && s.end_time <= period_end)
                    || (s.start_time <= period_start && s.end_time >= period_end)
            })
            .cloned()
            .collect())
    }

    /// Records a clock-in, returning the new open entry.
    pub fn clock_in(
        &self,
        employee_id: &str,
        manager_id: &str,
        at: NaiveDateTime,
    ) -> EngineResult<TimeEntry> {
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            manager_id: manager_id.to_string(),
            clock_in: at,
            clock_out: None,
            total_hours: None,
            overtime_hours: None,
        };
        self.write()?.entries.push(entry.clone());
        Ok(entry)
    }

    /// Records a clock-out on an entry, deriving its total and overtime
    /// hours from the clocked window.
    pub fn clock_out(&self, entry_id: Uuid, at: NaiveDateTime) -> EngineResult<TimeEntry> {
        let mut records = self.write()?;
        let entry = records
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| EngineError::TimeEntryNotFound {
                entry_id: entry_id.to_string(),
            })?;

        let worked = hours_between(entry.clock_in, at);
        entry.clock_out = Some(at);
        entry.total_hours = Some(round2(worked));
        entry.overtime_hours = Some(round2(
            (worked - DAILY_OVERTIME_THRESHOLD_HOURS).max(Decimal::ZERO),
        ));
        Ok(entry.clone())
    }

    /// Returns the employee's entries whose clock-in falls on the given
    /// date, most recent first.
    pub fn entries_for_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        let mut entries: Vec<TimeEntry> = self
            .read()?
            .entries
            .iter()
            .filter(|e| e.employee_id == employee_id && e.clock_in.date() == date)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        Ok(entries)
    }

    /// Returns the employee's entries intersecting the period: clock-in in
    /// range, clock-out in range, or spanning the whole range.
    pub fn entries_in_period(
        &self,
        employee_id: &str,
        period_start: NaiveDateTime,
        period_end: NaiveDateTime,
    ) -> EngineResult<Vec<TimeEntry>> {
        Ok(self
            .read()?
            .entries
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .filter(|e| {
                (e.clock_in >= period_start && e.clock_in <= period_end)
                    || e
                        .clock_out
                        .is_some_and(|out| out >= period_start && out <= period_end)
                    || (e.clock_in <= period_start
                        && e.clock_out.is_some_and(|out| out >= period_end))
            })
            .cloned()
            .collect())
    }

    /// Returns true if the employee has an open entry clocked in on the
    /// given date.
    pub fn is_clocked_in(&self, employee_id: &str, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.read()?.entries.iter().any(|e| {
            e.employee_id == employee_id && e.clock_in.date() == date && e.clock_out.is_none()
        }))
    }

    /// Persists a new payslip from a calculated breakdown.
    ///
    /// The uniqueness check on (employee, period start, period end) and the
    /// insert happen under one write lock, so concurrent creations cannot
    /// both pass the check. The payslip number is sequenced within the
    /// calendar month of `issued_on`.
    pub fn insert_payslip(
        &self,
        employee_id: &str,
        period_start: NaiveDateTime,
        period_end: NaiveDateTime,
        breakdown: &PayBreakdown,
        issued_on: NaiveDate,
        notes: Option<String>,
    ) -> EngineResult<Payslip> {
        let mut records = self.write()?;

        let duplicate = records.payslips.iter().any(|p| {
            p.employee_id == employee_id
                && p.pay_period_start == period_start
                && p.pay_period_end == period_end
        });
        if duplicate {
            return Err(EngineError::DuplicatePayslip {
                employee_id: employee_id.to_string(),
                period_start,
                period_end,
            });
        }

        let payslip_number = next_payslip_number(&records.payslips, issued_on);
        let payslip = Payslip {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            payslip_number,
            pay_period_start: period_start,
            pay_period_end: period_end,
            regular_hours: breakdown.regular_hours,
            overtime_hours: breakdown.overtime_hours,
            wage: breakdown.wage,
            overtime_rate: breakdown.overtime_rate,
            gross_pay: breakdown.gross_pay,
            deductions: breakdown.deductions.clone(),
            net_pay: breakdown.net_pay,
            final_bill: breakdown.final_bill,
            status: PayslipStatus::Draft,
            notes,
        };
        records.payslips.push(payslip.clone());
        Ok(payslip)
    }

    /// Looks up a payslip by id.
    pub fn payslip(&self, payslip_id: Uuid) -> EngineResult<Payslip> {
        self.read()?
            .payslips
            .iter()
            .find(|p| p.id == payslip_id)
            .cloned()
            .ok_or_else(|| EngineError::PayslipNotFound {
                payslip_id: payslip_id.to_string(),
            })
    }

    /// Returns all payslips, most recent period first.
    pub fn payslips(&self) -> EngineResult<Vec<Payslip>> {
        let mut payslips = self.read()?.payslips.clone();
        payslips.sort_by(|a, b| b.pay_period_end.cmp(&a.pay_period_end));
        Ok(payslips)
    }

    /// Returns an employee's payslips, most recent period first.
    pub fn payslips_for_employee(&self, employee_id: &str) -> EngineResult<Vec<Payslip>> {
        let mut payslips: Vec<Payslip> = self
            .read()?
            .payslips
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect();
        payslips.sort_by(|a, b| b.pay_period_end.cmp(&a.pay_period_end));
        Ok(payslips)
    }

    /// Updates only the status of a payslip, leaving pay fields untouched.
    pub fn update_payslip_status(
        &self,
        payslip_id: Uuid,
        status: PayslipStatus,
    ) -> EngineResult<Payslip> {
        let mut records = self.write()?;
        let payslip = records
            .payslips
            .iter_mut()
            .find(|p| p.id == payslip_id)
            .ok_or_else(|| EngineError::PayslipNotFound {
                payslip_id: payslip_id.to_string(),
            })?;
        payslip.status = status;
        Ok(payslip.clone())
    }

    /// Replaces a payslip's contents after recalculation, keeping its id and
    /// number and re-checking period uniqueness against other payslips.
    pub fn replace_payslip(&self, updated: Payslip) -> EngineResult<Payslip> {
        let mut records = self.write()?;

        let duplicate = records.payslips.iter().any(|p| {
            p.id != updated.id
                && p.employee_id == updated.employee_id
                && p.pay_period_start == updated.pay_period_start
                && p.pay_period_end == updated.pay_period_end
        });
        if duplicate {
            return Err(EngineError::DuplicatePayslip {
                employee_id: updated.employee_id.clone(),
                period_start: updated.pay_period_start,
                period_end: updated.pay_period_end,
            });
        }

        let payslip = records
            .payslips
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| EngineError::PayslipNotFound {
                payslip_id: updated.id.to_string(),
            })?;
        *payslip = updated;
        Ok(payslip.clone())
    }
}

/// Next payslip number within the month of `issued_on`:
/// `PS{year}{month:02}{sequence:04}`.
fn next_payslip_number(payslips: &[Payslip], issued_on: NaiveDate) -> String {
    let prefix = format!("PS{}{:02}", issued_on.year(), issued_on.month());
    let last_sequence = payslips
        .iter()
        .filter_map(|p| p.payslip_number.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:04}", last_sequence + 1)
}
