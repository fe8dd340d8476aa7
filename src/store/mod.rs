//! Record storage for the engine.
//!
//! The engine's computations are pure; this module supplies the collaborator
//! they read from. [`MemoryStore`] is an in-process stand-in for the real
//! database: it mirrors the range queries payroll and coverage evaluation
//! depend on, enforces the shift-overlap and payslip-uniqueness invariants
//! at write time, and owns the clock-in/clock-out lifecycle.

mod memory;

pub use memory::{MemoryStore, NewShift};
