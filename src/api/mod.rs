//! HTTP API module for the calculation engine.
//!
//! This module provides the REST endpoints for payslip generation, shift
//! coverage evaluation, and missed-shift accounting.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockInRequest, ClockOutRequest, CreatePayslipRequest, CreateShiftRequest,
    UpdatePayslipRequest, UpdateStatusRequest,
};
pub use response::{ApiError, MissedShiftsResponse};
pub use state::AppState;
