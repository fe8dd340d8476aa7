//! HTTP request handlers for the engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CoverageResult, calculate_pay, count_missed_shifts, evaluate_coverage};
use crate::error::{EngineError, EngineResult};
use crate::models::{Payslip, Shift, TimeEntry};
use crate::store::MemoryStore;

use super::request::{
    ClockInRequest, ClockOutRequest, CreatePayslipRequest, CreateShiftRequest,
    UpdatePayslipRequest, UpdateStatusRequest,
};
use super::response::{ApiError, ApiErrorResponse, MissedShiftsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/payslips",
            post(create_payslip_handler).get(list_payslips_handler),
        )
        .route(
            "/payslips/:payslip_id",
            get(get_payslip_handler).put(update_payslip_handler),
        )
        .route("/payslips/:payslip_id/status", patch(update_status_handler))
        .route(
            "/employees/:employee_id/payslips",
            get(employee_payslips_handler),
        )
        .route(
            "/employees/:employee_id/missed-shifts",
            get(missed_shifts_handler),
        )
        .route(
            "/employees/:employee_id/shifts/:shift_id/coverage",
            get(shift_coverage_handler),
        )
        .route("/shifts", post(create_shift_handler))
        .route("/time-entries/clock-in", post(clock_in_handler))
        .route("/time-entries/:entry_id/clock-out", patch(clock_out_handler))
        .with_state(state)
}

/// Handler for `POST /payslips`.
///
/// Validates the pay period, runs the payroll calculation over the stored
/// shifts and time entries, and persists the resulting payslip.
async fn create_payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayslipRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip creation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match generate_payslip(state.store(), &request, Utc::now().naive_utc()) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                payslip_number = %payslip.payslip_number,
                gross_pay = %payslip.gross_pay,
                "Payslip created"
            );
            (StatusCode::CREATED, Json(payslip)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payslip creation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Runs the payroll calculation for a creation request and persists the
/// payslip.
fn generate_payslip(
    store: &MemoryStore,
    request: &CreatePayslipRequest,
    now: NaiveDateTime,
) -> EngineResult<Payslip> {
    if request.pay_period_start >= request.pay_period_end {
        return Err(EngineError::InvalidPayPeriod {
            message: "pay period start must be before its end".to_string(),
        });
    }

    let employee = store.employee(&request.employee_id)?;

    // Two independent range reads with no snapshot between them; a write
    // landing in between can skew a single run.
    let shifts = store.shifts_in_period(
        &request.employee_id,
        request.pay_period_start,
        request.pay_period_end,
    )?;
    let entries = store.entries_in_period(
        &request.employee_id,
        request.pay_period_start,
        request.pay_period_end,
    )?;

    let breakdown = calculate_pay(
        &employee,
        &shifts,
        &entries,
        request.overtime_rate,
        request.deductions.as_ref(),
    )?;

    store.insert_payslip(
        &request.employee_id,
        request.pay_period_start,
        request.pay_period_end,
        &breakdown,
        now.date(),
        request.notes.clone(),
    )
}

/// Handler for `GET /payslips`.
async fn list_payslips_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Payslip>>, ApiErrorResponse> {
    Ok(Json(state.store().payslips()?))
}

/// Handler for `GET /payslips/{payslip_id}`.
async fn get_payslip_handler(
    State(state): State<AppState>,
    Path(payslip_id): Path<Uuid>,
) -> Result<Json<Payslip>, ApiErrorResponse> {
    Ok(Json(state.store().payslip(payslip_id)?))
}

/// Handler for `GET /employees/{employee_id}/payslips`.
async fn employee_payslips_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<Payslip>>, ApiErrorResponse> {
    Ok(Json(state.store().payslips_for_employee(&employee_id)?))
}

/// Handler for `PUT /payslips/{payslip_id}`.
///
/// A status-only body skips recalculation and just persists the new status;
/// any other field re-runs the payroll calculation.
async fn update_payslip_handler(
    State(state): State<AppState>,
    Path(payslip_id): Path<Uuid>,
    Json(request): Json<UpdatePayslipRequest>,
) -> Result<Json<Payslip>, ApiErrorResponse> {
    let store = state.store();
    let existing = store.payslip(payslip_id)?;

    if request.is_status_only() {
        // is_status_only guarantees the status is present.
        let status = request.status.unwrap_or(existing.status);
        return Ok(Json(store.update_payslip_status(payslip_id, status)?));
    }

    Ok(Json(recalculate_payslip(store, &existing, &request)?))
}

/// Re-runs the payroll calculation for an updated payslip, keeping its id
/// and number.
fn recalculate_payslip(
    store: &MemoryStore,
    existing: &Payslip,
    request: &UpdatePayslipRequest,
) -> EngineResult<Payslip> {
    let period_start = request.pay_period_start.unwrap_or(existing.pay_period_start);
    let period_end = request.pay_period_end.unwrap_or(existing.pay_period_end);
    if period_start >= period_end {
        return Err(EngineError::InvalidPayPeriod {
            message: "pay period start must be before its end".to_string(),
        });
    }

    let employee = store.employee(&existing.employee_id)?;
    let shifts = store.shifts_in_period(&existing.employee_id, period_start, period_end)?;
    let entries = store.entries_in_period(&existing.employee_id, period_start, period_end)?;
    let breakdown = calculate_pay(
        &employee,
        &shifts,
        &entries,
        request.overtime_rate,
        request.deductions.as_ref(),
    )?;

    store.replace_payslip(Payslip {
        id: existing.id,
        employee_id: existing.employee_id.clone(),
        payslip_number: existing.payslip_number.clone(),
        pay_period_start: period_start,
        pay_period_end: period_end,
        regular_hours: breakdown.regular_hours,
        overtime_hours: breakdown.overtime_hours,
        wage: breakdown.wage,
        overtime_rate: breakdown.overtime_rate,
        gross_pay: breakdown.gross_pay,
        deductions: breakdown.deductions,
        net_pay: breakdown.net_pay,
        final_bill: breakdown.final_bill,
        status: request.status.unwrap_or(existing.status),
        notes: request.notes.clone().or_else(|| existing.notes.clone()),
    })
}

/// Handler for `PATCH /payslips/{payslip_id}/status`.
async fn update_status_handler(
    State(state): State<AppState>,
    Path(payslip_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Payslip>, ApiErrorResponse> {
    Ok(Json(
        state
            .store()
            .update_payslip_status(payslip_id, request.status)?,
    ))
}

/// Handler for `GET /employees/{employee_id}/missed-shifts`.
///
/// The badge is fail-open: any fetch failure resets the count to zero
/// rather than alarming on a transient error.
async fn missed_shifts_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Json<MissedShiftsResponse> {
    let now = Utc::now().naive_utc();
    let missed_count = match scan_missed_shifts(state.store(), &employee_id, now) {
        Ok(count) => count,
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                error = %err,
                "Missed-shift scan failed, badge reset to zero"
            );
            0
        }
    };
    Json(MissedShiftsResponse { missed_count })
}

/// Gathers an employee's schedule and clock state and runs the scanner.
fn scan_missed_shifts(
    store: &MemoryStore,
    employee_id: &str,
    now: NaiveDateTime,
) -> EngineResult<u32> {
    let shifts = store.shifts_for_employee(employee_id)?;
    let today_entries = store.entries_for_date(employee_id, now.date())?;
    let is_clocked_in = store.is_clocked_in(employee_id, now.date())?;

    Ok(count_missed_shifts(
        &shifts,
        &today_entries,
        is_clocked_in,
        now,
        |date| store.entries_for_date(employee_id, date),
    ))
}

/// Handler for `GET /employees/{employee_id}/shifts/{shift_id}/coverage`.
///
/// Evaluates the shift against its date's time entries at the current time.
async fn shift_coverage_handler(
    State(state): State<AppState>,
    Path((employee_id, shift_id)): Path<(String, String)>,
) -> Result<Json<CoverageResult>, ApiErrorResponse> {
    let store = state.store();
    let shift = store.shift(&shift_id)?;
    if shift.employee_id != employee_id {
        return Err(EngineError::ShiftNotFound { shift_id }.into());
    }

    let entries = store.entries_for_date(&employee_id, shift.date)?;
    let now = Utc::now().naive_utc();
    Ok(Json(evaluate_coverage(
        &entries,
        shift.start_time,
        shift.end_time,
        now,
    )))
}

/// Handler for `POST /shifts`.
async fn create_shift_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<(StatusCode, Json<Shift>), ApiErrorResponse> {
    let shift = state.store().create_shift(request.into())?;
    info!(
        shift_id = %shift.id,
        employee_id = %shift.employee_id,
        "Shift created"
    );
    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for `POST /time-entries/clock-in`.
async fn clock_in_handler(
    State(state): State<AppState>,
    Json(request): Json<ClockInRequest>,
) -> Result<(StatusCode, Json<TimeEntry>), ApiErrorResponse> {
    let at = request.clock_in.unwrap_or_else(|| Utc::now().naive_utc());
    let entry = state
        .store()
        .clock_in(&request.employee_id, &request.manager_id, at)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handler for `PATCH /time-entries/{entry_id}/clock-out`.
async fn clock_out_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<ClockOutRequest>,
) -> Result<Json<TimeEntry>, ApiErrorResponse> {
    Ok(Json(state.store().clock_out(entry_id, request.clock_out)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Compensation, Deductions, Employee};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn monthly_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Dana Reyes".to_string(),
            compensation: Some(Compensation {
                wage: dec("4800"),
                pay_period: "Monthly".to_string(),
            }),
            deductions: Deductions::default(),
        }
    }

    fn create_test_state() -> AppState {
        let store = MemoryStore::new();
        store.upsert_employee(monthly_employee()).unwrap();
        AppState::new(store)
    }

    fn payslip_body() -> String {
        serde_json::json!({
            "employee_id": "emp_001",
            "pay_period_start": "2026-03-01T00:00:00",
            "pay_period_end": "2026-03-31T23:59:59"
        })
        .to_string()
    }

    async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_create_payslip_returns_201() {
        let router = create_router(create_test_state());
        let (status, json) = post_json(router, "/payslips", payslip_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["employee_id"], "emp_001");
        assert_eq!(json["status"], "draft");
        assert!(json["payslip_number"].as_str().unwrap().starts_with("PS"));
    }

    #[tokio::test]
    async fn test_create_payslip_duplicate_returns_400() {
        let state = create_test_state();
        let router = create_router(state);

        let (first, _) = post_json(router.clone(), "/payslips", payslip_body()).await;
        assert_eq!(first, StatusCode::CREATED);

        let (second, json) = post_json(router, "/payslips", payslip_body()).await;
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "DUPLICATE_PAYSLIP");
    }

    #[tokio::test]
    async fn test_create_payslip_invalid_period_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "employee_id": "emp_001",
            "pay_period_start": "2026-03-31T00:00:00",
            "pay_period_end": "2026-03-01T00:00:00"
        })
        .to_string();

        let (status, json) = post_json(router, "/payslips", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_PAY_PERIOD");
    }

    #[tokio::test]
    async fn test_create_payslip_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "employee_id": "ghost",
            "pay_period_start": "2026-03-01T00:00:00",
            "pay_period_end": "2026-03-31T00:00:00"
        })
        .to_string();

        let (status, json) = post_json(router, "/payslips", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_payslip_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let (status, json) = post_json(router, "/payslips", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_create_payslip_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "pay_period_start": "2026-03-01T00:00:00",
            "pay_period_end": "2026-03-31T00:00:00"
        })
        .to_string();

        let (status, json) = post_json(router, "/payslips", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("employee_id"));
    }

    #[tokio::test]
    async fn test_create_shift_overlap_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "employee_id": "emp_001",
            "manager_id": "mgr_001",
            "date": "2026-03-02",
            "start_time": "09:00:00",
            "end_time": "17:00:00"
        })
        .to_string();

        let (first, _) = post_json(router.clone(), "/shifts", body.clone()).await;
        assert_eq!(first, StatusCode::CREATED);

        let overlapping = serde_json::json!({
            "employee_id": "emp_001",
            "manager_id": "mgr_001",
            "date": "2026-03-02",
            "start_time": "16:00:00",
            "end_time": "20:00:00"
        })
        .to_string();
        let (second, json) = post_json(router, "/shifts", overlapping).await;
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "SHIFT_OVERLAP");
    }

    #[tokio::test]
    async fn test_missed_shifts_badge_counts_past_unattended_shift() {
        let state = create_test_state();
        state
            .store()
            .create_shift(crate::store::NewShift {
                employee_id: "emp_001".to_string(),
                manager_id: "mgr_001".to_string(),
                date: chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                break_minutes: 0,
                is_open: false,
                is_published: true,
            })
            .unwrap();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_001/missed-shifts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["missed_count"], 1);
    }

    #[tokio::test]
    async fn test_coverage_endpoint_unknown_shift_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_001/shifts/ghost/coverage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
