//! Response types for the engine API.
//!
//! This module defines the error response structures, the HTTP status
//! mapping for engine errors, and small response bodies that have no
//! dedicated model.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Badge payload for the missed-shift count endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissedShiftsResponse {
    /// Number of missed or inadequately attended shifts.
    pub missed_count: u32,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::WageNotConfigured { employee_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "WAGE_NOT_CONFIGURED",
                    message,
                    format!("Employee '{employee_id}' has no compensation record"),
                ),
            },
            EngineError::UnsupportedPayType { pay_type } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_PAY_TYPE",
                    message,
                    format!("Pay period type '{pay_type}' is not Monthly or Annual"),
                ),
            },
            EngineError::DuplicatePayslip { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("DUPLICATE_PAYSLIP", message),
            },
            EngineError::InvalidPayPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PAY_PERIOD", message),
            },
            EngineError::PayslipNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PAYSLIP_NOT_FOUND", message),
            },
            EngineError::ShiftNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", message),
            },
            EngineError::TimeEntryNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("TIME_ENTRY_NOT_FOUND", message),
            },
            EngineError::ShiftOverlap { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("SHIFT_OVERLAP", message),
            },
            EngineError::Store { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("STORE_ERROR", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_employee_not_found_maps_to_404() {
        let engine_error = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(api_error.error.message.contains("emp_404"));
    }

    #[test]
    fn test_duplicate_payslip_maps_to_400() {
        let engine_error = EngineError::DuplicatePayslip {
            employee_id: "emp_001".to_string(),
            period_start: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            period_end: chrono::NaiveDate::from_ymd_opt(2026, 3, 31)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "DUPLICATE_PAYSLIP");
    }

    #[test]
    fn test_unsupported_pay_type_maps_to_400_with_details() {
        let engine_error = EngineError::UnsupportedPayType {
            pay_type: "Weekly".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "UNSUPPORTED_PAY_TYPE");
        assert!(api_error.error.details.unwrap().contains("Weekly"));
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let engine_error = EngineError::Store {
            message: "lock poisoned".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STORE_ERROR");
    }

    #[test]
    fn test_missed_shifts_response_serialization() {
        let response = MissedShiftsResponse { missed_count: 3 };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"missed_count\":3}");
    }
}
