//! Response types for the attendance engine API.
//!
//! This module defines the success payloads that differ from the domain
//! types, the error response structure, and the mapping from engine errors to
//! HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, EmployeeTotals};
use crate::reconciliation::RangeSummary;

/// Per-employee totals as returned by `POST /summaries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsResponse {
    /// Sum of worked minutes.
    pub worked_minutes: u32,
    /// Worked time in hours, two decimal places.
    pub worked_hours: Decimal,
    /// Sum of late minutes.
    pub late_minutes: u32,
    /// Sum of overtime minutes.
    pub overtime_minutes: u32,
    /// Number of absent days.
    pub absent_days: u32,
}

impl From<EmployeeTotals> for TotalsResponse {
    fn from(totals: EmployeeTotals) -> Self {
        Self {
            worked_minutes: totals.worked_minutes,
            worked_hours: totals.worked_hours(),
            late_minutes: totals.late_minutes,
            overtime_minutes: totals.overtime_minutes,
            absent_days: totals.absent_days,
        }
    }
}

/// Response body for `POST /summaries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// One record per employee per reported date.
    pub records: Vec<AttendanceRecord>,
    /// Totals keyed by employee id.
    pub totals_by_employee: BTreeMap<String, TotalsResponse>,
}

impl From<RangeSummary> for SummaryResponse {
    fn from(summary: RangeSummary) -> Self {
        Self {
            records: summary.records,
            totals_by_employee: summary
                .totals_by_employee
                .into_iter()
                .map(|(employee, totals)| (employee, totals.into()))
                .collect(),
        }
    }
}

/// Response body for `POST /distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// Great-circle distance in metres.
    pub distance_m: f64,
}

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
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
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
            EngineError::InvalidClockTime { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Invalid clock time '{}', expected HH:MM",
                    value
                )),
            },
            EngineError::InvalidLeaveTransition { id, status } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_LEAVE_TRANSITION",
                    format!("Leave request '{}' is already {}", id, status),
                    "Only pending leave requests can be approved or rejected",
                ),
            },
            EngineError::InvalidDateRange { from, to } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    format!("date_from {} is after date_to {}", from, to),
                    "The summary range must start on or before its last day",
                ),
            },
            EngineError::RangeTooLong { from, to, days, max } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RANGE_TOO_LONG",
                    format!("{} to {} spans {} days", from, to, days),
                    format!("At most {} days can be requested at once", max),
                ),
            },
        }
    }
}
