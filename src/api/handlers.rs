//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::reconciliation::{
    DayBucket, aggregate_for_dashboard, distance_meters, reconcile_day, summarize_range,
};

use super::request::{
    DashboardRequest, DistanceRequest, GeofenceCheckRequest, LeaveDecisionRequest,
    ReconcileDayRequest, SummaryRequest,
};
use super::response::{ApiError, ApiErrorResponse, DistanceResponse, SummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(shifts_handler))
        .route("/reconcile/day", post(reconcile_day_handler))
        .route("/summaries", post(summaries_handler))
        .route("/dashboard", post(dashboard_handler))
        .route("/distance", post(distance_handler))
        .route("/geofence/check", post(geofence_check_handler))
        .route("/leave/decision", post(leave_decision_handler))
        .with_state(state)
}

// ============================================================================
// Response helpers
// ============================================================================

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body extraction failure to a 400 with a stable error code.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    json_response(StatusCode::BAD_REQUEST, error)
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for GET /shifts.
///
/// Lists the configured shift catalog.
async fn shifts_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().catalog().shifts())
}

/// Handler for POST /reconcile/day.
///
/// Reconciles one employee-day against the requested (or default) shift.
async fn reconcile_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day reconciliation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let events = request.day_events();
    let bucket = DayBucket::from_events(&events);
    let shift = state.config().catalog().lookup(request.shift_code.as_deref());
    let record = reconcile_day(
        &request.employee_id,
        request.date,
        &bucket,
        shift,
        request.branch_id.as_deref(),
        &request.leave_requests,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        status = %record.status,
        events = bucket.len(),
        ignored_events = request.events.len() - events.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Day reconciled"
    );
    json_response(StatusCode::OK, record)
}

/// Handler for POST /summaries.
///
/// Reconciles every rostered employee over a date range and totals the
/// results per employee.
async fn summaries_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let (snapshot, range) = match request.into_parts() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Summary request rejected"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let summary = summarize_range(&snapshot, state.config().catalog(), &range);

    info!(
        correlation_id = %correlation_id,
        employees = snapshot.roster.len(),
        date_from = %range.date_from,
        date_to = %range.date_to,
        records = summary.records.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Summary completed"
    );
    json_response(StatusCode::OK, SummaryResponse::from(summary))
}

/// Handler for POST /dashboard.
///
/// Builds the per-date attendance and leave series for the dashboard charts.
async fn dashboard_handler(
    State(state): State<AppState>,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Dashboard request rejected"
        );
        return error_response(err.into());
    }

    let start_time = Instant::now();
    let summary = aggregate_for_dashboard(
        &request.records,
        &request.leave_requests,
        &request.filter(),
        state.config().leave_rules(),
    );

    info!(
        correlation_id = %correlation_id,
        records = request.records.len(),
        leave_requests = request.leave_requests.len(),
        days = summary.daily.len(),
        leave_days = summary.leave_daily.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Dashboard aggregated"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /distance.
async fn distance_handler(payload: Result<Json<DistanceRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let distance_m = distance_meters(request.lat1, request.lon1, request.lat2, request.lon2);
    info!(correlation_id = %correlation_id, distance_m, "Distance computed");
    json_response(StatusCode::OK, DistanceResponse { distance_m })
}

/// Handler for POST /geofence/check.
///
/// Classifies a device position against the configured site.
async fn geofence_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeofenceCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let check = state.config().geofence().check(request.lat, request.lng);
    info!(
        correlation_id = %correlation_id,
        distance_m = check.distance_m,
        within = check.within,
        "Geofence checked"
    );
    json_response(StatusCode::OK, check)
}

/// Handler for POST /leave/decision.
///
/// Approves or rejects a pending leave request and returns it updated.
async fn leave_decision_handler(
    payload: Result<Json<LeaveDecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let leave_id = request.leave_request.id.clone();
    let decision = request.decision;
    match request.apply() {
        Ok(leave) => {
            info!(
                correlation_id = %correlation_id,
                leave_id = %leave_id,
                decision = ?decision,
                "Leave request decided"
            );
            json_response(StatusCode::OK, leave)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                leave_id = %leave_id,
                error = %err,
                "Leave decision refused"
            );
            error_response(err.into())
        }
    }
}
