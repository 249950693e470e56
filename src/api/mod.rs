//! HTTP API for the attendance engine.
//!
//! Exposes day reconciliation, range summaries, dashboard aggregation and
//! geofence helpers and leave decisions as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DashboardRequest, DistanceRequest, GeofenceCheckRequest, LeaveDecision, LeaveDecisionRequest,
    MAX_RANGE_DAYS, ReconcileDayRequest, SummaryRequest,
};
pub use response::{ApiError, DistanceResponse, SummaryResponse, TotalsResponse};
pub use state::AppState;
