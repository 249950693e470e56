//! Request types for the attendance engine API.
//!
//! This module defines the JSON request bodies for each endpoint and their
//! conversion into domain inputs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, AttendanceRecord, AttendanceSnapshot, LeaveRequest};
use crate::reconciliation::{DateRange, RecordFilter};

/// Longest date range, in days, a single request may expand (three years).
pub const MAX_RANGE_DAYS: i64 = 1096;

/// Rejects inclusive ranges longer than [`MAX_RANGE_DAYS`].
///
/// Inverted ranges pass; they expand to nothing.
fn check_range_len(from: NaiveDate, to: NaiveDate) -> EngineResult<()> {
    let days = (to - from).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(EngineError::RangeTooLong {
            from,
            to,
            days,
            max: MAX_RANGE_DAYS,
        });
    }
    Ok(())
}

/// Request body for `POST /reconcile/day`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileDayRequest {
    /// The employee to reconcile.
    pub employee_id: String,
    /// The local date to reconcile.
    pub date: NaiveDate,
    /// Clock events; entries for other employees or dates are ignored.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
    /// Assigned shift code; the default shift when absent or unknown.
    #[serde(default)]
    pub shift_code: Option<String>,
    /// Assigned branch; empty on the record when absent.
    #[serde(default)]
    pub branch_id: Option<String>,
    /// Leave requests to consult, in list order.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

impl ReconcileDayRequest {
    /// The events that belong to the requested employee-day, in input order.
    pub fn day_events(&self) -> Vec<AttendanceEvent> {
        self.events
            .iter()
            .filter(|e| e.employee_id == self.employee_id && e.local_date() == self.date)
            .cloned()
            .collect()
    }
}

/// Request body for `POST /summaries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Employees to report on, in output order.
    pub roster: Vec<String>,
    /// All clock events.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
    /// All leave requests.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Employee id to shift code.
    #[serde(default)]
    pub shift_assignments: HashMap<String, String>,
    /// Employee id to branch id.
    #[serde(default)]
    pub branch_assignments: HashMap<String, String>,
    /// First date (inclusive).
    pub date_from: NaiveDate,
    /// Last date (inclusive).
    pub date_to: NaiveDate,
    /// Omit Saturdays and Sundays.
    #[serde(default)]
    pub skip_weekends: bool,
}

impl SummaryRequest {
    /// Splits the request into a snapshot and a validated date range.
    pub fn into_parts(self) -> EngineResult<(AttendanceSnapshot, DateRange)> {
        let range = DateRange::new(self.date_from, self.date_to, self.skip_weekends)?;
        check_range_len(range.date_from, range.date_to)?;
        let snapshot = AttendanceSnapshot {
            roster: self.roster,
            events: self.events,
            leave_requests: self.leave_requests,
            shift_assignments: self.shift_assignments,
            branch_assignments: self.branch_assignments,
        };
        Ok((snapshot, range))
    }
}

/// Request body for `POST /dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Records produced by a summary.
    pub records: Vec<AttendanceRecord>,
    /// Leave requests to tabulate.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Only this employee; all when absent.
    #[serde(default)]
    pub employee: Option<String>,
    /// Only this branch; all when absent.
    #[serde(default)]
    pub branch: Option<String>,
}

impl DashboardRequest {
    /// Rejects leave requests whose span would expand past [`MAX_RANGE_DAYS`].
    pub fn validate(&self) -> EngineResult<()> {
        self.leave_requests
            .iter()
            .try_for_each(|leave| check_range_len(leave.start_date, leave.end_date))
    }

    /// The record filter described by the request.
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            employee: self.employee.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Outcome an administrator gives a pending leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

/// Request body for `POST /leave/decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionRequest {
    /// The request as currently stored by the caller.
    pub leave_request: LeaveRequest,
    /// What to do with it.
    pub decision: LeaveDecision,
    /// Who decided.
    pub approver: String,
}

impl LeaveDecisionRequest {
    /// Applies the decision, returning the updated request.
    pub fn apply(self) -> EngineResult<LeaveRequest> {
        let mut leave = self.leave_request;
        match self.decision {
            LeaveDecision::Approve => leave.approve(self.approver)?,
            LeaveDecision::Reject => leave.reject(self.approver)?,
        }
        Ok(leave)
    }
}

/// Request body for `POST /distance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistanceRequest {
    /// First point latitude.
    pub lat1: f64,
    /// First point longitude.
    pub lon1: f64,
    /// Second point latitude.
    pub lat2: f64,
    /// Second point longitude.
    pub lon2: f64,
}

/// Request body for `POST /geofence/check`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeofenceCheckRequest {
    /// Device latitude.
    pub lat: f64,
    /// Device longitude.
    pub lng: f64,
}
