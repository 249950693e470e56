//! Leave request model.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Decision state of a leave request.
///
/// A request starts `Pending` and moves to `Approved` or `Rejected` exactly
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Submitted, awaiting a decision.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A request for leave over an inclusive range of calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Free-text leave type label (e.g. "ลาป่วย", "Sick leave").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Current decision state.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// Requested duration as entered (e.g. "full day", "hours 3h").
    #[serde(default)]
    pub duration: Option<String>,
    /// Reason given by the employee.
    #[serde(default)]
    pub reason: Option<String>,
    /// Who approved or rejected the request.
    #[serde(default)]
    pub approver: Option<String>,
}

impl LeaveRequest {
    /// Submits a new pending request with a fresh id.
    pub fn submit(
        employee_id: impl Into<String>,
        leave_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.into(),
            leave_type: leave_type.into(),
            start_date,
            end_date,
            status: LeaveStatus::Pending,
            created_at,
            duration: None,
            reason: None,
            approver: None,
        }
    }

    /// Approves a pending request.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::{NaiveDate, Utc};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    /// let mut request = LeaveRequest::submit("emp_001", "ลาป่วย", day, day, Utc::now());
    /// request.approve("hr_admin").unwrap();
    /// assert_eq!(request.status, LeaveStatus::Approved);
    ///
    /// // decided requests cannot change again
    /// assert!(request.reject("hr_admin").is_err());
    /// ```
    pub fn approve(&mut self, approver: impl Into<String>) -> EngineResult<()> {
        self.decide(LeaveStatus::Approved, approver.into())
    }

    /// Rejects a pending request.
    pub fn reject(&mut self, approver: impl Into<String>) -> EngineResult<()> {
        self.decide(LeaveStatus::Rejected, approver.into())
    }

    fn decide(&mut self, status: LeaveStatus, approver: String) -> EngineResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(EngineError::InvalidLeaveTransition {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = status;
        self.approver = Some(approver);
        Ok(())
    }

    /// Whether the request explains an absence. Pending requests count.
    pub fn counts_as_leave(&self) -> bool {
        self.status != LeaveStatus::Rejected
    }

    /// Whether `date` falls inside the inclusive leave range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every date in the inclusive leave range, oldest first.
    ///
    /// Yields nothing when the end date precedes the start date.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }
}
