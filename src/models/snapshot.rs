//! Immutable input snapshot for range summaries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AttendanceEvent, LeaveRequest};

/// Everything the summarizer reads, captured at one point in time.
///
/// The caller owns the store these come from and hands over a consistent
/// copy; the engine only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    /// Employees to report on, in display order.
    pub roster: Vec<String>,
    /// All recorded clock events.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
    /// All leave requests, in submission-list order.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Employee id to shift code.
    #[serde(default)]
    pub shift_assignments: HashMap<String, String>,
    /// Employee id to branch id.
    #[serde(default)]
    pub branch_assignments: HashMap<String, String>,
}

impl AttendanceSnapshot {
    /// The shift code assigned to an employee, if any.
    pub fn shift_code(&self, employee_id: &str) -> Option<&str> {
        self.shift_assignments.get(employee_id).map(String::as_str)
    }

    /// The branch assigned to an employee, empty when unassigned.
    pub fn branch_id(&self, employee_id: &str) -> &str {
        self.branch_assignments
            .get(employee_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}
