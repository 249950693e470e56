//! Derived attendance records and per-employee totals.
//!
//! Nothing here is ever stored by the engine; records are recomputed from the
//! event and leave snapshot on every query.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classified outcome of one employee-day.
///
/// Serialized as a plain string: `"Present"`, `"Partial"`, `"Absent"` or
/// `"Leave:<type>"`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status = AttendanceStatus::Leave("ลาป่วย".to_string());
/// assert_eq!(status.to_string(), "Leave:ลาป่วย");
/// assert_eq!("Leave:ลาป่วย".parse::<AttendanceStatus>().unwrap(), status);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AttendanceStatus {
    /// Clocked in and out.
    Present,
    /// Only one of clock-in or clock-out was recorded.
    Partial,
    /// No clock events and no covering leave.
    Absent,
    /// No clock events, covered by a non-rejected leave request of this type.
    Leave(String),
}

const LEAVE_PREFIX: &str = "Leave:";

impl AttendanceStatus {
    /// Returns true for unexplained absences.
    pub fn is_absent(&self) -> bool {
        matches!(self, AttendanceStatus::Absent)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Partial => write!(f, "Partial"),
            AttendanceStatus::Absent => write!(f, "Absent"),
            AttendanceStatus::Leave(leave_type) => write!(f, "{LEAVE_PREFIX}{leave_type}"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Partial" => Ok(AttendanceStatus::Partial),
            "Absent" => Ok(AttendanceStatus::Absent),
            other => other
                .strip_prefix(LEAVE_PREFIX)
                .map(|leave_type| AttendanceStatus::Leave(leave_type.to_string()))
                .ok_or_else(|| format!("unknown attendance status '{other}'")),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for AttendanceStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One employee's classified attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The local calendar date.
    pub date: NaiveDate,
    /// The employee.
    pub employee_id: String,
    /// The employee's branch, empty when unassigned.
    pub branch_id: String,
    /// Label of the shift the day was measured against.
    pub shift_label: String,
    /// Classified outcome.
    pub status: AttendanceStatus,
    /// Minutes between first clock-in and last clock-out.
    pub worked_minutes: u32,
    /// Minutes the first clock-in fell after the scheduled start.
    pub late_minutes: u32,
    /// Minutes the last clock-out fell after the scheduled end.
    pub overtime_minutes: u32,
}

/// Per-employee sums over a summarized range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// Sum of worked minutes.
    pub worked_minutes: u32,
    /// Sum of late minutes.
    pub late_minutes: u32,
    /// Sum of overtime minutes.
    pub overtime_minutes: u32,
    /// Number of `Absent` days. Leave days are not counted.
    pub absent_days: u32,
}

impl EmployeeTotals {
    /// Folds one record into the totals.
    pub fn add(&mut self, record: &AttendanceRecord) {
        self.worked_minutes = self.worked_minutes.saturating_add(record.worked_minutes);
        self.late_minutes = self.late_minutes.saturating_add(record.late_minutes);
        self.overtime_minutes = self.overtime_minutes.saturating_add(record.overtime_minutes);
        if record.status.is_absent() {
            self.absent_days = self.absent_days.saturating_add(1);
        }
    }

    /// Worked time in hours, rounded to two decimal places.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::EmployeeTotals;
    /// use rust_decimal::Decimal;
    ///
    /// let totals = EmployeeTotals { worked_minutes: 555, ..Default::default() };
    /// assert_eq!(totals.worked_hours(), Decimal::new(925, 2)); // 9.25
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        (Decimal::from(self.worked_minutes) / Decimal::from(60)).round_dp(2)
    }
}
