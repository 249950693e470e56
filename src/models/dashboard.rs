//! Dashboard time-series rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bucket a leave request is counted under on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Sick leave.
    Sick,
    /// Personal business leave.
    Personal,
    /// Vacation / annual leave.
    Vacation,
    /// Anything the keyword rules do not recognise.
    Other,
}

/// Attendance totals for one date across the filtered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// The date.
    pub date: NaiveDate,
    /// Sum of late minutes.
    pub late_minutes_total: u32,
    /// Sum of overtime minutes.
    pub overtime_minutes_total: u32,
    /// Number of `Absent` records.
    pub absent_count: u32,
}

impl DailyAggregate {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            late_minutes_total: 0,
            overtime_minutes_total: 0,
            absent_count: 0,
        }
    }
}

/// Number of people on leave for one date, by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDailyAggregate {
    /// The date.
    pub date: NaiveDate,
    /// Sick leave count.
    pub sick: u32,
    /// Personal leave count.
    pub personal: u32,
    /// Vacation leave count.
    pub vacation: u32,
    /// Uncategorised leave count.
    pub other: u32,
}

impl LeaveDailyAggregate {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sick: 0,
            personal: 0,
            vacation: 0,
            other: 0,
        }
    }

    pub(crate) fn increment(&mut self, category: LeaveCategory) {
        match category {
            LeaveCategory::Sick => self.sick = self.sick.saturating_add(1),
            LeaveCategory::Personal => self.personal = self.personal.saturating_add(1),
            LeaveCategory::Vacation => self.vacation = self.vacation.saturating_add(1),
            LeaveCategory::Other => self.other = self.other.saturating_add(1),
        }
    }
}
