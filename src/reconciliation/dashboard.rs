//! Dashboard time series.
//!
//! Re-buckets summarized records by date, and separately counts how many
//! people are on leave each day by leave category.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, DailyAggregate, LeaveCategory, LeaveDailyAggregate, LeaveRequest,
};

/// Employee and branch selection for dashboard rows.
///
/// `None` selects everything; `Some` selects an exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only this employee.
    #[serde(default)]
    pub employee: Option<String>,
    /// Only this branch.
    #[serde(default)]
    pub branch: Option<String>,
}

impl RecordFilter {
    /// Whether a record passes the filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        let employee_ok = self
            .employee
            .as_deref()
            .is_none_or(|employee| record.employee_id == employee);
        let branch_ok = self
            .branch
            .as_deref()
            .is_none_or(|branch| record.branch_id == branch);
        employee_ok && branch_ok
    }
}

/// Keyword rules mapping free-text leave labels onto [`LeaveCategory`].
///
/// A label belongs to the first category, in the order sick, personal,
/// vacation, with a keyword contained in it. ASCII letters compare
/// case-insensitively. Labels matching nothing are [`LeaveCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCategoryRules {
    /// Keywords marking sick leave.
    #[serde(default)]
    pub sick: Vec<String>,
    /// Keywords marking personal leave.
    #[serde(default)]
    pub personal: Vec<String>,
    /// Keywords marking vacation leave.
    #[serde(default)]
    pub vacation: Vec<String>,
}

impl Default for LeaveCategoryRules {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
        Self {
            sick: words(&["ป่วย", "sick"]),
            personal: words(&["กิจ", "personal"]),
            vacation: words(&["พักร้อน", "vacation", "annual"]),
        }
    }
}

impl LeaveCategoryRules {
    /// Classifies a leave label.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::LeaveCategory;
    /// use attendance_engine::reconciliation::LeaveCategoryRules;
    ///
    /// let rules = LeaveCategoryRules::default();
    /// assert_eq!(rules.classify("ลาป่วย"), LeaveCategory::Sick);
    /// assert_eq!(rules.classify("Annual Leave"), LeaveCategory::Vacation);
    /// assert_eq!(rules.classify("ลาคลอด"), LeaveCategory::Other);
    /// ```
    pub fn classify(&self, label: &str) -> LeaveCategory {
        let label = label.to_ascii_lowercase();
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| !k.is_empty() && label.contains(&k.to_ascii_lowercase()))
        };

        if hit(&self.sick) {
            LeaveCategory::Sick
        } else if hit(&self.personal) {
            LeaveCategory::Personal
        } else if hit(&self.vacation) {
            LeaveCategory::Vacation
        } else {
            LeaveCategory::Other
        }
    }
}

/// Output of [`aggregate_for_dashboard`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Attendance totals per date, ascending.
    pub daily: Vec<DailyAggregate>,
    /// Leave counts per date and category, ascending.
    pub leave_daily: Vec<LeaveDailyAggregate>,
}

/// Folds records into per-date totals and tabulates leave volume.
///
/// `filter` applies to the records only. Leave volume counts every
/// non-rejected request, expanding its inclusive range one day at a time.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use attendance_engine::reconciliation::{aggregate_for_dashboard, LeaveCategoryRules, RecordFilter};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let record = |employee: &str, status, late| AttendanceRecord {
///     date: day,
///     employee_id: employee.to_string(),
///     branch_id: "central".to_string(),
///     shift_label: "10:00-19:00".to_string(),
///     status,
///     worked_minutes: 0,
///     late_minutes: late,
///     overtime_minutes: 0,
/// };
/// let records = vec![
///     record("emp_001", AttendanceStatus::Present, 15),
///     record("emp_002", AttendanceStatus::Absent, 0),
/// ];
///
/// let summary = aggregate_for_dashboard(
///     &records,
///     &[],
///     &RecordFilter::default(),
///     &LeaveCategoryRules::default(),
/// );
/// assert_eq!(summary.daily.len(), 1);
/// assert_eq!(summary.daily[0].late_minutes_total, 15);
/// assert_eq!(summary.daily[0].absent_count, 1);
/// ```
pub fn aggregate_for_dashboard(
    records: &[AttendanceRecord],
    leave_requests: &[LeaveRequest],
    filter: &RecordFilter,
    rules: &LeaveCategoryRules,
) -> DashboardSummary {
    // BTreeMap keys iterate in date order, which is also ISO string order
    let mut daily: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        let row = daily
            .entry(record.date)
            .or_insert_with(|| DailyAggregate::empty(record.date));
        // caller-supplied records may carry arbitrary minute counts
        row.late_minutes_total = row.late_minutes_total.saturating_add(record.late_minutes);
        row.overtime_minutes_total = row
            .overtime_minutes_total
            .saturating_add(record.overtime_minutes);
        if record.status.is_absent() {
            row.absent_count = row.absent_count.saturating_add(1);
        }
    }

    let mut leave_daily: BTreeMap<NaiveDate, LeaveDailyAggregate> = BTreeMap::new();
    for request in leave_requests.iter().filter(|r| r.counts_as_leave()) {
        let category = rules.classify(&request.leave_type);
        for date in request.dates() {
            leave_daily
                .entry(date)
                .or_insert_with(|| LeaveDailyAggregate::empty(date))
                .increment(category);
        }
    }

    DashboardSummary {
        daily: daily.into_values().collect(),
        leave_daily: leave_daily.into_values().collect(),
    }
}
