//! Summaries over a roster and a date range.
//!
//! The summarizer groups the event log once, then reconciles every
//! `(employee, date)` pair in roster order, date ascending.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceSnapshot, EmployeeTotals};

use super::aggregator::group_events;
use super::day_reconciler::reconcile_day;
use super::shift_catalog::ShiftCatalog;

/// An inclusive range of calendar dates to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date (inclusive).
    pub date_from: NaiveDate,
    /// Last date (inclusive).
    pub date_to: NaiveDate,
    /// Leave Saturdays and Sundays out of the output entirely.
    #[serde(default)]
    pub skip_weekends: bool,
}

impl DateRange {
    /// Builds a range, rejecting one whose start falls after its end.
    ///
    /// The summarizer itself accepts inverted ranges and yields nothing for
    /// them; this constructor is for callers that want to report the mistake.
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, skip_weekends: bool) -> EngineResult<Self> {
        if date_from > date_to {
            return Err(EngineError::InvalidDateRange {
                from: date_from,
                to: date_to,
            });
        }
        Ok(Self {
            date_from,
            date_to,
            skip_weekends,
        })
    }

    /// Dates in the range, ascending, with weekends removed when requested.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.date_from
            .iter_days()
            .take_while(move |date| *date <= self.date_to)
            .filter(move |date| !(self.skip_weekends && is_weekend(*date)))
    }
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Output of [`summarize_range`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// One record per employee per reported date.
    pub records: Vec<AttendanceRecord>,
    /// Per-employee totals, keyed by employee id.
    pub totals_by_employee: BTreeMap<String, EmployeeTotals>,
}

/// Reconciles every rostered employee on every date of `range`.
///
/// Each employee's shift comes from the snapshot's assignment table through
/// `catalog` (unknown codes fall back to the default shift), and the branch
/// from the branch table (empty when unassigned). Every rostered employee gets
/// a totals entry, even when the range is empty.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceSnapshot, AttendanceStatus};
/// use attendance_engine::reconciliation::{summarize_range, DateRange, ShiftCatalog};
/// use chrono::NaiveDate;
///
/// let snapshot = AttendanceSnapshot {
///     roster: vec!["emp_001".to_string(), "emp_002".to_string()],
///     ..Default::default()
/// };
/// // Friday 2024-03-08 to Monday 2024-03-11
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
///     true,
/// ).unwrap();
///
/// let summary = summarize_range(&snapshot, &ShiftCatalog::default(), &range);
/// assert_eq!(summary.records.len(), 4); // 2 employees x (Fri, Mon)
/// assert!(summary.records.iter().all(|r| r.status == AttendanceStatus::Absent));
/// assert_eq!(summary.totals_by_employee["emp_001"].absent_days, 2);
/// ```
pub fn summarize_range(
    snapshot: &AttendanceSnapshot,
    catalog: &ShiftCatalog,
    range: &DateRange,
) -> RangeSummary {
    let index = group_events(&snapshot.events);
    let dates: Vec<NaiveDate> = range.dates().collect();

    let mut records = Vec::with_capacity(snapshot.roster.len() * dates.len());
    let mut totals_by_employee = BTreeMap::new();

    for employee_id in &snapshot.roster {
        let shift = catalog.lookup(snapshot.shift_code(employee_id));
        let branch_id = snapshot.branch_id(employee_id);
        let totals: &mut EmployeeTotals = totals_by_employee
            .entry(employee_id.clone())
            .or_default();

        for &date in &dates {
            let bucket = index.bucket(employee_id, date);
            let record = reconcile_day(
                employee_id,
                date,
                &bucket,
                shift,
                Some(branch_id),
                &snapshot.leave_requests,
            );
            totals.add(&record);
            records.push(record);
        }
    }

    debug!(
        employees = snapshot.roster.len(),
        days = dates.len(),
        events = index.event_count(),
        records = records.len(),
        "Summarized attendance range"
    );

    RangeSummary {
        records,
        totals_by_employee,
    }
}
