//! Reconciliation of one employee-day into an attendance record.
//!
//! Every combination of inputs is classified into exactly one outcome:
//!
//! | clock-in | clock-out | outcome |
//! |---|---|---|
//! | yes | yes | `Present`, metrics from first-in / last-out |
//! | no | no | `Leave:<type>` if a non-rejected request covers the day, else `Absent` |
//! | yes | no | `Partial` |
//! | no | yes | `Partial` |
//!
//! Only `Present` days carry non-zero minutes; partial days are not estimated.

use chrono::NaiveDate;

use crate::models::{AttendanceRecord, AttendanceStatus, LeaveRequest, ShiftDefinition};

use super::aggregator::DayBucket;

/// Classifies one employee-day.
///
/// `first_in` is the earliest clock-in and `last_out` the latest clock-out.
/// With both present, worked time is `last_out - first_in`, lateness is how
/// far `first_in` falls after the shift start, and overtime is how far
/// `last_out` falls after the shift end; each floors at zero and uses
/// minute-of-day clock times (seconds ignored). Clocking in early is counted
/// as worked time but never as negative lateness.
///
/// With no events, the first request in `leave_requests` that belongs to the
/// employee, is not rejected, and covers `date` gives `Leave:<type>`. Input
/// order decides between overlapping requests.
///
/// The function is pure: identical inputs always give identical records.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceEvent, AttendanceStatus, EventType};
/// use attendance_engine::reconciliation::{reconcile_day, DayBucket, ShiftCatalog};
/// use chrono::{DateTime, NaiveDate};
///
/// let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let events = vec![
///     AttendanceEvent::record("emp_001", "central", EventType::In, at("2024-03-05T10:15:00+07:00"), None, None),
///     AttendanceEvent::record("emp_001", "central", EventType::Out, at("2024-03-05T19:30:00+07:00"), None, None),
/// ];
/// let catalog = ShiftCatalog::default();
///
/// let record = reconcile_day(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     &DayBucket::from_events(&events),
///     catalog.lookup(Some("A")),
///     Some("central"),
///     &[],
/// );
///
/// assert_eq!(record.status, AttendanceStatus::Present);
/// assert_eq!(record.worked_minutes, 555);
/// assert_eq!(record.late_minutes, 15);
/// assert_eq!(record.overtime_minutes, 30);
/// ```
pub fn reconcile_day(
    employee_id: &str,
    date: NaiveDate,
    bucket: &DayBucket<'_>,
    shift: &ShiftDefinition,
    branch_id: Option<&str>,
    leave_requests: &[LeaveRequest],
) -> AttendanceRecord {
    // min_by_key keeps the first of equal keys, max_by_key the last
    let first_in = bucket.in_events.iter().min_by_key(|e| e.local_time());
    let last_out = bucket.out_events.iter().max_by_key(|e| e.local_time());

    let (status, worked_minutes, late_minutes, overtime_minutes) = match (first_in, last_out) {
        (Some(first_in), Some(last_out)) => {
            let in_minute = first_in.minute_of_day();
            let out_minute = last_out.minute_of_day();
            (
                AttendanceStatus::Present,
                out_minute.saturating_sub(in_minute),
                in_minute.saturating_sub(shift.scheduled_start),
                out_minute.saturating_sub(shift.scheduled_end),
            )
        }
        (None, None) => {
            let status = covering_leave(employee_id, date, leave_requests)
                .map(|leave| AttendanceStatus::Leave(leave.leave_type.clone()))
                .unwrap_or(AttendanceStatus::Absent);
            (status, 0, 0, 0)
        }
        _ => (AttendanceStatus::Partial, 0, 0, 0),
    };

    AttendanceRecord {
        date,
        employee_id: employee_id.to_string(),
        branch_id: branch_id.unwrap_or_default().to_string(),
        shift_label: shift.label(),
        status,
        worked_minutes,
        late_minutes,
        overtime_minutes,
    }
}

/// The first non-rejected request of `employee_id` covering `date`.
pub fn covering_leave<'a>(
    employee_id: &str,
    date: NaiveDate,
    leave_requests: &'a [LeaveRequest],
) -> Option<&'a LeaveRequest> {
    leave_requests.iter().find(|leave| {
        leave.employee_id == employee_id && leave.counts_as_leave() && leave.covers(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceEvent, EventType, LeaveStatus};
    use crate::reconciliation::ShiftCatalog;
    use chrono::{DateTime, FixedOffset, Utc};

    fn at(ts: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(ts).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn clock(event_type: EventType, ts: &str) -> AttendanceEvent {
        AttendanceEvent::record("emp_001", "central", event_type, at(ts), None, None)
    }

    fn leave(id: &str, leave_type: &str, start: &str, end: &str, status: LeaveStatus) -> LeaveRequest {
        let mut request =
            LeaveRequest::submit("emp_001", leave_type, date(start), date(end), Utc::now());
        request.id = id.to_string();
        request.status = status;
        request
    }

    fn shift_a() -> ShiftDefinition {
        ShiftCatalog::default().lookup(Some("A")).clone()
    }

    fn reconcile(events: &[AttendanceEvent], leaves: &[LeaveRequest]) -> AttendanceRecord {
        reconcile_day(
            "emp_001",
            date("2024-03-05"),
            &DayBucket::from_events(events),
            &shift_a(),
            Some("central"),
            leaves,
        )
    }

    // ==========================================================================
    // Present days
    // ==========================================================================

    #[test]
    fn test_simple_present_day() {
        let events = vec![
            clock(EventType::In, "2024-03-05T10:15:00+07:00"),
            clock(EventType::Out, "2024-03-05T19:30:00+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.worked_minutes, 555);
        assert_eq!(record.late_minutes, 15);
        assert_eq!(record.overtime_minutes, 30);
        assert_eq!(record.shift_label, "10:00-19:00");
        assert_eq!(record.branch_id, "central");
    }

    #[test]
    fn test_early_arrival_counts_as_worked_not_negative_lateness() {
        let events = vec![
            clock(EventType::In, "2024-03-05T09:30:00+07:00"),
            clock(EventType::Out, "2024-03-05T18:00:00+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.worked_minutes, 510);
        assert_eq!(record.late_minutes, 0);
        assert_eq!(record.overtime_minutes, 0);
    }

    #[test]
    fn test_multiple_clock_ins_use_earliest_and_latest() {
        let events = vec![
            clock(EventType::In, "2024-03-05T10:20:00+07:00"),
            clock(EventType::Out, "2024-03-05T15:00:00+07:00"),
            clock(EventType::In, "2024-03-05T10:05:00+07:00"),
            clock(EventType::Out, "2024-03-05T19:10:00+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.late_minutes, 5);
        assert_eq!(record.overtime_minutes, 10);
        assert_eq!(record.worked_minutes, 545);
    }

    #[test]
    fn test_out_before_in_floors_worked_at_zero() {
        let events = vec![
            clock(EventType::In, "2024-03-05T18:00:00+07:00"),
            clock(EventType::Out, "2024-03-05T09:00:00+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.worked_minutes, 0);
        assert_eq!(record.late_minutes, 480);
        assert_eq!(record.overtime_minutes, 0);
    }

    #[test]
    fn test_mixed_offsets_pick_earliest_clock_reading() {
        // 10:00+00:00 is a later instant than 10:30+07:00 but the earlier reading
        let events = vec![
            clock(EventType::In, "2024-03-05T10:30:00+07:00"),
            clock(EventType::In, "2024-03-05T10:00:00+00:00"),
            clock(EventType::Out, "2024-03-05T19:00:00+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.late_minutes, 0);
        assert_eq!(record.worked_minutes, 540);
    }

    #[test]
    fn test_seconds_are_ignored() {
        let events = vec![
            clock(EventType::In, "2024-03-05T10:00:59+07:00"),
            clock(EventType::Out, "2024-03-05T19:00:01+07:00"),
        ];
        let record = reconcile(&events, &[]);

        assert_eq!(record.late_minutes, 0);
        assert_eq!(record.overtime_minutes, 0);
        assert_eq!(record.worked_minutes, 540);
    }

    // ==========================================================================
    // Partial days
    // ==========================================================================

    #[test]
    fn test_only_clock_in_is_partial() {
        let events = vec![clock(EventType::In, "2024-03-05T10:45:00+07:00")];
        let record = reconcile(&events, &[]);

        assert_eq!(record.status, AttendanceStatus::Partial);
        assert_eq!(record.worked_minutes, 0);
        assert_eq!(record.late_minutes, 0);
        assert_eq!(record.overtime_minutes, 0);
    }

    #[test]
    fn test_only_clock_out_is_partial_even_with_leave() {
        let events = vec![clock(EventType::Out, "2024-03-05T19:45:00+07:00")];
        let leaves = vec![leave("l1", "ลาป่วย", "2024-03-05", "2024-03-05", LeaveStatus::Approved)];
        let record = reconcile(&events, &leaves);

        assert_eq!(record.status, AttendanceStatus::Partial);
        assert_eq!(record.overtime_minutes, 0);
    }

    // ==========================================================================
    // Absence and leave
    // ==========================================================================

    #[test]
    fn test_no_events_no_leave_is_absent() {
        let record = reconcile(&[], &[]);
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.worked_minutes, 0);
    }

    #[test]
    fn test_approved_leave_covers_absence() {
        let leaves = vec![leave("l1", "ลาป่วย", "2024-03-04", "2024-03-06", LeaveStatus::Approved)];
        let record = reconcile(&[], &leaves);
        assert_eq!(record.status, AttendanceStatus::Leave("ลาป่วย".to_string()));
        assert_eq!(record.status.to_string(), "Leave:ลาป่วย");
    }

    #[test]
    fn test_pending_leave_counts() {
        let leaves = vec![leave("l1", "ลากิจ", "2024-03-05", "2024-03-05", LeaveStatus::Pending)];
        let record = reconcile(&[], &leaves);
        assert_eq!(record.status, AttendanceStatus::Leave("ลากิจ".to_string()));
    }

    #[test]
    fn test_rejected_leave_is_absent() {
        let leaves = vec![leave("l1", "ลาพักร้อน", "2024-03-01", "2024-03-10", LeaveStatus::Rejected)];
        let record = reconcile(&[], &leaves);
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_first_matching_leave_wins() {
        let leaves = vec![
            leave("l0", "rejected", "2024-03-05", "2024-03-05", LeaveStatus::Rejected),
            leave("l1", "first", "2024-03-01", "2024-03-31", LeaveStatus::Pending),
            leave("l2", "second", "2024-03-05", "2024-03-05", LeaveStatus::Approved),
        ];
        let record = reconcile(&[], &leaves);
        assert_eq!(record.status, AttendanceStatus::Leave("first".to_string()));
    }

    #[test]
    fn test_other_employees_leave_is_ignored() {
        let mut other = leave("l1", "ลาป่วย", "2024-03-05", "2024-03-05", LeaveStatus::Approved);
        other.employee_id = "emp_002".to_string();
        let record = reconcile(&[], &[other]);
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_leave_outside_date_is_ignored() {
        let leaves = vec![leave("l1", "ลาป่วย", "2024-03-06", "2024-03-08", LeaveStatus::Approved)];
        let record = reconcile(&[], &leaves);
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    // ==========================================================================
    // Other properties
    // ==========================================================================

    #[test]
    fn test_missing_branch_is_empty() {
        let record = reconcile_day(
            "emp_001",
            date("2024-03-05"),
            &DayBucket::default(),
            &shift_a(),
            None,
            &[],
        );
        assert_eq!(record.branch_id, "");
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            clock(EventType::In, "2024-03-05T10:15:00+07:00"),
            clock(EventType::Out, "2024-03-05T19:30:00+07:00"),
        ];
        let first = reconcile(&events, &[]);
        let second = reconcile(&events, &[]);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
