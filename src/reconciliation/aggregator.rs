//! Grouping of raw clock events by employee and local calendar date.
//!
//! Grouping is total: every event lands in exactly one bucket. Nothing is
//! dropped or deduplicated here; duplicate clock-ins are resolved later by
//! the day reconciler.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{AttendanceEvent, EventType};

/// The clock events of one employee on one local date.
///
/// Both lists are in local wall-clock order; events with equal clock readings
/// keep their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBucket<'a> {
    /// Clock-in events.
    pub in_events: Vec<&'a AttendanceEvent>,
    /// Clock-out events.
    pub out_events: Vec<&'a AttendanceEvent>,
}

impl<'a> DayBucket<'a> {
    /// Builds a bucket from an arbitrary slice of events, sorting each list.
    ///
    /// Useful when the caller already holds one employee-day of events.
    pub fn from_events(events: &'a [AttendanceEvent]) -> Self {
        let mut bucket = Self::default();
        for event in events {
            bucket.push(event);
        }
        bucket.sort();
        bucket
    }

    /// Returns true when the bucket holds no events at all.
    pub fn is_empty(&self) -> bool {
        self.in_events.is_empty() && self.out_events.is_empty()
    }

    /// Total number of events in the bucket.
    pub fn len(&self) -> usize {
        self.in_events.len() + self.out_events.len()
    }

    fn push(&mut self, event: &'a AttendanceEvent) {
        match event.event_type {
            EventType::In => self.in_events.push(event),
            EventType::Out => self.out_events.push(event),
        }
    }

    fn sort(&mut self) {
        // sort_by_key is stable, so equal clock readings keep input order
        self.in_events.sort_by_key(|e| e.local_time());
        self.out_events.sort_by_key(|e| e.local_time());
    }
}

/// Events indexed by employee id, then local date.
#[derive(Debug, Clone, Default)]
pub struct EventIndex<'a> {
    buckets: HashMap<&'a str, HashMap<NaiveDate, DayBucket<'a>>>,
}

impl<'a> EventIndex<'a> {
    /// The bucket for an employee-day, empty when nothing was recorded.
    pub fn bucket(&self, employee_id: &str, date: NaiveDate) -> DayBucket<'a> {
        self.buckets
            .get(employee_id)
            .and_then(|days| days.get(&date))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct employees with events.
    pub fn employee_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of indexed events.
    pub fn event_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|days| days.values())
            .map(DayBucket::len)
            .sum()
    }
}

/// Groups events by employee and local calendar date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceEvent, EventType};
/// use attendance_engine::reconciliation::group_events;
/// use chrono::{DateTime, NaiveDate};
///
/// let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let events = vec![
///     AttendanceEvent::record("emp_001", "", EventType::Out, at("2024-03-05T19:30:00+07:00"), None, None),
///     AttendanceEvent::record("emp_001", "", EventType::In, at("2024-03-05T10:15:00+07:00"), None, None),
///     AttendanceEvent::record("emp_001", "", EventType::In, at("2024-03-06T10:00:00+07:00"), None, None),
/// ];
///
/// let index = group_events(&events);
/// let day = index.bucket("emp_001", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// assert_eq!(day.in_events.len(), 1);
/// assert_eq!(day.out_events.len(), 1);
/// assert_eq!(index.event_count(), 3);
/// ```
pub fn group_events(events: &[AttendanceEvent]) -> EventIndex<'_> {
    let mut buckets: HashMap<&str, HashMap<NaiveDate, DayBucket<'_>>> = HashMap::new();

    for event in events {
        buckets
            .entry(event.employee_id.as_str())
            .or_default()
            .entry(event.local_date())
            .or_default()
            .push(event);
    }

    for days in buckets.values_mut() {
        for bucket in days.values_mut() {
            bucket.sort();
        }
    }

    EventIndex { buckets }
}
