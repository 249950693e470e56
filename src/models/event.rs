//! Attendance event model.
//!
//! An [`AttendanceEvent`] is a single clock-in or clock-out recorded at a site,
//! optionally carrying the position the device reported and the geofence
//! classification taken at that moment.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reconciliation::Geofence;

/// Direction of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// Clock-in.
    In,
    /// Clock-out.
    Out,
}

/// Position reported by the device when the event was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Reported accuracy radius in metres, if the device gave one.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// A recorded clock-in or clock-out.
///
/// Events are immutable once recorded. The timestamp keeps the offset it was
/// recorded with and is read as the organisation's local time: the local
/// calendar date and clock time are taken straight from it, with no
/// timezone conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// The employee who clocked.
    pub employee_id: String,
    /// The branch the employee was assigned to when clocking.
    #[serde(default)]
    pub branch_id: String,
    /// Whether this is a clock-in or clock-out.
    pub event_type: EventType,
    /// When the event happened, in the organisation's operating timezone.
    pub timestamp: DateTime<FixedOffset>,
    /// Device position, if available.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Rounded distance from the site centre in metres.
    #[serde(default)]
    pub distance_from_site: Option<f64>,
    /// Whether the event was recorded inside the site geofence.
    #[serde(default)]
    pub within_geofence: Option<bool>,
    /// Reference to a captured photo, stored elsewhere.
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl AttendanceEvent {
    /// Records a new event with a fresh id.
    ///
    /// When both a position and a geofence are given, the distance to the site
    /// (rounded to whole metres) and the inside/outside flag are filled in.
    /// Without a position the event is flagged as outside the geofence.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceEvent, Coordinates, EventType};
    /// use attendance_engine::reconciliation::Geofence;
    /// use chrono::DateTime;
    ///
    /// let site = Geofence { latitude: 13.7563, longitude: 100.5018, radius_m: 200.0 };
    /// let at = DateTime::parse_from_rfc3339("2024-03-05T10:15:00+07:00").unwrap();
    /// let event = AttendanceEvent::record(
    ///     "emp_001",
    ///     "central",
    ///     EventType::In,
    ///     at,
    ///     Some(Coordinates { lat: 13.7563, lng: 100.5018, accuracy: Some(12.0) }),
    ///     Some(&site),
    /// );
    ///
    /// assert_eq!(event.distance_from_site, Some(0.0));
    /// assert_eq!(event.within_geofence, Some(true));
    /// ```
    pub fn record(
        employee_id: impl Into<String>,
        branch_id: impl Into<String>,
        event_type: EventType,
        timestamp: DateTime<FixedOffset>,
        coordinates: Option<Coordinates>,
        site: Option<&Geofence>,
    ) -> Self {
        let (distance_from_site, within_geofence) = match (site, coordinates) {
            (Some(site), Some(pos)) => {
                let check = site.check(pos.lat, pos.lng);
                (Some(check.distance_m.round()), Some(check.within))
            }
            (Some(_), None) => (None, Some(false)),
            (None, _) => (None, None),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.into(),
            branch_id: branch_id.into(),
            event_type,
            timestamp,
            coordinates,
            distance_from_site,
            within_geofence,
            photo_ref: None,
        }
    }

    /// Wall-clock time as recorded, in the event's own offset.
    ///
    /// Events are ordered by this rather than by instant, so the earliest
    /// clock-in is always the one with the earliest clock reading.
    pub fn local_time(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }

    /// The local calendar date the event belongs to.
    pub fn local_date(&self) -> NaiveDate {
        self.local_time().date()
    }

    /// Minutes since local midnight, ignoring seconds.
    pub fn minute_of_day(&self) -> u32 {
        let time = self.local_time();
        time.hour() * 60 + time.minute()
    }
}
