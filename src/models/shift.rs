//! Shift definition model.
//!
//! Shift windows are held as minutes since midnight and read from, or written
//! to, `HH:MM` strings.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::reconciliation::parse_clock_time;

/// A named daily shift window.
///
/// Shifts never cross midnight: `scheduled_start` is always earlier than
/// `scheduled_end`. The catalog enforces this when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Short code employees are assigned by (e.g. "A").
    pub code: String,
    /// Display label; derived from the window when not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Scheduled start, minutes since midnight.
    #[serde(rename = "start", with = "clock_time")]
    pub scheduled_start: u32,
    /// Scheduled end, minutes since midnight.
    #[serde(rename = "end", with = "clock_time")]
    pub scheduled_end: u32,
}

impl ShiftDefinition {
    /// Builds a shift from `HH:MM` strings.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::ShiftDefinition;
    ///
    /// let shift = ShiftDefinition::from_clock_times("A", "10:00", "19:00").unwrap();
    /// assert_eq!(shift.scheduled_start, 600);
    /// assert_eq!(shift.scheduled_end, 1140);
    /// assert_eq!(shift.label(), "10:00-19:00");
    /// ```
    pub fn from_clock_times(code: impl Into<String>, start: &str, end: &str) -> EngineResult<Self> {
        Ok(Self {
            code: code.into(),
            label: None,
            scheduled_start: parse_clock_time(start)?,
            scheduled_end: parse_clock_time(end)?,
        })
    }

    /// The label shown on attendance records.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!(
                "{}-{}",
                clock_time::format(self.scheduled_start),
                clock_time::format(self.scheduled_end)
            ),
        }
    }
}

/// Serde adapter between minutes-since-midnight and `HH:MM`.
mod clock_time {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::reconciliation::parse_clock_time;

    pub fn format(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    pub fn serialize<S: Serializer>(minutes: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock_time(&raw).map_err(de::Error::custom)
    }
}
