//! Shift catalog lookup.
//!
//! The catalog maps shift codes to their scheduled windows and always has a
//! default shift to fall back on, so lookups never fail.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftDefinition;

/// Converts an `HH:MM` clock time to minutes since midnight.
///
/// A bare hour (`"9"`) is read as `09:00`. Hours must be below 24 and minutes
/// below 60.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::parse_clock_time;
///
/// assert_eq!(parse_clock_time("10:00").unwrap(), 600);
/// assert_eq!(parse_clock_time("19:30").unwrap(), 1170);
/// assert_eq!(parse_clock_time("7").unwrap(), 420);
/// assert!(parse_clock_time("24:00").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<u32> {
    let invalid = || EngineError::InvalidClockTime {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let (hours, minutes) = match trimmed.split_once(':') {
        Some((h, m)) => (h, m),
        None => (trimmed, "0"),
    };

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Static mapping from shift code to scheduled window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCatalog {
    shifts: Vec<ShiftDefinition>,
    default_index: usize,
}

impl ShiftCatalog {
    /// Builds a catalog, validating every definition.
    ///
    /// `default_code` picks the fallback shift; when `None` the first shift is
    /// the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the list is empty, a code is
    /// repeated, a shift does not start before it ends, or `default_code` is
    /// not in the list.
    pub fn new(shifts: Vec<ShiftDefinition>, default_code: Option<&str>) -> EngineResult<Self> {
        if shifts.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "shift catalog must contain at least one shift".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for shift in &shifts {
            if !seen.insert(shift.code.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate shift code '{}'", shift.code),
                });
            }
            if shift.scheduled_start >= shift.scheduled_end {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "shift '{}' must start before it ends (overnight shifts are not supported)",
                        shift.code
                    ),
                });
            }
        }

        let default_index = match default_code {
            Some(code) => shifts
                .iter()
                .position(|s| s.code == code)
                .ok_or_else(|| EngineError::InvalidConfig {
                    message: format!("default shift code '{}' is not in the catalog", code),
                })?,
            None => 0,
        };

        Ok(Self {
            shifts,
            default_index,
        })
    }

    /// Looks up a shift by code, falling back to the default shift.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::reconciliation::ShiftCatalog;
    ///
    /// let catalog = ShiftCatalog::default();
    /// assert_eq!(catalog.lookup(Some("B")).code, "B");
    /// assert_eq!(catalog.lookup(Some("night")).code, "A");
    /// assert_eq!(catalog.lookup(None).code, "A");
    /// ```
    pub fn lookup(&self, code: Option<&str>) -> &ShiftDefinition {
        code.and_then(|code| self.shifts.iter().find(|s| s.code == code))
            .unwrap_or_else(|| self.default_shift())
    }

    /// The fallback shift.
    pub fn default_shift(&self) -> &ShiftDefinition {
        &self.shifts[self.default_index]
    }

    /// All shifts in configured order.
    pub fn shifts(&self) -> &[ShiftDefinition] {
        &self.shifts
    }
}

impl Default for ShiftCatalog {
    /// The stock catalog: A 10:00-19:00, B 11:00-20:00, C 12:00-21:00, default A.
    fn default() -> Self {
        let stock = |code: &str, start: u32, end: u32| ShiftDefinition {
            code: code.to_string(),
            label: None,
            scheduled_start: start * 60,
            scheduled_end: end * 60,
        };
        Self {
            shifts: vec![stock("A", 10, 19), stock("B", 11, 20), stock("C", 12, 21)],
            default_index: 0,
        }
    }
}
