//! Error types for the attendance engine.
//!
//! Reconciliation itself never fails; these errors cover the edges around it:
//! loading configuration, parsing shift clock times, leave status transitions
//! and request validation in the HTTP layer.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/org.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/org.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its content is inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// A shift clock time was not in `HH:MM` form or was out of range.
    #[error("Invalid clock time '{value}', expected HH:MM")]
    InvalidClockTime {
        /// The rejected input.
        value: String,
    },

    /// A leave request was asked to change status after it was already decided.
    #[error("Leave request '{id}' is already {status} and cannot be changed")]
    InvalidLeaveTransition {
        /// The leave request id.
        id: String,
        /// The status the request already holds.
        status: LeaveStatus,
    },

    /// A date range whose start falls after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// The requested first day.
        from: NaiveDate,
        /// The requested last day.
        to: NaiveDate,
    },

    /// A date range longer than the HTTP API accepts.
    #[error("Date range {from} to {to} spans {days} days, more than the {max} allowed")]
    RangeTooLong {
        /// The requested first day.
        from: NaiveDate,
        /// The requested last day.
        to: NaiveDate,
        /// Number of days in the range, inclusive.
        days: i64,
        /// The largest accepted number of days.
        max: i64,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
