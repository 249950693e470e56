//! Core data models for the attendance engine.
//!
//! This module contains the domain models used throughout the engine: raw
//! clock events, shifts, leave requests, the input snapshot, and the derived
//! records and dashboard rows.

mod dashboard;
mod event;
mod leave;
mod record;
mod shift;
mod snapshot;

pub use dashboard::{DailyAggregate, LeaveCategory, LeaveDailyAggregate};
pub use event::{AttendanceEvent, Coordinates, EventType};
pub use leave::{LeaveRequest, LeaveStatus};
pub use record::{AttendanceRecord, AttendanceStatus, EmployeeTotals};
pub use shift::ShiftDefinition;
pub use snapshot::AttendanceSnapshot;
