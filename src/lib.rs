//! Attendance Reconciliation Engine
//!
//! This crate reconciles geotagged clock-in/clock-out events, shift
//! assignments and leave requests into a per-employee, per-day attendance
//! ledger with worked time, lateness, overtime and absence/leave
//! classification, and serves it over a small JSON API.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
