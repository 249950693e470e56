//! Reconciliation logic for the attendance engine.
//!
//! This module turns raw clock events, shift assignments and leave requests
//! into classified attendance records: geofence distance, shift catalog
//! lookup, grouping of events by employee-day, the per-day reconciler, range
//! summaries with per-employee totals, and dashboard time series.

mod aggregator;
mod dashboard;
mod day_reconciler;
mod geo;
mod range_summarizer;
mod shift_catalog;

pub use aggregator::{DayBucket, EventIndex, group_events};
pub use dashboard::{DashboardSummary, LeaveCategoryRules, RecordFilter, aggregate_for_dashboard};
pub use day_reconciler::{covering_leave, reconcile_day};
pub use geo::{EARTH_RADIUS_METERS, Geofence, GeofenceCheck, distance_meters};
pub use range_summarizer::{DateRange, RangeSummary, is_weekend, summarize_range};
pub use shift_catalog::{ShiftCatalog, parse_clock_time};
