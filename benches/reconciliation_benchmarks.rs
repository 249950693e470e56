//! Performance benchmarks for the attendance engine.
//!
//! Covers the pure reconciliation pipeline at growing roster sizes and the
//! full HTTP round trip for a month-long summary.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{AttendanceEvent, AttendanceSnapshot, EventType};
use attendance_engine::reconciliation::{
    DateRange, LeaveCategoryRules, RecordFilter, ShiftCatalog, aggregate_for_dashboard,
    summarize_range,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const DAYS: i64 = 30;

fn month_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn at(day: i64, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    let naive = (month_start() + Duration::days(day))
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .from_local_datetime(&naive)
        .unwrap()
}

fn event(employee_id: &str, event_type: EventType, timestamp: DateTime<FixedOffset>) -> AttendanceEvent {
    AttendanceEvent {
        id: format!("{employee_id}-{timestamp}"),
        employee_id: employee_id.to_string(),
        branch_id: "central".to_string(),
        event_type,
        timestamp,
        coordinates: None,
        distance_from_site: None,
        within_geofence: None,
        photo_ref: None,
    }
}

/// A month of attendance for `employees` people, with every seventh day missed.
fn create_snapshot(employees: usize) -> AttendanceSnapshot {
    let roster: Vec<String> = (0..employees).map(|i| format!("emp_{i:04}")).collect();
    let mut events = Vec::with_capacity(employees * DAYS as usize * 2);
    for (i, employee_id) in roster.iter().enumerate() {
        for day in 0..DAYS {
            if (day + i as i64) % 7 == 0 {
                continue;
            }
            let late = ((i as i64 + day) % 20) as u32;
            events.push(event(employee_id, EventType::In, at(day, 10, late)));
            events.push(event(employee_id, EventType::Out, at(day, 19, 30 - late)));
        }
    }
    AttendanceSnapshot {
        roster,
        events,
        ..Default::default()
    }
}

fn month_range() -> DateRange {
    DateRange::new(month_start(), month_start() + Duration::days(DAYS - 1), false).unwrap()
}

/// Benchmark: month summary at growing roster sizes.
fn bench_summarize_scaling(c: &mut Criterion) {
    let catalog = ShiftCatalog::default();
    let range = month_range();

    let mut group = c.benchmark_group("summarize_month");

    for employees in [1usize, 10, 50, 200].iter() {
        let snapshot = create_snapshot(*employees);

        group.throughput(Throughput::Elements((*employees as u64) * DAYS as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employees),
            &snapshot,
            |b, snapshot| b.iter(|| black_box(summarize_range(snapshot, &catalog, &range))),
        );
    }

    group.finish();
}

/// Benchmark: dashboard aggregation over a 200-person month.
fn bench_dashboard(c: &mut Criterion) {
    let summary = summarize_range(&create_snapshot(200), &ShiftCatalog::default(), &month_range());
    let rules = LeaveCategoryRules::default();
    let filter = RecordFilter::default();

    let mut group = c.benchmark_group("dashboard");
    group.throughput(Throughput::Elements(summary.records.len() as u64));
    group.bench_function("records_6000", |b| {
        b.iter(|| black_box(aggregate_for_dashboard(&summary.records, &[], &filter, &rules)))
    });
    group.finish();
}

/// Benchmark: POST /summaries for a 50-person month, including JSON encoding.
fn bench_summaries_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    let snapshot = create_snapshot(50);
    let body = serde_json::json!({
        "roster": snapshot.roster,
        "events": snapshot.events,
        "date_from": month_start(),
        "date_to": month_start() + Duration::days(DAYS - 1),
    })
    .to_string();

    c.bench_function("summaries_endpoint_50", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/summaries")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_summarize_scaling,
    bench_dashboard,
    bench_summaries_endpoint,
);
criterion_main!(benches);
