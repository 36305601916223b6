//! Layout pass benchmarks.
//!
//! Measures a full pass (cluster, pack, attributes) and the arrange
//! pipeline with merging over increasingly crowded days.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daygrid::layout::{compute_layout, pull_items, EventSliceSource};
use daygrid::{DayGrid, DayViewLayout, Event, GridConfig, TimeCoordinateMapper};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 18).expect("valid date")
}

fn minute(m: i64) -> NaiveDateTime {
    day().and_hms_opt(0, 0, 0).expect("valid time") + Duration::minutes(m)
}

/// Deterministic events with heavy overlap in working hours.
fn generate_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let i = i as i64;
            let start = 8 * 60 + (i * 37) % (10 * 60);
            let length = 15 + (i * 53) % 120;
            Event::new(
                format!("Event {i}"),
                minute(start),
                minute(start + length),
                None,
                None,
                false,
            )
            .expect("valid event")
        })
        .collect()
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let mapper = TimeCoordinateMapper::new(1.0, 20.0);

    for count in [10, 100, 1_000] {
        let events = generate_events(count);
        let items = pull_items(&EventSliceSource::new(&events));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| compute_layout(black_box(items), day(), mapper));
        });
    }
    group.finish();
}

fn bench_memoized_prepare(c: &mut Criterion) {
    let events = generate_events(1_000);
    let source = EventSliceSource::new(&events);
    let mut layout = DayViewLayout::new(&GridConfig::default());
    layout.prepare(&source, day());

    c.bench_function("prepare_memoized_1000", |b| {
        b.iter(|| layout.prepare(black_box(&source), day()).len());
    });
}

fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange");
    let config = GridConfig::default();

    for merge in [false, true] {
        let events = generate_events(500);
        group.bench_with_input(
            BenchmarkId::new("merge", merge),
            &events,
            |b, events| {
                b.iter(|| {
                    // Fresh grid so the memo never short-circuits the pass
                    let mut grid = DayGrid::new(&config, merge);
                    grid.arrange(black_box(events), day()).timed().len()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compute_layout,
    bench_memoized_prepare,
    bench_arrange
);
criterion_main!(benches);
