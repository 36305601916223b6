//! Property-based tests for layout invariants.
//!
//! Tests validate:
//! 1. Time ↔ pixel mapping round-trips on whole minutes
//! 2. Items sharing a column never overlap
//! 3. Clusters partition the adjustable items
//! 4. Horizontal geometry stays inside the grid and column boxes never collide
//! 5. Merging is idempotent, keeps the input's union, and keeps all-day events
//! 6. Memoized passes equal fresh passes

use chrono::{Duration, NaiveDate, NaiveDateTime};
use daygrid::layout::{
    compute_layout, merge_events, pull_items, ElementKind, EventSliceSource, MinuteOfDay,
    TimeCoordinateMapper,
};
use daygrid::{DayViewLayout, Event, GridConfig, LayoutAttribute};
use proptest::prelude::*;
use std::collections::HashSet;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 18).unwrap()
}

fn minute(m: u32) -> NaiveDateTime {
    day().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(i64::from(m))
}

/// (start minute, length in minutes, selected, all-day)
fn event_specs() -> impl Strategy<Value = Vec<(u32, u32, bool, bool)>> {
    prop::collection::vec(
        (0u32..1440, 0u32..240, any::<bool>(), prop::bool::weighted(0.2)),
        0..24,
    )
}

fn build_events(specs: &[(u32, u32, bool, bool)]) -> Vec<Event> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(start, length, selected, all_day))| {
            Event::new(
                format!("E{i}"),
                minute(start),
                minute(start + length),
                None,
                None,
                all_day,
            )
            .unwrap()
            .selected(selected)
        })
        .collect()
}

fn layout_of(events: &[Event]) -> daygrid::LayoutSnapshot {
    let items = pull_items(&EventSliceSource::new(events));
    compute_layout(&items, day(), TimeCoordinateMapper::new(1.0, 20.0))
}

// ===== Property 1: Time Mapping =====

proptest! {
    #[test]
    fn time_of_day_inverts_offset(
        m in 0u32..1440,
        ppm in 0.25f64..4.0,
        inset in 0.0f64..60.0,
    ) {
        let mapper = TimeCoordinateMapper::new(ppm, inset);
        let y = mapper.offset(f64::from(m));
        prop_assert_eq!(mapper.time_of_day(y), MinuteOfDay::new(m).unwrap());
    }

    #[test]
    fn time_of_day_always_within_day(y in any::<f64>()) {
        let mapper = TimeCoordinateMapper::new(1.0, 20.0);
        prop_assert!(mapper.time_of_day(y).get() < 1440);
    }
}

// ===== Property 2-4: Column Packing =====

proptest! {
    #[test]
    fn items_sharing_a_column_never_overlap(specs in event_specs()) {
        let snapshot = layout_of(&build_events(&specs));
        for packing in snapshot.packings() {
            let placements = packing.placements();
            for (i, a) in placements.iter().enumerate() {
                for b in &placements[i + 1..] {
                    if a.column == b.column {
                        prop_assert!(
                            !a.interval.overlaps(&b.interval),
                            "{:?} and {:?} share column {}", a.index, b.index, a.column
                        );
                    }
                }
                prop_assert!(a.span >= 1);
                prop_assert!(a.column + a.span <= packing.total_columns());
            }
        }
    }

    #[test]
    fn clusters_partition_adjustable_items(specs in event_specs()) {
        let events = build_events(&specs);
        let snapshot = layout_of(&events);

        let mut seen = HashSet::new();
        for cluster in snapshot.clusters() {
            for member in cluster.members() {
                prop_assert!(seen.insert(member.index.get()), "item in two clusters");
            }
        }
        let adjustable: HashSet<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_selected())
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(seen, adjustable);
    }

    #[test]
    fn geometry_stays_inside_the_grid(specs in event_specs()) {
        let snapshot = layout_of(&build_events(&specs));
        prop_assert_eq!(snapshot.len(), specs.len());
        for attr in snapshot.attributes() {
            prop_assert!(attr.x_fraction >= 0.0 && attr.x_fraction < 1.0);
            prop_assert!(attr.width_fraction > 0.0 && attr.width_fraction <= 1.0);
            prop_assert!(attr.x_fraction + attr.width_fraction <= 1.0 + 1e-9);
            prop_assert!(attr.height >= 1.0);
        }
    }
}

fn rects_intersect(a: &LayoutAttribute, b: &LayoutAttribute) -> bool {
    const EPS: f64 = 1e-9;
    a.x_fraction + EPS < b.x_fraction + b.width_fraction
        && b.x_fraction + EPS < a.x_fraction + a.width_fraction
        && a.y_offset + EPS < b.max_y()
        && b.y_offset + EPS < a.max_y()
}

/// Starts drawn from a few slots so zero-length and duplicate items are common.
fn crowded_specs() -> impl Strategy<Value = Vec<(u32, u32, bool, bool)>> {
    prop::collection::vec(
        (
            (0u32..8).prop_map(|slot| 540 + slot * 15),
            prop::sample::select(vec![0u32, 0, 1, 15, 30, 60]),
            prop::bool::weighted(0.25),
            Just(false),
        ),
        0..16,
    )
}

proptest! {
    #[test]
    fn column_boxes_never_collide(specs in crowded_specs()) {
        let snapshot = layout_of(&build_events(&specs));
        let attrs = snapshot.attributes();

        for (i, a) in attrs.iter().enumerate() {
            for (j, b) in attrs.iter().enumerate().skip(i + 1) {
                if !rects_intersect(a, b) {
                    continue;
                }
                match (a.kind, b.kind) {
                    (ElementKind::Event, ElementKind::Event) => {
                        prop_assert!(false, "items {} and {} collide: {:?} {:?}", i, j, a, b);
                    }
                    (ElementKind::StackedEvent, ElementKind::Event) => {
                        prop_assert!(a.z_index > b.z_index, "{} not above {}", i, j);
                    }
                    (ElementKind::Event, ElementKind::StackedEvent) => {
                        prop_assert!(b.z_index > a.z_index, "{} not above {}", j, i);
                    }
                    _ => {
                        prop_assert_ne!(a.z_index, b.z_index);
                    }
                }
            }
        }
    }
}

// ===== Property 5: Merging =====

proptest! {
    #[test]
    fn merge_is_idempotent(specs in event_specs()) {
        let once = merge_events(&build_events(&specs));
        let twice = merge_events(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merged_spans_have_the_same_union_as_the_input(specs in event_specs()) {
        let events = build_events(&specs);
        let merged = merge_events(&events);
        let timed_in: Vec<&Event> = events.iter().filter(|e| !e.is_all_day()).collect();
        let timed_out: Vec<&Event> = merged.iter().filter(|e| !e.is_all_day()).collect();

        for event in &timed_in {
            prop_assert!(
                timed_out.iter().any(|m| m.start() <= event.start() && event.end() <= m.end()),
                "{} not covered", event.name()
            );
        }

        // Each merged span is gap-free coverage by the inputs inside it
        for span in &timed_out {
            let mut inside: Vec<&&Event> = timed_in
                .iter()
                .filter(|e| span.start() <= e.start() && e.end() <= span.end())
                .collect();
            inside.sort_by_key(|e| (e.start(), e.end()));

            prop_assert_eq!(inside.first().map(|e| e.start()), Some(span.start()));
            let mut reach = span.start();
            for event in &inside {
                prop_assert!(event.start() <= reach, "gap before {}", event.name());
                reach = reach.max(event.end());
            }
            prop_assert_eq!(reach, span.end());
        }

        for (i, a) in timed_out.iter().enumerate() {
            for b in &timed_out[i + 1..] {
                prop_assert!(a.end() < b.start() || b.end() < a.start());
            }
        }
    }

    #[test]
    fn all_day_events_follow_timed_events_unchanged(specs in event_specs()) {
        let events = build_events(&specs);
        let merged = merge_events(&events);

        let all_day_in: Vec<&Event> = events.iter().filter(|e| e.is_all_day()).collect();
        let timed_count = merged.iter().take_while(|e| !e.is_all_day()).count();
        let tail: Vec<&Event> = merged[timed_count..].iter().collect();

        prop_assert_eq!(tail, all_day_in);
    }
}

// ===== Property 6: Memoization =====

proptest! {
    #[test]
    fn memoized_pass_matches_fresh_pass(specs in event_specs()) {
        let events = build_events(&specs);
        let source = EventSliceSource::new(&events);
        let mut layout = DayViewLayout::new(&GridConfig::default());

        let first = layout.prepare(&source, day()).clone();
        let second = layout.prepare(&source, day()).clone();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, layout_of(&events));
    }
}
