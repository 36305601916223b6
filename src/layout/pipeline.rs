//! End-to-end arrangement of one day's events.
//!
//! Events that touch the day are split into all-day and timed groups, the
//! timed group is optionally merged, laid out through [`DayViewLayout`], and
//! the all-day strip is sized.

use super::all_day::AllDayLayout;
use super::attributes::LayoutAttribute;
use super::data_source::EventSliceSource;
use super::engine::{DayViewLayout, LayoutSnapshot};
use super::merge::merge_events;
use super::types::ItemIndex;
use crate::config::GridConfig;
use crate::model::Event;
use chrono::NaiveDate;
use tracing::debug;

/// Reusable arranger. Keeps the layout engine between calls so an
/// unchanged day is not laid out twice.
#[derive(Debug, Clone)]
pub struct DayGrid {
    layout: DayViewLayout,
    all_day: AllDayLayout,
    merge: bool,
}

impl DayGrid {
    /// Arranger for the given grid; `merge` collapses overlapping timed events first.
    pub fn new(config: &GridConfig, merge: bool) -> Self {
        Self {
            layout: DayViewLayout::new(config),
            all_day: AllDayLayout::from_config(config),
            merge,
        }
    }

    /// Whether overlapping timed events are merged before layout.
    pub fn merges(&self) -> bool {
        self.merge
    }

    /// Arrange every event of `events` that occurs on `day`.
    pub fn arrange(&mut self, events: &[Event], day: NaiveDate) -> ArrangedDay {
        let on_day: Vec<Event> = events
            .iter()
            .filter(|event| event.occurs_on_day(day))
            .cloned()
            .collect();

        let ordered = if self.merge {
            merge_events(&on_day)
        } else {
            on_day
        };
        let (all_day, timed): (Vec<Event>, Vec<Event>) =
            ordered.into_iter().partition(|event| event.is_all_day());

        debug!(
            %day,
            input = events.len(),
            timed = timed.len(),
            all_day = all_day.len(),
            merged = self.merge,
            "Arranging day"
        );

        let snapshot = self
            .layout
            .prepare(&EventSliceSource::new(&timed), day)
            .clone();

        ArrangedDay {
            day,
            all_day_rows: self.all_day.attributes(all_day.len()),
            all_day_height: self.all_day.height(all_day.len()),
            timed,
            all_day,
            snapshot,
        }
    }
}

/// Result of [`DayGrid::arrange`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrangedDay {
    day: NaiveDate,
    timed: Vec<Event>,
    all_day: Vec<Event>,
    snapshot: LayoutSnapshot,
    all_day_rows: Vec<LayoutAttribute>,
    all_day_height: f64,
}

impl ArrangedDay {
    /// Day that was arranged.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Timed events as laid out; `ItemIndex(i)` refers to `timed()[i]`.
    pub fn timed(&self) -> &[Event] {
        &self.timed
    }

    /// All-day events in input order.
    pub fn all_day(&self) -> &[Event] {
        &self.all_day
    }

    /// Timed events followed by all-day events.
    pub fn merged_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.timed.iter().chain(self.all_day.iter())
    }

    /// Geometry of a timed event.
    pub fn attributes_for(&self, item: ItemIndex) -> Option<&LayoutAttribute> {
        self.snapshot.attributes_for(item)
    }

    /// Row geometry of an all-day event inside the all-day strip.
    pub fn all_day_attributes_for(&self, item: ItemIndex) -> Option<&LayoutAttribute> {
        self.all_day_rows.get(item.get())
    }

    /// Full layout pass over the timed events.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    /// Height of the all-day strip.
    pub fn all_day_height(&self) -> f64 {
        self.all_day_height
    }

    /// Timed events paired with their geometry.
    pub fn timed_with_attributes(&self) -> impl Iterator<Item = (&Event, &LayoutAttribute)> + '_ {
        self.timed.iter().zip(self.snapshot.attributes())
    }
}
