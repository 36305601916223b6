//! Pull interface between the layout engine and whoever owns the items.

use super::types::{ItemIndex, TimeInterval};
use crate::model::Event;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Shortest span an item occupies in a layout pass, in minutes.
pub const MIN_LAYOUT_MINUTES: i64 = 1;

/// Items queried during a layout pass.
///
/// The engine holds no reference to a data source beyond one call to
/// [`DayViewLayout::prepare`](super::engine::DayViewLayout::prepare). Items
/// are addressed by their 0-based position.
pub trait DayLayoutDataSource {
    /// Number of items in the source.
    fn item_count(&self) -> usize;

    /// Wall-clock start of `item`.
    fn start_time(&self, item: ItemIndex) -> NaiveDateTime;

    /// Wall-clock end of `item`.
    fn end_time(&self, item: ItemIndex) -> NaiveDateTime;

    /// `true` to confine the item to a column, `false` to stack it full
    /// width above everything it overlaps.
    fn is_layout_adjustable(&self, _item: ItemIndex) -> bool {
        true
    }
}

/// One item as pulled from a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceItem {
    /// Position of the item in its source.
    pub index: ItemIndex,
    /// Start as reported by the source.
    pub start: NaiveDateTime,
    /// End as reported by the source.
    pub end: NaiveDateTime,
    /// Whether the item is packed into a column.
    pub adjustable: bool,
}

impl SourceItem {
    /// The item's layout interval on `day`.
    ///
    /// Instants before the day clamp to its midnight, instants after it to
    /// the following midnight. The result is at least
    /// [`MIN_LAYOUT_MINUTES`] long, matching the height an item is drawn
    /// with, so items that render on top of each other always overlap.
    /// An item at or past the day's end occupies its last minute.
    pub fn interval_within(&self, day: NaiveDate) -> TimeInterval {
        let min_length = Duration::minutes(MIN_LAYOUT_MINUTES);
        let day_start = day.and_time(NaiveTime::MIN);
        let day_end = day_start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(NaiveDateTime::MAX);
        let last_start = day_end
            .checked_sub_signed(min_length)
            .unwrap_or(day_start)
            .max(day_start);
        let clamp = |t: NaiveDateTime| t.clamp(day_start, day_end);

        let start = clamp(self.start).min(last_start);
        let shortest_end = start.checked_add_signed(min_length).unwrap_or(day_end);
        let end = clamp(self.end).max(shortest_end);
        TimeInterval::new(start, end)
    }
}

/// Pull every item of `source` once, in index order.
pub fn pull_items<S: DayLayoutDataSource + ?Sized>(source: &S) -> Vec<SourceItem> {
    (0..source.item_count())
        .map(ItemIndex::new)
        .map(|index| SourceItem {
            index,
            start: source.start_time(index),
            end: source.end_time(index),
            adjustable: source.is_layout_adjustable(index),
        })
        .collect()
}

/// Data source over a borrowed slice of events.
///
/// Selected events are not adjustable: a freshly created event floats
/// full width above whatever it covers until it is saved.
#[derive(Debug, Clone, Copy)]
pub struct EventSliceSource<'a> {
    events: &'a [Event],
}

impl<'a> EventSliceSource<'a> {
    /// Source over `events`, addressed by slice position.
    pub fn new(events: &'a [Event]) -> Self {
        Self { events }
    }

    /// Event at `item`, if in range.
    pub fn event(&self, item: ItemIndex) -> Option<&'a Event> {
        self.events.get(item.get())
    }
}

impl DayLayoutDataSource for EventSliceSource<'_> {
    fn item_count(&self) -> usize {
        self.events.len()
    }

    fn start_time(&self, item: ItemIndex) -> NaiveDateTime {
        self.events[item.get()].start()
    }

    fn end_time(&self, item: ItemIndex) -> NaiveDateTime {
        self.events[item.get()].end()
    }

    fn is_layout_adjustable(&self, item: ItemIndex) -> bool {
        !self.events[item.get()].is_selected()
    }
}
