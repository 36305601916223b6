//! Final per-item geometry.
//!
//! Adjustable items take their horizontal geometry from their cluster's
//! column packing. Non-adjustable items span the full width and are drawn
//! above every item they overlap.

use super::columns::{ClusterPacking, ColumnPlacement};
use super::data_source::SourceItem;
use super::time_mapper::TimeCoordinateMapper;
use super::types::{TimeInterval, MINUTES_PER_DAY};
use super::z_order::{ElementKind, ZIndexTable};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::HashMap;

/// Geometry of one item on the day grid.
///
/// # Invariants
/// - `0 <= x_fraction < 1`, `0 < width_fraction <= 1`
/// - `x_fraction + width_fraction <= 1`
/// - `height >= pixels_per_minute`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutAttribute {
    /// Left edge as a fraction of the grid width.
    pub x_fraction: f64,
    /// Width as a fraction of the grid width.
    pub width_fraction: f64,
    /// Top edge in pixels.
    pub y_offset: f64,
    /// Height in pixels.
    pub height: f64,
    /// Draw order; higher is on top.
    pub z_index: u32,
    /// Whether the item sits in a column or is stacked full width.
    pub kind: ElementKind,
}

impl LayoutAttribute {
    /// Bottom edge in pixels.
    pub fn max_y(&self) -> f64 {
        self.y_offset + self.height
    }

    /// `true` when the point lies inside the item. Edges on the left and
    /// top are inclusive, right and bottom exclusive.
    pub fn contains(&self, x_fraction: f64, y: f64) -> bool {
        x_fraction >= self.x_fraction
            && x_fraction < self.x_fraction + self.width_fraction
            && y >= self.y_offset
            && y < self.max_y()
    }
}

/// Turns column placements and raw items into [`LayoutAttribute`]s for one day.
#[derive(Debug, Clone, Copy)]
pub struct LayoutAttributesBuilder {
    mapper: TimeCoordinateMapper,
    day_start: NaiveDateTime,
}

impl LayoutAttributesBuilder {
    /// Builder for items laid out on `day`.
    pub fn new(mapper: TimeCoordinateMapper, day: NaiveDate) -> Self {
        Self {
            mapper,
            day_start: day.and_time(NaiveTime::MIN),
        }
    }

    /// Minutes from the day's midnight to `instant`, clamped to the day.
    /// Seconds count as fractions of a minute.
    pub fn minutes_into_day(&self, instant: NaiveDateTime) -> f64 {
        let seconds = (instant - self.day_start).num_seconds() as f64;
        (seconds / 60.0).clamp(0.0, f64::from(MINUTES_PER_DAY))
    }

    /// `(y_offset, height)` of an interval, height at least one minute tall.
    pub fn vertical(&self, interval: &TimeInterval) -> (f64, f64) {
        let y_offset = self.mapper.offset(self.minutes_into_day(interval.start));
        let bottom = self.mapper.offset(self.minutes_into_day(interval.end));
        let height = (bottom - y_offset).max(self.mapper.pixels_per_minute());
        (y_offset, height)
    }

    /// Geometry of an item placed in a column.
    pub fn adjustable(&self, placement: &ColumnPlacement) -> LayoutAttribute {
        let (y_offset, height) = self.vertical(&placement.interval);
        LayoutAttribute {
            x_fraction: placement.x_fraction(),
            width_fraction: placement.width_fraction(),
            y_offset,
            height,
            z_index: ZIndexTable::event(placement.z_rank),
            kind: ElementKind::Event,
        }
    }

    /// Geometry of a full-width item at the given z-index.
    pub fn stacked(&self, interval: &TimeInterval, z_index: u32) -> LayoutAttribute {
        let (y_offset, height) = self.vertical(interval);
        LayoutAttribute {
            x_fraction: 0.0,
            width_fraction: 1.0,
            y_offset,
            height,
            z_index,
            kind: ElementKind::StackedEvent,
        }
    }

    /// Attributes for every item, in the same order as `items`.
    ///
    /// Items are matched to their placements by [`SourceItem::index`], so
    /// the slice need not be in index order. `packings` must cover every
    /// adjustable item; an item without a placement is stacked. Non-adjustable items are
    /// resolved in (start, index) order, each landing one above the highest
    /// item it overlaps among the packed items and the stacked items
    /// resolved before it.
    pub fn build(&self, items: &[SourceItem], packings: &[ClusterPacking]) -> Vec<LayoutAttribute> {
        let day = self.day_start.date();

        let placements: HashMap<usize, &ColumnPlacement> = packings
            .iter()
            .flat_map(|packing| packing.placements())
            .map(|placement| (placement.index.get(), placement))
            .collect();

        let mut resolved: Vec<(TimeInterval, u32)> = placements
            .values()
            .map(|placement| (placement.interval, ZIndexTable::event(placement.z_rank)))
            .collect();

        let mut stacked: Vec<(usize, TimeInterval)> = items
            .iter()
            .filter(|item| !placements.contains_key(&item.index.get()))
            .map(|item| (item.index.get(), item.interval_within(day)))
            .collect();
        stacked.sort_by_key(|&(index, interval)| (interval.start, index));

        let mut stacked_z: HashMap<usize, u32> = HashMap::with_capacity(stacked.len());
        for (index, interval) in stacked {
            let highest = resolved
                .iter()
                .filter(|(other, _)| other.overlaps(&interval))
                .map(|&(_, z)| z)
                .max();
            let z = ZIndexTable::stacked_over(highest);
            resolved.push((interval, z));
            stacked_z.insert(index, z);
        }

        items
            .iter()
            .map(|item| match placements.get(&item.index.get()) {
                Some(placement) => self.adjustable(placement),
                None => {
                    let z = stacked_z
                        .get(&item.index.get())
                        .copied()
                        .unwrap_or_else(|| ZIndexTable::stacked_over(None));
                    self.stacked(&item.interval_within(day), z)
                }
            })
            .collect()
    }
}
