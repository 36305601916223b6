//! Time of day ↔ vertical pixel offset mapping for the day grid.

use super::types::{MinuteOfDay, MINUTES_PER_DAY};
use crate::config::GridConfig;

/// Linear mapping between minutes since midnight and y offsets.
///
/// `offset = top_inset + minutes * pixels_per_minute`
///
/// # Invariants
/// - `pixels_per_minute` is finite and `> 0` (validated by `GridConfig`)
/// - `time_of_day(offset(m)) == m` for every `m < 1440`
/// - `offset` is monotonically non-decreasing in `minutes`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeCoordinateMapper {
    pixels_per_minute: f64,
    top_inset: f64,
}

impl TimeCoordinateMapper {
    /// Create a mapper from raw values. Callers are expected to pass a
    /// validated, positive density; see `GridConfig`.
    pub fn new(pixels_per_minute: f64, top_inset: f64) -> Self {
        Self {
            pixels_per_minute,
            top_inset,
        }
    }

    /// Create a mapper using the grid's density and top inset margin.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.pixels_per_minute(), config.top_inset_margin())
    }

    /// Pixels per minute of grid time.
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_minute
    }

    /// Fixed vertical offset of 00:00.
    pub fn top_inset(&self) -> f64 {
        self.top_inset
    }

    /// Y offset of `minutes` since midnight, using the configured inset.
    pub fn offset(&self, minutes: f64) -> f64 {
        self.offset_with_inset(minutes, self.top_inset)
    }

    /// Y offset of `minutes` since midnight below an explicit top inset.
    pub fn offset_with_inset(&self, minutes: f64, top_inset: f64) -> f64 {
        top_inset + minutes * self.pixels_per_minute
    }

    /// Y offset of a minute of day.
    pub fn offset_for(&self, minute: MinuteOfDay) -> f64 {
        self.offset(f64::from(minute.get()))
    }

    /// Time of day at a y offset, using the configured inset.
    pub fn time_of_day(&self, pixel_offset: f64) -> MinuteOfDay {
        self.time_of_day_with_inset(pixel_offset, self.top_inset)
    }

    /// Time of day at a y offset below an explicit top inset.
    ///
    /// Rounds to the nearest minute and clamps into `[00:00, 23:59]`.
    /// Non-finite offsets map to midnight.
    pub fn time_of_day_with_inset(&self, pixel_offset: f64, top_inset: f64) -> MinuteOfDay {
        let minutes = ((pixel_offset - top_inset) / self.pixels_per_minute).round();
        if !minutes.is_finite() {
            return MinuteOfDay::MIDNIGHT;
        }
        MinuteOfDay::saturating(minutes as i64)
    }

    /// Top of the n-th time slot of `slot_minutes` length.
    pub fn slot_offset(&self, slot: u32, slot_minutes: u32) -> f64 {
        self.offset(f64::from(slot.saturating_mul(slot_minutes)))
    }

    /// Total scrollable height: the whole day plus the inset above and below.
    pub fn content_height(&self) -> f64 {
        self.offset(f64::from(MINUTES_PER_DAY)) + self.top_inset
    }

    /// Scroll position that brings `hour` to the top of the viewport.
    pub fn scroll_offset_for_hour(&self, hour: u32) -> f64 {
        f64::from(hour.min(23) * 60) * self.pixels_per_minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_adds_inset_to_scaled_minutes() {
        let mapper = TimeCoordinateMapper::new(1.5, 20.0);
        assert_eq!(mapper.offset(0.0), 20.0);
        assert_eq!(mapper.offset(60.0), 110.0);
        assert_eq!(mapper.offset_with_inset(60.0, 0.0), 90.0);
    }

    #[test]
    fn time_of_day_inverts_offset_for_whole_day() {
        let mapper = TimeCoordinateMapper::new(0.75, 12.0);
        for m in 0..MINUTES_PER_DAY {
            let minute = MinuteOfDay::new(m).unwrap();
            assert_eq!(mapper.time_of_day(mapper.offset_for(minute)), minute);
        }
    }

    #[test]
    fn time_of_day_rounds_to_nearest_minute() {
        let mapper = TimeCoordinateMapper::new(2.0, 0.0);
        assert_eq!(mapper.time_of_day(121.2).get(), 61);
        assert_eq!(mapper.time_of_day(120.8).get(), 60);
    }

    #[test]
    fn time_of_day_clamps_outside_grid() {
        let mapper = TimeCoordinateMapper::new(1.0, 20.0);
        assert_eq!(mapper.time_of_day(-500.0), MinuteOfDay::MIDNIGHT);
        assert_eq!(mapper.time_of_day(5.0), MinuteOfDay::MIDNIGHT);
        assert_eq!(mapper.time_of_day(100_000.0), MinuteOfDay::LAST);
    }

    #[test]
    fn time_of_day_handles_non_finite_offsets() {
        let mapper = TimeCoordinateMapper::new(1.0, 0.0);
        assert_eq!(mapper.time_of_day(f64::NAN), MinuteOfDay::MIDNIGHT);
        assert_eq!(mapper.time_of_day(f64::INFINITY), MinuteOfDay::MIDNIGHT);
    }

    #[test]
    fn slot_offset_steps_by_slot_length() {
        let mapper = TimeCoordinateMapper::new(1.0, 10.0);
        assert_eq!(mapper.slot_offset(0, 30), 10.0);
        assert_eq!(mapper.slot_offset(3, 30), 100.0);
    }

    #[test]
    fn content_height_includes_both_margins() {
        let mapper = TimeCoordinateMapper::new(1.0, 20.0);
        assert_eq!(mapper.content_height(), 1480.0);
    }

    #[test]
    fn scroll_offset_for_default_hour() {
        let mapper = TimeCoordinateMapper::new(1.0, 20.0);
        assert_eq!(mapper.scroll_offset_for_hour(8), 480.0);
        assert_eq!(mapper.scroll_offset_for_hour(40), 23.0 * 60.0);
    }
}
