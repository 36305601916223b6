//! Core layout newtypes

use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Position of an item within its data source. 0-indexed.
///
/// This is the only handle the layout keeps on an item: a key, never a
/// reference into the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Error returned when a minute value does not fall inside a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("minute of day must be < 1440 (got {0})")]
pub struct InvalidMinuteOfDay(pub u32);

/// A wall-clock time of day with minute resolution. Always `< 1440`.
///
/// Carries no date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// The last representable minute, 23:59.
    pub const LAST: Self = Self(MINUTES_PER_DAY as u16 - 1);

    /// Smart constructor that validates `minutes < 1440`.
    pub fn new(minutes: u32) -> Result<Self, InvalidMinuteOfDay> {
        if minutes >= MINUTES_PER_DAY {
            Err(InvalidMinuteOfDay(minutes))
        } else {
            Ok(Self(minutes as u16))
        }
    }

    /// Build from an hour and minute pair.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, InvalidMinuteOfDay> {
        Self::new(hour.saturating_mul(60).saturating_add(minute))
    }

    /// Clamp an arbitrary minute count into the day.
    pub fn saturating(minutes: i64) -> Self {
        Self(minutes.clamp(0, i64::from(MINUTES_PER_DAY) - 1) as u16)
    }

    /// Minutes since midnight.
    pub fn get(&self) -> u32 {
        u32::from(self.0)
    }

    /// Hour component, 0-23.
    pub fn hour(&self) -> u32 {
        self.get() / 60
    }

    /// Minute component, 0-59.
    pub fn minute(&self) -> u32 {
        self.get() % 60
    }

    /// Convert into a time of day with zero seconds.
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for MinuteOfDay {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

/// Half-open time interval `[start, end)` of an item.
///
/// Derived on demand from an item's start and end; never stored on events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Create a new interval. No ordering is enforced here: layout code must
    /// tolerate degenerate intervals coming from a data source.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Strict overlap: intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the interval; negative for inverted inputs.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}
