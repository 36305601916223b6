//! Creating a placeholder event from a tap on the grid.

use super::time_mapper::TimeCoordinateMapper;
use crate::config::{EventLength, GridConfig};
use crate::model::Event;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// New selected event starting at the slot under `y`.
///
/// The tapped time is snapped down to a multiple of `length`, so with
/// half-hour events a tap at 09:44 starts the event at 09:30.
pub fn event_for_tap(
    day: NaiveDate,
    y: f64,
    mapper: &TimeCoordinateMapper,
    length: EventLength,
    title: &str,
) -> Event {
    let slot = length.minutes();
    let minute = mapper.time_of_day(y).get() / slot * slot;
    let start = day.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minute));
    let end = start
        .checked_add_signed(Duration::minutes(i64::from(slot)))
        .unwrap_or(NaiveDateTime::MAX);

    Event::with_default_length(title, start)
        .with_end(end)
        .selected(true)
}

/// Tap handler bound to a grid configuration.
#[derive(Debug, Clone)]
pub struct EventCreator {
    mapper: TimeCoordinateMapper,
    length: EventLength,
    title: String,
}

impl EventCreator {
    /// Creator using the configured density, event length and title.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            mapper: TimeCoordinateMapper::from_config(config),
            length: config.default_event_length(),
            title: config.created_event_text().to_string(),
        }
    }

    /// Event for a tap at `y` on `day`.
    pub fn create_at(&self, day: NaiveDate, y: f64) -> Event {
        event_for_tap(day, y, &self.mapper, self.length, &self.title)
    }
}
