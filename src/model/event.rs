//! Calendar event value type.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Length given to events built with [`Event::with_default_length`].
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

/// Format used by [`Event::display_time_string`], e.g. `1:00 PM`.
const DISPLAY_TIME_FORMAT: &str = "%-I:%M %p";

/// Error returned when event construction fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEvent {
    /// The end instant precedes the start instant.
    #[error("event end ({end}) is before its start ({start})")]
    EndBeforeStart {
        /// Requested start.
        start: NaiveDateTime,
        /// Requested end.
        end: NaiveDateTime,
    },
}

/// A single calendar event as supplied by a data source.
///
/// Events are immutable for the duration of a layout pass. Only
/// `is_selected` may be toggled, and only between passes.
///
/// # Invariants
/// - `end >= start` (enforced by the constructors)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    name: String,
    location: Option<String>,
    timezone: Option<String>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_all_day: bool,
    is_selected: bool,
}

impl Event {
    /// Smart constructor: rejects events whose end precedes their start.
    pub fn new(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: Option<String>,
        timezone: Option<String>,
        is_all_day: bool,
    ) -> Result<Self, InvalidEvent> {
        if end < start {
            return Err(InvalidEvent::EndBeforeStart { start, end });
        }
        Ok(Self {
            name: name.into(),
            location,
            timezone,
            start,
            end,
            is_all_day,
            is_selected: false,
        })
    }

    /// A one-hour timed event starting at `start`. Cannot fail: the end
    /// saturates at the last representable instant.
    pub fn with_default_length(name: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            location: None,
            timezone: None,
            start,
            end: start
                .checked_add_signed(Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES))
                .unwrap_or(NaiveDateTime::MAX),
            is_all_day: false,
            is_selected: false,
        }
    }

    /// Builder-style setter for the selection flag.
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form location, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Timezone name exactly as the data source supplied it.
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Wall-clock start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Wall-clock end, never before the start.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether the event belongs in the all-day strip.
    pub fn is_all_day(&self) -> bool {
        self.is_all_day
    }

    /// Whether the event is selected, such as a freshly created one.
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Toggle selection. Must not be called while a layout pass is running.
    pub fn set_selected(&mut self, is_selected: bool) {
        self.is_selected = is_selected;
    }

    /// Event duration (never negative).
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of this event with a different end. Used when merging runs,
    /// where the new end is always `>=` the original one.
    pub(crate) fn with_end(&self, end: NaiveDateTime) -> Self {
        Self {
            end: end.max(self.start),
            ..self.clone()
        }
    }

    /// Human-readable time range, e.g. `12:00 PM - 1:00 PM`.
    pub fn display_time_string(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(DISPLAY_TIME_FORMAT),
            self.end.format(DISPLAY_TIME_FORMAT)
        )
    }

    /// Whether any part of the event falls on `date`.
    ///
    /// Multi-day events occur on every day they touch. The end is
    /// exclusive, so an event ending exactly at midnight does not reach into
    /// the following day.
    pub fn occurs_on_day(&self, date: NaiveDate) -> bool {
        let last_day = if self.end > self.start && self.end.time() == NaiveTime::MIN {
            self.end.date().pred_opt().unwrap_or(self.end.date())
        } else {
            self.end.date()
        };
        self.start.date() <= date && date <= last_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 18).unwrap() + Duration::days(offset)
    }

    fn time(h: u32, m: u32, day_offset: i64) -> NaiveDateTime {
        day(day_offset).and_hms_opt(h, m, 0).unwrap()
    }

    fn timed(start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new("", start, end, None, None, false).unwrap()
    }

    #[test]
    fn new_rejects_end_before_start() {
        let result = Event::new("bad", time(10, 0, 0), time(9, 0, 0), None, None, false);
        assert_eq!(
            result,
            Err(InvalidEvent::EndBeforeStart {
                start: time(10, 0, 0),
                end: time(9, 0, 0),
            })
        );
    }

    #[test]
    fn new_accepts_zero_length() {
        let event = timed(time(10, 0, 0), time(10, 0, 0));
        assert_eq!(event.duration(), Duration::zero());
        assert!(!event.is_selected());
    }

    #[test]
    fn default_length_is_one_hour() {
        let event = Event::with_default_length("Standup", time(9, 15, 0));
        assert_eq!(event.end(), time(10, 15, 0));
        assert!(!event.is_all_day());
        assert_eq!(event.location(), None);
    }

    #[test]
    fn display_time_string_uses_twelve_hour_clock() {
        let event = timed(time(12, 0, 0), time(13, 0, 0));
        assert_eq!(event.display_time_string(), "12:00 PM - 1:00 PM");

        let overnight = timed(time(1, 0, -1), time(13, 0, 0));
        assert_eq!(overnight.display_time_string(), "1:00 AM - 1:00 PM");
    }

    #[test]
    fn occurs_on_day_covers_multi_day_events() {
        let today = day(0);
        assert!(timed(time(12, 0, 0), time(13, 0, 0)).occurs_on_day(today));
        assert!(timed(time(12, 0, -1), time(13, 0, 0)).occurs_on_day(today));
        assert!(timed(time(12, 0, 0), time(13, 0, 1)).occurs_on_day(today));
        assert!(timed(time(12, 0, -1), time(13, 0, 1)).occurs_on_day(today));
        assert!(!timed(time(12, 0, 1), time(13, 0, 1)).occurs_on_day(today));
    }

    #[test]
    fn occurs_on_day_treats_midnight_end_as_exclusive() {
        let today = day(0);
        let tomorrow = day(1);
        let until_midnight = timed(time(22, 0, 0), time(0, 0, 1));
        assert!(until_midnight.occurs_on_day(today));
        assert!(!until_midnight.occurs_on_day(tomorrow));

        let instant = timed(time(0, 0, 1), time(0, 0, 1));
        assert!(instant.occurs_on_day(tomorrow));
    }

    #[test]
    fn default_length_saturates_at_the_last_instant() {
        let start = NaiveDate::MAX.and_hms_opt(23, 30, 0).unwrap();
        let event = Event::with_default_length("Late", start);
        assert_eq!(event.end(), NaiveDateTime::MAX);
        assert!(event.end() >= event.start());
    }

    #[test]
    fn selection_can_be_toggled() {
        let mut event = Event::with_default_length("x", time(8, 0, 0)).selected(true);
        assert!(event.is_selected());
        event.set_selected(false);
        assert!(!event.is_selected());
    }

    #[test]
    fn with_end_keeps_other_fields() {
        let event = Event::new(
            "Lunch",
            time(12, 0, 0),
            time(13, 0, 0),
            Some("Cafe".to_string()),
            Some("America/Toronto".to_string()),
            false,
        )
        .unwrap()
        .selected(true);
        let extended = event.with_end(time(14, 0, 0));
        assert_eq!(extended.name(), "Lunch");
        assert_eq!(extended.location(), Some("Cafe"));
        assert_eq!(extended.timezone(), Some("America/Toronto"));
        assert!(extended.is_selected());
        assert_eq!(extended.end(), time(14, 0, 0));
    }
}
