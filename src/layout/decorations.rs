//! Gridlines and hour labels drawn behind the events.

use super::time_mapper::TimeCoordinateMapper;
use super::z_order::{ElementKind, ZIndexTable};
use chrono::NaiveTime;
use serde::Serialize;

const HOURS_PER_DAY: u32 = 24;
const HOUR_LABEL_FORMAT: &str = "%-I %p";

/// Weight of a gridline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridlineKind {
    /// Dark line on the hour.
    Hour,
    /// Light line on the half hour.
    HalfHour,
}

/// A horizontal separator line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gridline {
    /// Hour or half-hour line.
    pub kind: GridlineKind,
    /// Minutes since midnight, `0..=1440`.
    pub minute: u32,
    /// Vertical position in pixels.
    pub y_offset: f64,
    /// Draw order, below every label and event.
    pub z_index: u32,
}

/// Text shown beside an hour line in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourLabel {
    /// Hour of day, `0..24`.
    pub hour: u32,
    /// Label text such as "9 AM".
    pub text: String,
    /// Vertical position of the hour line in pixels.
    pub y_offset: f64,
    /// Draw order, above gridlines and below events.
    pub z_index: u32,
}

/// Every gridline from 00:00 to the closing 24:00 line, top to bottom.
///
/// Hour lines sit at `0..=24` hours, half-hour lines between them.
pub fn gridlines(mapper: &TimeCoordinateMapper) -> Vec<Gridline> {
    let z_index = ZIndexTable::base_for(ElementKind::Gridline);
    let line = |kind, minute: u32| Gridline {
        kind,
        minute,
        y_offset: mapper.offset(f64::from(minute)),
        z_index,
    };

    (0..=HOURS_PER_DAY)
        .flat_map(|hour| {
            let on_the_hour = std::iter::once(line(GridlineKind::Hour, hour * 60));
            let half = (hour < HOURS_PER_DAY).then(|| line(GridlineKind::HalfHour, hour * 60 + 30));
            on_the_hour.chain(half)
        })
        .collect()
}

/// Labels "12 AM" through "11 PM", one per hour line.
pub fn hour_labels(mapper: &TimeCoordinateMapper) -> Vec<HourLabel> {
    let z_index = ZIndexTable::base_for(ElementKind::TimeLabel);
    (0..HOURS_PER_DAY)
        .filter_map(|hour| {
            let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            Some(HourLabel {
                hour,
                text: time.format(HOUR_LABEL_FORMAT).to_string(),
                y_offset: mapper.offset(f64::from(hour * 60)),
                z_index,
            })
        })
        .collect()
}
