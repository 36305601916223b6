//! Day-grid layout core.
//!
//! Pure and synchronous: a pass maps item intervals, adjustability flags and
//! grid geometry to per-item [`LayoutAttribute`]s without side effects.
//!
//! Stages, leaves first: [`time_mapper`] converts between time and pixels,
//! [`merge`] optionally collapses overlapping events, [`cluster`] groups
//! mutually overlapping items, [`columns`] packs each group, and
//! [`attributes`] produces the final geometry. [`engine`] drives a pass and
//! [`pipeline`] runs the whole flow for a list of events.

pub mod all_day;
pub mod attributes;
pub mod cluster;
pub mod columns;
pub mod creation;
pub mod data_source;
pub mod decorations;
pub mod engine;
pub mod merge;
pub mod pipeline;
pub mod publish;
pub mod time_mapper;
pub mod types;
pub mod z_order;

pub use all_day::{all_day_height, AllDayLayout};
pub use attributes::{LayoutAttribute, LayoutAttributesBuilder};
pub use cluster::{cluster_overlapping, ClusterItem, OverlapCluster};
pub use columns::{pack_cluster, pack_items, ClusterPacking, ColumnPlacement};
pub use creation::{event_for_tap, EventCreator};
pub use data_source::{
    pull_items, DayLayoutDataSource, EventSliceSource, SourceItem, MIN_LAYOUT_MINUTES,
};
pub use decorations::{gridlines, hour_labels, Gridline, GridlineKind, HourLabel};
pub use engine::{compute_layout, DayViewLayout, HitTestResult, LayoutSnapshot};
pub use merge::merge_events;
pub use pipeline::{ArrangedDay, DayGrid};
pub use publish::{LayoutPublisher, PassTicket};
pub use time_mapper::TimeCoordinateMapper;
pub use types::{InvalidMinuteOfDay, ItemIndex, MinuteOfDay, TimeInterval, MINUTES_PER_DAY};
pub use z_order::{ElementKind, ZIndexTable};
