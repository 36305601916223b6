//! Day-view calendar layout (daygrid)
//!
//! Places a day's potentially overlapping events on a vertical time grid so
//! none visually collide: optional merging of overlapping events, overlap
//! clustering, column packing with gap widening, stacking order, and
//! time ↔ pixel mapping.
//!
//! The [`layout`] core is pure; [`parser`], [`source`], [`config`],
//! [`logging`] and [`output`] form the shell used by the `daygrid` binary.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod source;

pub use config::{EventLength, GridConfig};
pub use layout::{
    merge_events, ArrangedDay, DayGrid, DayLayoutDataSource, DayViewLayout, ItemIndex,
    LayoutAttribute, LayoutSnapshot, TimeCoordinateMapper,
};
pub use model::Event;
