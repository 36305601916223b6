//! Sizing of the all-day strip above the timed grid.
//!
//! All-day items are never column-packed: they list vertically, one row each.

use super::attributes::LayoutAttribute;
use super::z_order::{ElementKind, ZIndexTable};
use crate::config::GridConfig;

/// Row geometry of the all-day strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllDayLayout {
    row_height: f64,
    header_inset: f64,
}

impl AllDayLayout {
    /// Strip with explicit row height and inset.
    pub fn new(row_height: f64, header_inset: f64) -> Self {
        Self {
            row_height,
            header_inset,
        }
    }

    /// Strip sized from the grid configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.all_day_row_height(), config.all_day_header_inset())
    }

    /// `count * row_height + header_inset`.
    pub fn height(&self, count: usize) -> f64 {
        count as f64 * self.row_height + self.header_inset
    }

    /// One full-width row per all-day item, in order, at `y = index * row_height`.
    pub fn attributes(&self, count: usize) -> Vec<LayoutAttribute> {
        (0..count)
            .map(|row| LayoutAttribute {
                x_fraction: 0.0,
                width_fraction: 1.0,
                y_offset: row as f64 * self.row_height,
                height: self.row_height,
                z_index: ZIndexTable::base_for(ElementKind::Event),
                kind: ElementKind::Event,
            })
            .collect()
    }
}

/// Height of the all-day strip for `count` items under `config`.
pub fn all_day_height(count: usize, config: &GridConfig) -> f64 {
    AllDayLayout::from_config(config).height(count)
}
