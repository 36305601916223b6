//! Static draw-order priorities for the kinds of elements on a day grid.

use serde::Serialize;

/// Kinds of elements a rendering surface places on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Hour and half-hour separator lines.
    Gridline,
    /// Hour labels in the sidebar.
    TimeLabel,
    /// Events confined to cluster columns.
    Event,
    /// Full-width events stacked above everything they overlap.
    StackedEvent,
}

/// Fixed z-index table. Events start at [`ZIndexTable::EVENT_BASE`] and
/// climb by draw rank; stacked events are derived from whatever they cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZIndexTable;

impl ZIndexTable {
    /// Lowest z-index given to an event.
    pub const EVENT_BASE: u32 = 2;

    /// Base z-index for an element kind.
    pub fn base_for(kind: ElementKind) -> u32 {
        match kind {
            ElementKind::Gridline => 0,
            ElementKind::TimeLabel => 1,
            ElementKind::Event => Self::EVENT_BASE,
            ElementKind::StackedEvent => Self::EVENT_BASE + 1,
        }
    }

    /// z-index of an adjustable event with the given in-cluster rank.
    pub fn event(rank: usize) -> u32 {
        Self::EVENT_BASE.saturating_add(u32::try_from(rank).unwrap_or(u32::MAX))
    }

    /// z-index of a stacked event drawn over items up to `highest_covered`.
    pub fn stacked_over(highest_covered: Option<u32>) -> u32 {
        highest_covered
            .unwrap_or(Self::EVENT_BASE)
            .max(Self::EVENT_BASE)
            .saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorations_sit_below_events() {
        assert!(ZIndexTable::base_for(ElementKind::Gridline) < ZIndexTable::base_for(ElementKind::TimeLabel));
        assert!(ZIndexTable::base_for(ElementKind::TimeLabel) < ZIndexTable::base_for(ElementKind::Event));
        assert!(ZIndexTable::base_for(ElementKind::Event) < ZIndexTable::base_for(ElementKind::StackedEvent));
    }

    #[test]
    fn event_rank_offsets_from_base() {
        assert_eq!(ZIndexTable::event(0), ZIndexTable::EVENT_BASE);
        assert_eq!(ZIndexTable::event(4), ZIndexTable::EVENT_BASE + 4);
    }

    #[test]
    fn stacked_event_is_above_what_it_covers() {
        assert_eq!(
            ZIndexTable::stacked_over(None),
            ZIndexTable::base_for(ElementKind::StackedEvent)
        );
        assert_eq!(ZIndexTable::stacked_over(Some(9)), 10);
        assert_eq!(ZIndexTable::stacked_over(Some(0)), ZIndexTable::EVENT_BASE + 1);
    }
}
