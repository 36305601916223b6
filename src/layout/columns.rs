//! Column packing within a single overlap cluster.
//!
//! Items are placed first-fit into columns (a column is free once its last
//! item has ended), then widened to the right across columns that hold
//! nothing overlapping them, and finally ranked for draw order.

use super::cluster::{packing_order, ClusterItem, OverlapCluster};
use super::types::{ItemIndex, TimeInterval};
use chrono::NaiveDateTime;

/// Column geometry for one item of a cluster.
///
/// # Invariants
/// - `column + span <= total_columns`
/// - `span >= 1`
/// - items sharing a `column` never overlap in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlacement {
    /// Identity of the placed item.
    pub index: ItemIndex,
    /// Time span of the placed item.
    pub interval: TimeInterval,
    /// 0-based column.
    pub column: usize,
    /// Number of columns the item covers, starting at `column`.
    pub span: usize,
    /// Number of columns in the item's cluster.
    pub total_columns: usize,
    /// Draw order inside the cluster, 0-based. Higher draws on top.
    pub z_rank: usize,
}

impl ColumnPlacement {
    /// Left edge as a fraction of the grid width, in `[0, 1)`.
    pub fn x_fraction(&self) -> f64 {
        self.column as f64 / self.total_columns as f64
    }

    /// Width as a fraction of the grid width, in `(0, 1]`.
    ///
    /// Clamped so that `x_fraction + width_fraction <= 1` holds after
    /// floating point rounding.
    pub fn width_fraction(&self) -> f64 {
        let width = self.span as f64 / self.total_columns as f64;
        width.min(1.0 - self.x_fraction())
    }
}

/// Packing result for one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPacking {
    total_columns: usize,
    placements: Vec<ColumnPlacement>,
}

impl ClusterPacking {
    /// Number of columns ever opened in the cluster.
    pub fn total_columns(&self) -> usize {
        self.total_columns
    }

    /// Placements in packing order (start, longer first, index).
    pub fn placements(&self) -> &[ColumnPlacement] {
        &self.placements
    }

    /// Placement for a specific item, if it belongs to this cluster.
    pub fn placement_for(&self, index: ItemIndex) -> Option<&ColumnPlacement> {
        self.placements.iter().find(|p| p.index == index)
    }
}

/// Assign columns, spans and draw ranks to the members of `cluster`.
pub fn pack_cluster(cluster: &OverlapCluster) -> ClusterPacking {
    pack_items(cluster.members())
}

/// Pack an arbitrary set of items as if they formed one cluster.
pub fn pack_items(items: &[ClusterItem]) -> ClusterPacking {
    let order = packing_order(items);

    // First fit: a column accepts an item once its running end <= item start.
    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut assigned: Vec<(usize, usize)> = Vec::with_capacity(items.len());

    for &position in &order {
        let interval = items[position].interval;
        let free = column_ends.iter().position(|&end| end <= interval.start);
        let column = match free {
            Some(column) => {
                column_ends[column] = column_ends[column].max(interval.end);
                column
            }
            None => {
                column_ends.push(interval.end.max(interval.start));
                columns.push(Vec::new());
                column_ends.len() - 1
            }
        };
        columns[column].push(position);
        assigned.push((position, column));
    }

    let total_columns = columns.len();

    let mut placements: Vec<ColumnPlacement> = assigned
        .iter()
        .map(|&(position, column)| {
            let item = items[position];
            ColumnPlacement {
                index: item.index,
                interval: item.interval,
                column,
                span: widened_span(items, &columns, position, column),
                total_columns,
                z_rank: 0,
            }
        })
        .collect();

    // Later starts draw above earlier ones; rightmost wins ties.
    let mut by_draw_order: Vec<usize> = (0..placements.len()).collect();
    by_draw_order.sort_by_key(|&i| (placements[i].interval.start, placements[i].column));
    for (rank, &i) in by_draw_order.iter().enumerate() {
        placements[i].z_rank = rank;
    }

    ClusterPacking {
        total_columns,
        placements,
    }
}

/// Number of columns an item can cover: its own plus every consecutive
/// column to the right holding nothing that overlaps it.
fn widened_span(
    items: &[ClusterItem],
    columns: &[Vec<usize>],
    position: usize,
    column: usize,
) -> usize {
    let interval = items[position].interval;
    let free_to_the_right = columns[column + 1..]
        .iter()
        .take_while(|members| {
            !members
                .iter()
                .any(|&other| items[other].interval.overlaps(&interval))
        })
        .count();
    free_to_the_right + 1
}
