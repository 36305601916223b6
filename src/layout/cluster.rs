//! Partitioning of adjustable items into overlap clusters.
//!
//! A cluster is a connected component of the strict-overlap graph: two items
//! share a cluster when a chain of pairwise overlaps links them. Touching
//! intervals (`a.end == b.start`) do not link.

use super::types::{ItemIndex, TimeInterval};
use std::cmp::Reverse;
use std::collections::HashMap;

/// An adjustable item as seen by the clusterer and the column packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterItem {
    /// Identity of the item in its data source.
    pub index: ItemIndex,
    /// Time span of the item.
    pub interval: TimeInterval,
}

impl ClusterItem {
    /// Item `index` occupying `interval`.
    pub fn new(index: ItemIndex, interval: TimeInterval) -> Self {
        Self { index, interval }
    }
}

/// A maximal set of items connected by pairwise time overlap.
///
/// # Invariants
/// - never empty
/// - members are ordered by start, then longer duration first, then index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapCluster {
    members: Vec<ClusterItem>,
}

impl OverlapCluster {
    /// Members in packing order.
    pub fn members(&self) -> &[ClusterItem] {
        &self.members
    }

    /// Number of items in the cluster.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for clusters produced by [`cluster_overlapping`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the item with `index` belongs to this cluster.
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.members.iter().any(|m| m.index == index)
    }
}

/// Ordering used by both clustering and packing: start ascending, longer
/// items first on ties, then input order.
pub(crate) fn packing_order(items: &[ClusterItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| {
        let item = &items[i];
        (
            item.interval.start,
            Reverse(item.interval.duration()),
            item.index,
        )
    });
    order
}

/// Partition `items` into overlap clusters.
///
/// Sweeps items in start order while keeping an active set of items that
/// are still running, and unions each new item with every active item it
/// strictly overlaps. Clusters are returned ordered by their first member.
pub fn cluster_overlapping(items: &[ClusterItem]) -> Vec<OverlapCluster> {
    if items.is_empty() {
        return Vec::new();
    }

    let order = packing_order(items);

    // Union-Find over positions in `items`
    let mut parent: Vec<usize> = (0..items.len()).collect();
    let mut rank: Vec<usize> = vec![0; items.len()];

    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
        let root_x = find(parent, x);
        let root_y = find(parent, y);

        if root_x != root_y {
            if rank[root_x] < rank[root_y] {
                parent[root_x] = root_y;
            } else if rank[root_x] > rank[root_y] {
                parent[root_y] = root_x;
            } else {
                parent[root_y] = root_x;
                rank[root_x] += 1;
            }
        }
    }

    let mut active: Vec<usize> = Vec::new();
    for &current in &order {
        let interval = items[current].interval;
        // Anything that ended by now cannot overlap this or any later item.
        active.retain(|&a| items[a].interval.end > interval.start);

        for &a in &active {
            if items[a].interval.overlaps(&interval) {
                union(&mut parent, &mut rank, a, current);
            }
        }
        active.push(current);
    }

    let mut root_to_cluster: HashMap<usize, usize> = HashMap::new();
    let mut clusters: Vec<OverlapCluster> = Vec::new();

    for &position in &order {
        let root = find(&mut parent, position);
        let slot = *root_to_cluster.entry(root).or_insert_with(|| {
            clusters.push(OverlapCluster {
                members: Vec::new(),
            });
            clusters.len() - 1
        });
        clusters[slot].members.push(items[position]);
    }

    clusters
}
