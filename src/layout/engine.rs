//! Layout pass driver.
//!
//! [`DayViewLayout`] pulls items from a [`DayLayoutDataSource`], runs
//! clustering, column packing and attribute building, and keeps the last
//! result keyed by an exact fingerprint of its inputs. A pass with unchanged
//! inputs returns the stored snapshot, which is identical to what a fresh
//! pass would compute.

use super::attributes::{LayoutAttribute, LayoutAttributesBuilder};
use super::cluster::{cluster_overlapping, ClusterItem, OverlapCluster};
use super::columns::{pack_cluster, ClusterPacking};
use super::data_source::{pull_items, DayLayoutDataSource, SourceItem};
use super::time_mapper::TimeCoordinateMapper;
use super::types::ItemIndex;
use crate::config::GridConfig;
use chrono::NaiveDate;
use tracing::debug;

/// Outcome of a point query against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestResult {
    /// No item contains the point.
    Miss,
    /// Top-most item containing the point.
    Hit {
        /// Item that was hit.
        item: ItemIndex,
        /// Its z-index.
        z_index: u32,
    },
}

/// Immutable result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    day: NaiveDate,
    attributes: Vec<LayoutAttribute>,
    clusters: Vec<OverlapCluster>,
    packings: Vec<ClusterPacking>,
}

impl LayoutSnapshot {
    /// Day the snapshot was laid out for.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Geometry of `item`, or `None` if the index is out of range.
    pub fn attributes_for(&self, item: ItemIndex) -> Option<&LayoutAttribute> {
        self.attributes.get(item.get())
    }

    /// All attributes, indexed by item.
    pub fn attributes(&self) -> &[LayoutAttribute] {
        &self.attributes
    }

    /// Clusters of adjustable items, ordered by earliest member.
    pub fn clusters(&self) -> &[OverlapCluster] {
        &self.clusters
    }

    /// Column packing of each cluster, parallel to [`Self::clusters`].
    pub fn packings(&self) -> &[ClusterPacking] {
        &self.packings
    }

    /// Number of laid-out items.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// `true` when the pass had no items.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Items whose vertical extent intersects `[min_y, max_y)`, in draw
    /// order: ascending z, then index.
    pub fn items_in_range(&self, min_y: f64, max_y: f64) -> Vec<ItemIndex> {
        let mut visible: Vec<(u32, usize)> = self
            .attributes
            .iter()
            .enumerate()
            .filter(|(_, attr)| attr.y_offset < max_y && attr.max_y() > min_y)
            .map(|(index, attr)| (attr.z_index, index))
            .collect();
        visible.sort_unstable();
        visible
            .into_iter()
            .map(|(_, index)| ItemIndex::new(index))
            .collect()
    }

    /// Top-most item at a point. Among equal z-indices the later item wins,
    /// since it is drawn last.
    pub fn hit_test(&self, x_fraction: f64, y: f64) -> HitTestResult {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, attr)| attr.contains(x_fraction, y))
            .max_by_key(|(index, attr)| (attr.z_index, *index))
            .map_or(HitTestResult::Miss, |(index, attr)| HitTestResult::Hit {
                item: ItemIndex::new(index),
                z_index: attr.z_index,
            })
    }
}

/// Everything a pass depends on, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutFingerprint {
    day: NaiveDate,
    layout_key: [u64; 2],
    items: Vec<SourceItem>,
}

#[derive(Debug, Clone)]
struct Memo {
    fingerprint: LayoutFingerprint,
    snapshot: LayoutSnapshot,
}

/// Run one layout pass over already-pulled items.
///
/// Attributes come back in the order of `items`, and
/// [`LayoutSnapshot::attributes_for`] looks them up by position. Items from
/// [`pull_items`](super::data_source::pull_items) satisfy
/// `items[i].index == ItemIndex::new(i)`, so both agree.
pub fn compute_layout(
    items: &[SourceItem],
    day: NaiveDate,
    mapper: TimeCoordinateMapper,
) -> LayoutSnapshot {
    let cluster_items: Vec<ClusterItem> = items
        .iter()
        .filter(|item| item.adjustable)
        .map(|item| ClusterItem::new(item.index, item.interval_within(day)))
        .collect();

    let clusters = cluster_overlapping(&cluster_items);
    let packings: Vec<ClusterPacking> = clusters.iter().map(pack_cluster).collect();
    let attributes = LayoutAttributesBuilder::new(mapper, day).build(items, &packings);

    debug!(
        %day,
        items = items.len(),
        adjustable = cluster_items.len(),
        clusters = clusters.len(),
        max_columns = packings.iter().map(ClusterPacking::total_columns).max().unwrap_or(0),
        "Computed layout pass"
    );

    LayoutSnapshot {
        day,
        attributes,
        clusters,
        packings,
    }
}

/// Layout engine for a single day view.
#[derive(Debug, Clone)]
pub struct DayViewLayout {
    mapper: TimeCoordinateMapper,
    layout_key: [u64; 2],
    memo: Option<Memo>,
}

impl DayViewLayout {
    /// Engine for the given grid geometry, with nothing memoized yet.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            mapper: TimeCoordinateMapper::from_config(config),
            layout_key: config.layout_key(),
            memo: None,
        }
    }

    /// Mapper used for vertical geometry.
    pub fn mapper(&self) -> &TimeCoordinateMapper {
        &self.mapper
    }

    /// Lay out every item of `source` on `day`.
    ///
    /// The source is queried once per item and not retained.
    pub fn prepare<S: DayLayoutDataSource + ?Sized>(
        &mut self,
        source: &S,
        day: NaiveDate,
    ) -> &LayoutSnapshot {
        let fingerprint = LayoutFingerprint {
            day,
            layout_key: self.layout_key,
            items: pull_items(source),
        };

        let memo = match self.memo.take() {
            Some(memo) if memo.fingerprint == fingerprint => {
                debug!(%day, items = fingerprint.items.len(), "Reusing layout pass");
                memo
            }
            _ => Memo {
                snapshot: compute_layout(&fingerprint.items, day, self.mapper),
                fingerprint,
            },
        };

        &self.memo.insert(memo).snapshot
    }

    /// Snapshot of the last pass, if any.
    pub fn last_snapshot(&self) -> Option<&LayoutSnapshot> {
        self.memo.as_ref().map(|memo| &memo.snapshot)
    }

    /// Drop the stored pass so the next `prepare` recomputes.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }
}
