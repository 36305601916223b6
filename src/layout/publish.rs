//! Last-writer-wins publication of layout passes computed off-thread.
//!
//! A pass takes a [`PassTicket`] before it starts. When it finishes, its
//! snapshot is installed only if no pass with a newer ticket has already
//! been published. Snapshots are swapped whole, never merged.

use super::engine::LayoutSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Monotonic identity of a layout pass. Later passes compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassTicket(u64);

impl PassTicket {
    /// Raw ticket number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Published {
    ticket: Option<PassTicket>,
    snapshot: Option<Arc<LayoutSnapshot>>,
}

/// Shared slot holding the newest published snapshot.
#[derive(Debug, Default)]
pub struct LayoutPublisher {
    next_ticket: AtomicU64,
    published: RwLock<Published>,
}

impl LayoutPublisher {
    /// Publisher with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a pass that is about to start.
    pub fn begin_pass(&self) -> PassTicket {
        PassTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Install `snapshot` unless a newer pass already published.
    ///
    /// Returns `false` when the snapshot was discarded as stale.
    pub fn publish(&self, ticket: PassTicket, snapshot: LayoutSnapshot) -> bool {
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if published.ticket.is_some_and(|current| current >= ticket) {
            debug!(
                ticket = ticket.get(),
                current = published.ticket.map(|t| t.get()),
                "Discarding stale layout pass"
            );
            return false;
        }

        published.ticket = Some(ticket);
        published.snapshot = Some(Arc::new(snapshot));
        true
    }

    /// Newest published snapshot.
    pub fn current(&self) -> Option<Arc<LayoutSnapshot>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Ticket of the newest published snapshot.
    pub fn current_ticket(&self) -> Option<PassTicket> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ticket
    }
}
