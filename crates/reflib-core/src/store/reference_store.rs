// ── Reference store ──
//
// Canonical ordered sequence of reference items with id lookup and
// push-based change notification via `watch` channels. Single owner,
// mutated through `&mut self`.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{ReferenceId, ReferenceItem, TagSet};

/// Shared, immutable view of every item in canonical order.
pub type Snapshot = Arc<Vec<Arc<ReferenceItem>>>;

/// Owns the reference items. Every successful mutation replaces the
/// affected record in place, rebuilds the snapshot and bumps the version.
pub struct ReferenceStore {
    /// Primary storage: id -> item, in seed order.
    items: IndexMap<ReferenceId, Arc<ReferenceItem>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for cheap reads and subscription.
    snapshot: watch::Sender<Snapshot>,
}

impl ReferenceStore {
    /// Build a store from seed items, rejecting repeated ids.
    pub fn new(seed: impl IntoIterator<Item = ReferenceItem>) -> Result<Self, CoreError> {
        let mut items = IndexMap::new();
        for item in seed {
            match items.entry(item.id.clone()) {
                Entry::Occupied(e) => {
                    return Err(CoreError::DuplicateId { id: e.key().clone() });
                }
                Entry::Vacant(e) => {
                    e.insert(Arc::new(item));
                }
            }
        }

        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let store = Self {
            items,
            version,
            snapshot,
        };
        store.rebuild_snapshot();
        Ok(store)
    }

    /// Flip `is_favorited` on the matching item.
    pub fn toggle_favorite(&mut self, id: &ReferenceId) -> Result<Arc<ReferenceItem>, CoreError> {
        self.modify(id, |item| item.is_favorited = !item.is_favorited)
    }

    /// Replace the full tag sequence of the matching item.
    pub fn set_tags(&mut self, id: &ReferenceId, tags: TagSet) -> Result<Arc<ReferenceItem>, CoreError> {
        self.modify(id, move |item| item.tags = tags)
    }

    /// Replace the description of the matching item verbatim.
    pub fn set_description(
        &mut self,
        id: &ReferenceId,
        text: impl Into<String>,
    ) -> Result<Arc<ReferenceItem>, CoreError> {
        let text = text.into();
        self.modify(id, move |item| item.description = text)
    }

    /// Look up an item by id.
    pub fn get(&self, id: &ReferenceId) -> Option<Arc<ReferenceItem>> {
        self.items.get(id).map(Arc::clone)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Number of successful mutations since construction.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Copy-on-write update of one item. Nothing changes when `id` is absent.
    fn modify<F>(&mut self, id: &ReferenceId, f: F) -> Result<Arc<ReferenceItem>, CoreError>
    where
        F: FnOnce(&mut ReferenceItem),
    {
        let Some(slot) = self.items.get_mut(id) else {
            debug!(%id, "mutation on unknown reference");
            return Err(CoreError::NotFound { id: id.clone() });
        };

        let mut updated = (**slot).clone();
        f(&mut updated);
        let updated = Arc::new(updated);
        *slot = Arc::clone(&updated);

        self.rebuild_snapshot();
        self.bump_version();
        Ok(updated)
    }

    /// Collect all values into a snapshot vec and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let values: Vec<Arc<ReferenceItem>> = self.items.values().map(Arc::clone).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
