// ── Selection controller ──
//
// Tracks which reference is open in the detail view. Only the id is kept;
// the item is resolved against the live snapshot on every read.

use std::sync::Arc;

use tracing::debug;

use crate::model::{ReferenceId, ReferenceItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<ReferenceId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: ReferenceId) {
        debug!(%id, "detail opened");
        self.selected = Some(id);
    }

    pub fn close(&mut self) {
        if let Some(id) = self.selected.take() {
            debug!(%id, "detail closed");
        }
    }

    pub fn selected_id(&self) -> Option<&ReferenceId> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Resolve the selection against `items`. No selection and a selection
    /// that no longer resolves both yield `None`.
    pub fn current_detail(&self, items: &[Arc<ReferenceItem>]) -> Option<Arc<ReferenceItem>> {
        let id = self.selected.as_ref()?;
        items.iter().find(|item| &item.id == id).cloned()
    }
}
