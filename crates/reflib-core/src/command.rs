// ── Command API ──
//
// Every user intent reaches the library as a `Command`. The UI never
// touches the store, filter or selection directly.

use crate::model::{Category, ReferenceId, ViewMode};

/// All inbound events the library accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ── Filtering ────────────────────────────────────────────────────
    Search(String),
    SelectCategory(Category),
    ToggleTag(String),
    ClearFilters,

    // ── Item mutations ───────────────────────────────────────────────
    ToggleFavorite(ReferenceId),
    SaveDescription(ReferenceId, String),
    AddTag(ReferenceId, String),
    RemoveTag(ReferenceId, String),

    // ── Detail selection ─────────────────────────────────────────────
    OpenDetail(ReferenceId),
    CloseDetail,

    // ── Description draft (applies to the open reference) ────────────
    BeginDescriptionEdit,
    UpdateDescriptionDraft(String),
    CommitDescriptionEdit,
    CancelDescriptionEdit,

    // ── Presentation ─────────────────────────────────────────────────
    SetViewMode(ViewMode),
    ToggleViewMode,
}

/// Outcome of a successfully applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Changed,
    Unchanged,
}

impl CommandResult {
    pub fn changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

impl From<bool> for CommandResult {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}
