//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use reflib_core::{Category, Command, LibraryView, ReferenceId};

/// Which side pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Listing,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Sidebar => Self::Listing,
            Self::Listing => Self::Sidebar,
        }
    }
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Library state as broadcast to every component after a change.
#[derive(Debug, Clone)]
pub struct LibraryState {
    pub view: LibraryView,
    /// Tags offered in the sidebar, in display order.
    pub sidebar_tags: Vec<String>,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    FocusNext,
    ToggleHelp,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    /// Leave the search bar and clear the query.
    CloseSearch,
    /// Leave the search bar, keeping the query.
    SubmitSearch,
    SearchInput(String),

    // ── Filters ───────────────────────────────────────────────────
    SelectCategory(Category),
    ToggleTag(String),
    ClearFilters,
    ToggleViewMode,

    // ── Reference commands ────────────────────────────────────────
    ToggleFavorite(ReferenceId),
    OpenDetail(ReferenceId),
    CloseDetail,
    AddTag(ReferenceId, String),
    RemoveTag(ReferenceId, String),

    // ── Description editing ───────────────────────────────────────
    BeginEditDescription,
    DescriptionInput(String),
    SaveDescription,
    CancelEditDescription,

    // ── Data Events (from the library) ────────────────────────────
    LibraryChanged(Arc<LibraryState>),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}

impl Action {
    /// The library command this action stands for, if any.
    pub fn to_command(&self) -> Option<Command> {
        let cmd = match self {
            Self::SearchInput(q) => Command::Search(q.clone()),
            Self::CloseSearch => Command::Search(String::new()),
            Self::SelectCategory(c) => Command::SelectCategory(c.clone()),
            Self::ToggleTag(t) => Command::ToggleTag(t.clone()),
            Self::ClearFilters => Command::ClearFilters,
            Self::ToggleViewMode => Command::ToggleViewMode,
            Self::ToggleFavorite(id) => Command::ToggleFavorite(id.clone()),
            Self::OpenDetail(id) => Command::OpenDetail(id.clone()),
            Self::CloseDetail => Command::CloseDetail,
            Self::AddTag(id, tag) => Command::AddTag(id.clone(), tag.clone()),
            Self::RemoveTag(id, tag) => Command::RemoveTag(id.clone(), tag.clone()),
            Self::BeginEditDescription => Command::BeginDescriptionEdit,
            Self::DescriptionInput(text) => Command::UpdateDescriptionDraft(text.clone()),
            Self::SaveDescription => Command::CommitDescriptionEdit,
            Self::CancelEditDescription => Command::CancelDescriptionEdit,
            _ => return None,
        };
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ui_only_actions_have_no_command() {
        for action in [
            Action::Quit,
            Action::Tick,
            Action::FocusNext,
            Action::OpenSearch,
            Action::SubmitSearch,
            Action::ToggleHelp,
            Action::Notify(Notification::info("x")),
        ] {
            assert_eq!(action.to_command(), None, "{action:?}");
        }
    }

    #[test]
    fn closing_search_clears_the_query() {
        assert_eq!(
            Action::CloseSearch.to_command(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn reference_actions_carry_their_id() {
        let id = ReferenceId::from("3");
        assert_eq!(
            Action::AddTag(id.clone(), "cozy".into()).to_command(),
            Some(Command::AddTag(id.clone(), "cozy".into()))
        );
        assert_eq!(
            Action::ToggleFavorite(id.clone()).to_command(),
            Some(Command::ToggleFavorite(id))
        );
    }
}
