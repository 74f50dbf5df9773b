// ── Library facade ──
//
// Single owner of the store, filter state, selection and description
// draft. Commands go in through `apply`; `view` recomputes everything the
// UI needs from current state, so a mutation is visible to the next read.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::debug;

use crate::command::{Command, CommandResult};
use crate::editor::{self, DescriptionDraft};
use crate::error::{CoreError, InvalidInput};
use crate::filter::{self, FilterState};
use crate::model::{Category, ReferenceId, ReferenceItem, ViewMode};
use crate::selection::SelectionController;
use crate::store::{ReferenceStore, Snapshot};

/// Everything the view layer renders, computed from current state.
#[derive(Debug, Clone)]
pub struct LibraryView {
    /// Visible references, in canonical order.
    pub visible: Vec<Arc<ReferenceItem>>,
    pub total_count: usize,
    pub favorite_count: usize,
    /// The open reference, if the selection still resolves.
    pub selected: Option<Arc<ReferenceItem>>,
    pub filter: FilterState,
    pub view_mode: ViewMode,
    /// In-progress description text while editing.
    pub description_draft: Option<String>,
}

impl LibraryView {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Listing heading for the current category.
    pub fn heading(&self) -> &'static str {
        match self.filter.category {
            Category::All => "All references",
            Category::Favorites => "Favorites",
            Category::Named(_) => "References",
        }
    }

    /// Count shown next to a category in the sidebar. Named categories
    /// have no item association, so they get none.
    pub fn category_count(&self, category: &Category) -> Option<usize> {
        match category {
            Category::All => Some(self.total_count),
            Category::Favorites => Some(self.favorite_count),
            Category::Named(_) => None,
        }
    }
}

pub struct Library {
    store: ReferenceStore,
    filter: FilterState,
    selection: SelectionController,
    draft: DescriptionDraft,
    view_mode: ViewMode,
    /// Tags offered for filtering. Empty means "derive from the items".
    sidebar_tags: Vec<String>,
}

impl Library {
    pub fn new(store: ReferenceStore) -> Self {
        Self {
            store,
            filter: FilterState::default(),
            selection: SelectionController::new(),
            draft: DescriptionDraft::new(),
            view_mode: ViewMode::default(),
            sidebar_tags: Vec::new(),
        }
    }

    /// Build a library over `seed`, rejecting duplicate ids.
    pub fn from_seed(seed: impl IntoIterator<Item = ReferenceItem>) -> Result<Self, CoreError> {
        Ok(Self::new(ReferenceStore::new(seed)?))
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_sidebar_tags(mut self, tags: Vec<String>) -> Self {
        self.sidebar_tags = tags;
        self
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Tags offered in the sidebar: the configured palette, or every tag in
    /// the library in first-appearance order when none is configured.
    pub fn sidebar_tags(&self) -> Vec<String> {
        if !self.sidebar_tags.is_empty() {
            return self.sidebar_tags.clone();
        }
        let mut seen = IndexSet::new();
        for item in self.store.snapshot().iter() {
            for tag in item.tags.iter() {
                seen.insert(tag.to_owned());
            }
        }
        seen.into_iter().collect()
    }

    /// Apply one command. Errors never leave partial changes behind.
    pub fn apply(&mut self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(?command, "applying command");
        let result = self.dispatch(command);
        match &result {
            Ok(outcome) => debug!(?outcome, version = self.store.version(), "command applied"),
            Err(e) => debug!(error = %e, "command rejected"),
        }
        result
    }

    /// Recompute the outbound view from current state.
    pub fn view(&self) -> LibraryView {
        let snapshot = self.store.snapshot();
        LibraryView {
            visible: filter::visible(&snapshot, &self.filter),
            total_count: snapshot.len(),
            favorite_count: snapshot.iter().filter(|i| i.is_favorited).count(),
            selected: self.selection.current_detail(&snapshot),
            filter: self.filter.clone(),
            view_mode: self.view_mode,
            description_draft: self.draft.text().map(str::to_owned),
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn dispatch(&mut self, command: Command) -> Result<CommandResult, CoreError> {
        match command {
            Command::Search(query) => Ok(set_if_changed(&mut self.filter.search_query, query)),
            Command::SelectCategory(category) => Ok(set_if_changed(&mut self.filter.category, category)),
            Command::ToggleTag(tag) => {
                self.filter.toggle_tag(&tag);
                Ok(CommandResult::Changed)
            }
            Command::ClearFilters => {
                let was_active = self.filter.is_active();
                self.filter.clear();
                Ok(was_active.into())
            }

            Command::ToggleFavorite(id) => {
                self.store.toggle_favorite(&id)?;
                Ok(CommandResult::Changed)
            }
            Command::SaveDescription(id, text) => {
                self.store.set_description(&id, text)?;
                if self.selection.selected_id() == Some(&id) {
                    self.draft.discard();
                }
                Ok(CommandResult::Changed)
            }
            Command::AddTag(id, raw) => {
                let item = self.require(&id)?;
                let tags = editor::add_tag(&item.tags, &raw)?;
                self.store.set_tags(&id, tags)?;
                Ok(CommandResult::Changed)
            }
            Command::RemoveTag(id, tag) => {
                let item = self.require(&id)?;
                if !item.tags.contains(&tag) {
                    return Ok(CommandResult::Unchanged);
                }
                self.store.set_tags(&id, editor::remove_tag(&item.tags, &tag))?;
                Ok(CommandResult::Changed)
            }

            Command::OpenDetail(id) => {
                if self.selection.selected_id() == Some(&id) {
                    return Ok(CommandResult::Unchanged);
                }
                self.draft.discard();
                self.selection.open(id);
                Ok(CommandResult::Changed)
            }
            Command::CloseDetail => {
                let was_open = self.selection.is_open();
                self.draft.discard();
                self.selection.close();
                Ok(was_open.into())
            }

            Command::BeginDescriptionEdit => {
                let item = self.open_item()?;
                self.draft.begin(&item.description);
                Ok(CommandResult::Changed)
            }
            Command::UpdateDescriptionDraft(text) => {
                self.draft.update(text)?;
                Ok(CommandResult::Changed)
            }
            Command::CommitDescriptionEdit => {
                let item = self.open_item()?;
                let text = self.draft.commit()?;
                self.store.set_description(&item.id, text)?;
                Ok(CommandResult::Changed)
            }
            Command::CancelDescriptionEdit => Ok(self.draft.discard().into()),

            Command::SetViewMode(mode) => Ok(set_if_changed(&mut self.view_mode, mode)),
            Command::ToggleViewMode => {
                self.view_mode = self.view_mode.toggled();
                Ok(CommandResult::Changed)
            }
        }
    }

    fn require(&self, id: &ReferenceId) -> Result<Arc<ReferenceItem>, CoreError> {
        self.store
            .get(id)
            .ok_or_else(|| CoreError::NotFound { id: id.clone() })
    }

    /// The reference open in the detail view.
    fn open_item(&self) -> Result<Arc<ReferenceItem>, CoreError> {
        let id = self.selection.selected_id().ok_or(InvalidInput::NoSelection)?;
        self.require(id)
    }

    /// Current snapshot, for callers that only need the items.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }
}

/// Overwrite `slot` with `value`, reporting whether anything changed.
fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> CommandResult {
    if *slot == value {
        CommandResult::Unchanged
    } else {
        *slot = value;
        CommandResult::Changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed::{default_seed, test_item};
    use pretty_assertions::assert_eq;

    fn library() -> Library {
        Library::from_seed(default_seed()).unwrap()
    }

    fn id(raw: &str) -> ReferenceId {
        ReferenceId::from(raw)
    }

    #[test]
    fn neon_portrait_scenario() {
        let mut lib =
            Library::from_seed([test_item("1", "Neon portrait", &["portrait", "neon"], false)]).unwrap();

        lib.apply(Command::ToggleFavorite(id("1"))).unwrap();
        assert!(lib.store().get(&id("1")).unwrap().is_favorited);

        lib.apply(Command::Search("neon".into())).unwrap();
        assert_eq!(lib.view().visible_count(), 1);

        lib.apply(Command::Search("xyz".into())).unwrap();
        assert_eq!(lib.view().visible_count(), 0);
    }

    #[test]
    fn favorites_category_holds_regardless_of_other_filters() {
        let mut lib = library();
        for query in ["", "o", "neon"] {
            for tags in [&[][..], &["neon"][..], &["nature", "minimalism"][..]] {
                lib.apply(Command::ClearFilters).unwrap();
                lib.apply(Command::SelectCategory(Category::Favorites)).unwrap();
                lib.apply(Command::Search(query.into())).unwrap();
                for tag in tags {
                    lib.apply(Command::ToggleTag((*tag).into())).unwrap();
                }
                assert!(lib.view().visible.iter().all(|i| i.is_favorited));
            }
        }
    }

    #[test]
    fn view_counts_and_heading_follow_state() {
        let mut lib = library();
        let view = lib.view();
        assert_eq!(view.total_count, 6);
        assert_eq!(view.favorite_count, 3);
        assert_eq!(view.visible_count(), 6);
        assert_eq!(view.heading(), "All references");
        assert_eq!(view.category_count(&Category::named("locations")), None);

        lib.apply(Command::SelectCategory(Category::Favorites)).unwrap();
        let view = lib.view();
        assert_eq!(view.heading(), "Favorites");
        assert_eq!(view.visible_count(), 3);

        lib.apply(Command::SelectCategory(Category::named("locations"))).unwrap();
        assert_eq!(lib.view().heading(), "References");
        assert_eq!(lib.view().visible_count(), 6);
    }

    #[test]
    fn repeated_search_is_unchanged() {
        let mut lib = library();
        assert_eq!(lib.apply(Command::Search("a".into())).unwrap(), CommandResult::Changed);
        assert_eq!(lib.apply(Command::Search("a".into())).unwrap(), CommandResult::Unchanged);
    }

    #[test]
    fn clear_filters_restores_full_listing() {
        let mut lib = library();
        lib.apply(Command::Search("night".into())).unwrap();
        lib.apply(Command::ToggleTag("neon".into())).unwrap();
        assert_eq!(lib.view().visible_count(), 0);

        assert!(lib.apply(Command::ClearFilters).unwrap().changed());
        assert_eq!(lib.view().visible_count(), 6);
        assert!(!lib.apply(Command::ClearFilters).unwrap().changed());
    }

    #[test]
    fn add_tag_appends_and_duplicate_is_rejected_without_change() {
        let mut lib = library();
        lib.apply(Command::AddTag(id("2"), "  cozy ".into())).unwrap();
        let tags: Vec<String> = lib.store().get(&id("2")).unwrap().tags.iter().map(str::to_owned).collect();
        assert_eq!(tags, vec!["minimalism", "interior", "white", "cozy"]);

        let version = lib.store().version();
        let err = lib.apply(Command::AddTag(id("2"), "cozy".into())).unwrap_err();
        assert!(err.is_rejection());
        let err = lib.apply(Command::AddTag(id("2"), "   ".into())).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(InvalidInput::EmptyTag)));
        assert_eq!(lib.store().version(), version);
    }

    #[test]
    fn remove_absent_tag_is_unchanged() {
        let mut lib = library();
        let before = lib.store().get(&id("1")).unwrap();
        let outcome = lib.apply(Command::RemoveTag(id("1"), "not-there".into())).unwrap();
        assert_eq!(outcome, CommandResult::Unchanged);
        assert_eq!(lib.store().get(&id("1")).unwrap(), before);

        lib.apply(Command::RemoveTag(id("1"), "neon".into())).unwrap();
        assert!(!lib.store().get(&id("1")).unwrap().tags.contains("neon"));
    }

    #[test]
    fn mutations_on_unknown_ids_are_not_found() {
        let mut lib = library();
        for cmd in [
            Command::ToggleFavorite(id("99")),
            Command::SaveDescription(id("99"), "x".into()),
            Command::AddTag(id("99"), "x".into()),
            Command::RemoveTag(id("99"), "x".into()),
        ] {
            let err = lib.apply(cmd).unwrap_err();
            assert!(matches!(err, CoreError::NotFound { .. }));
        }
        assert_eq!(lib.store().version(), 0);
    }

    #[test]
    fn detail_resolves_live_item_after_reopen() {
        let mut lib = library();
        lib.apply(Command::OpenDetail(id("4"))).unwrap();
        assert_eq!(lib.view().selected.unwrap().id, id("4"));

        lib.apply(Command::CloseDetail).unwrap();
        assert!(lib.view().selected.is_none());
        lib.apply(Command::SaveDescription(id("4"), "edited while closed".into()))
            .unwrap();

        lib.apply(Command::OpenDetail(id("4"))).unwrap();
        assert_eq!(lib.view().selected.unwrap().description, "edited while closed");
    }

    #[test]
    fn open_unknown_id_renders_closed() {
        let mut lib = library();
        lib.apply(Command::OpenDetail(id("missing"))).unwrap();
        assert!(lib.selection().is_open());
        assert!(lib.view().selected.is_none());
    }

    #[test]
    fn description_draft_commit_and_cancel() {
        let mut lib = library();
        assert!(matches!(
            lib.apply(Command::BeginDescriptionEdit).unwrap_err(),
            CoreError::InvalidInput(InvalidInput::NoSelection)
        ));

        lib.apply(Command::OpenDetail(id("5"))).unwrap();
        let original = lib.view().selected.unwrap().description.clone();

        lib.apply(Command::BeginDescriptionEdit).unwrap();
        assert_eq!(lib.view().description_draft.as_deref(), Some(original.as_str()));
        lib.apply(Command::UpdateDescriptionDraft("discard me".into())).unwrap();
        lib.apply(Command::CancelDescriptionEdit).unwrap();
        assert_eq!(lib.view().selected.unwrap().description, original);
        assert_eq!(lib.view().description_draft, None);

        lib.apply(Command::BeginDescriptionEdit).unwrap();
        lib.apply(Command::UpdateDescriptionDraft("keep me".into())).unwrap();
        lib.apply(Command::CommitDescriptionEdit).unwrap();
        assert_eq!(lib.view().selected.unwrap().description, "keep me");
        assert!(lib.apply(Command::CommitDescriptionEdit).is_err());
    }

    #[test]
    fn switching_or_closing_detail_discards_draft() {
        let mut lib = library();
        lib.apply(Command::OpenDetail(id("1"))).unwrap();
        lib.apply(Command::BeginDescriptionEdit).unwrap();
        lib.apply(Command::OpenDetail(id("2"))).unwrap();
        assert_eq!(lib.view().description_draft, None);

        lib.apply(Command::BeginDescriptionEdit).unwrap();
        lib.apply(Command::CloseDetail).unwrap();
        assert_eq!(lib.view().description_draft, None);
        assert_eq!(lib.store().version(), 0);
    }

    #[test]
    fn view_mode_toggles() {
        let mut lib = library().with_view_mode(ViewMode::List);
        assert_eq!(lib.view().view_mode, ViewMode::List);
        lib.apply(Command::ToggleViewMode).unwrap();
        assert_eq!(lib.view_mode(), ViewMode::Grid);
        assert!(!lib.apply(Command::SetViewMode(ViewMode::Grid)).unwrap().changed());
    }

    #[test]
    fn sidebar_tags_derive_from_items_when_unconfigured() {
        let lib = Library::from_seed([
            test_item("1", "a", &["x", "y"], false),
            test_item("2", "b", &["y", "z"], false),
        ])
        .unwrap();
        assert_eq!(lib.sidebar_tags(), vec!["x", "y", "z"]);

        let lib = lib.with_sidebar_tags(vec!["neon".into()]);
        assert_eq!(lib.sidebar_tags(), vec!["neon"]);
    }
}
