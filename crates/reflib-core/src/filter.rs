// ── Filter engine ──
//
// Pure predicates over a snapshot. Filtering only narrows visibility: the
// output is always an order-preserving subsequence of the input.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::model::{Category, ReferenceItem};

/// Search, category and tag selection that decide the visible set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub category: Category,
    pub selected_tags: IndexSet<String>,
}

impl FilterState {
    /// Add `tag` to the selection, or remove it if it was already selected.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.shift_remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_owned());
            true
        }
    }

    /// Whether any of the three filters narrows the listing.
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty()
            || self.category != Category::All
            || !self.selected_tags.is_empty()
    }

    /// Reset to "everything visible".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Conjunction of the search, category and tag predicates.
    pub fn matches(&self, item: &ReferenceItem) -> bool {
        matches_search(item, &self.search_query)
            && matches_category(item, &self.category)
            && matches_tags(item, &self.selected_tags)
    }
}

/// Empty query, or a case-insensitive substring of the title or of any tag.
pub fn matches_search(item: &ReferenceItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    item.title.to_lowercase().contains(&q) || item.tags.iter().any(|t| t.to_lowercase().contains(&q))
}

/// `All` and named categories pass everything; `Favorites` passes favorites.
pub fn matches_category(item: &ReferenceItem, category: &Category) -> bool {
    match category {
        Category::All | Category::Named(_) => true,
        Category::Favorites => item.is_favorited,
    }
}

/// No selected tags, or at least one selected tag present on the item.
pub fn matches_tags(item: &ReferenceItem, selected: &IndexSet<String>) -> bool {
    selected.is_empty() || item.tags.intersects(selected)
}

/// The visible subset of `items`, in input order.
pub fn visible(items: &[Arc<ReferenceItem>], filter: &FilterState) -> Vec<Arc<ReferenceItem>> {
    items.iter().filter(|item| filter.matches(item)).cloned().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed::{default_seed, test_item};
    use pretty_assertions::assert_eq;

    fn items() -> Vec<Arc<ReferenceItem>> {
        default_seed().into_iter().map(Arc::new).collect()
    }

    fn ids(items: &[Arc<ReferenceItem>]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn filter(query: &str, category: Category, tags: &[&str]) -> FilterState {
        FilterState {
            search_query: query.into(),
            category,
            selected_tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    #[test]
    fn default_filter_shows_everything_in_order() {
        let items = items();
        let shown = visible(&items, &FilterState::default());
        assert_eq!(ids(&shown), ids(&items));
    }

    #[test]
    fn search_matches_title_or_tag_case_insensitively() {
        let items = vec![
            Arc::new(test_item("1", "Neon portrait", &["portrait", "neon"], false)),
            Arc::new(test_item("2", "Quiet room", &["Interior"], false)),
            Arc::new(test_item("3", "Harbor", &["boats"], false)),
        ];
        assert_eq!(ids(&visible(&items, &filter("NEON", Category::All, &[]))), vec!["1"]);
        assert_eq!(ids(&visible(&items, &filter("interi", Category::All, &[]))), vec!["2"]);
        assert!(visible(&items, &filter("xyz", Category::All, &[])).is_empty());
    }

    #[test]
    fn every_search_hit_contains_the_query() {
        let items = items();
        for q in ["", "a", "NE", "port", "colo", "night", "zzz"] {
            let lower = q.to_lowercase();
            for item in visible(&items, &filter(q, Category::All, &[])) {
                assert!(
                    item.title.to_lowercase().contains(&lower)
                        || item.tags.iter().any(|t| t.to_lowercase().contains(&lower)),
                    "{} should not match {q:?}",
                    item.title
                );
            }
        }
    }

    #[test]
    fn tag_selection_is_or_across_tags() {
        let items = items();
        let shown = visible(&items, &filter("", Category::All, &["neon", "nature"]));
        assert!(!shown.is_empty());
        for item in &shown {
            assert!(item.tags.contains("neon") || item.tags.contains("nature"));
        }
        let single = visible(&items, &filter("", Category::All, &["neon"]));
        assert!(single.len() < shown.len());
    }

    #[test]
    fn tag_selection_is_exact_match() {
        let items = vec![Arc::new(test_item("1", "x", &["Neon"], false))];
        assert!(visible(&items, &filter("", Category::All, &["neon"])).is_empty());
    }

    #[test]
    fn favorites_applies_in_conjunction_with_search_and_tags() {
        let items = vec![
            Arc::new(test_item("1", "Neon portrait", &["neon"], true)),
            Arc::new(test_item("2", "Neon sign", &["neon"], false)),
            Arc::new(test_item("3", "Forest", &["nature"], true)),
        ];
        let shown = visible(&items, &filter("neon", Category::Favorites, &["neon"]));
        assert_eq!(ids(&shown), vec!["1"]);

        let shown = visible(&items, &filter("", Category::Favorites, &[]));
        assert_eq!(ids(&shown), vec!["1", "3"]);
        assert!(shown.iter().all(|i| i.is_favorited));
    }

    #[test]
    fn named_categories_pass_everything() {
        let items = items();
        let shown = visible(&items, &filter("", Category::named("locations"), &[]));
        assert_eq!(shown.len(), items.len());
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let mut f = FilterState::default();
        assert!(!f.is_active());
        assert!(f.toggle_tag("neon"));
        assert!(f.is_active());
        assert!(f.toggle_tag("nature"));
        assert!(!f.toggle_tag("neon"));
        assert_eq!(f.selected_tags.iter().collect::<Vec<_>>(), vec!["nature"]);
        f.clear();
        assert_eq!(f, FilterState::default());
    }
}
