//! Sidebar pane: categories with counts, then the tag palette.
//!
//! One cursor walks categories first and tags after them. Enter or Space
//! selects the category or toggles the tag under the cursor.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use reflib_core::{CategoryInfo, FilterState, catalog};

use crate::action::{Action, LibraryState};
use crate::component::Component;
use crate::theme;

/// Width the app gives the sidebar.
pub const SIDEBAR_WIDTH: u16 = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Category(usize),
    Tag(usize),
}

pub struct Sidebar {
    focused: bool,
    categories: Vec<CategoryInfo>,
    tags: Vec<String>,
    /// Count per category, aligned with `categories`.
    counts: Vec<Option<usize>>,
    filter: FilterState,
    cursor: usize,
}

impl Sidebar {
    pub fn new() -> Self {
        let categories = catalog();
        Self {
            focused: false,
            counts: vec![None; categories.len()],
            categories,
            tags: Vec::new(),
            filter: FilterState::default(),
            cursor: 0,
        }
    }

    fn len(&self) -> usize {
        self.categories.len() + self.tags.len()
    }

    fn entry(&self, index: usize) -> Option<Entry> {
        if index < self.categories.len() {
            Some(Entry::Category(index))
        } else if index < self.len() {
            Some(Entry::Tag(index - self.categories.len()))
        } else {
            None
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let last = self.len().saturating_sub(1);
        self.cursor = if down {
            (self.cursor + 1).min(last)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    fn activate(&self) -> Option<Action> {
        match self.entry(self.cursor)? {
            Entry::Category(i) => self
                .categories
                .get(i)
                .map(|info| Action::SelectCategory(info.category.clone())),
            Entry::Tag(i) => self.tags.get(i).map(|t| Action::ToggleTag(t.clone())),
        }
    }

    fn category_line(&self, i: usize, info: &CategoryInfo) -> Line<'static> {
        let active = info.category == self.filter.category;
        let marker = if active { "▸ " } else { "  " };
        let mut style = if active {
            theme::tab_active()
        } else {
            theme::tab_inactive()
        };
        if self.focused && self.cursor == i {
            style = theme::table_selected();
        }
        let mut spans = vec![Span::styled(format!("{marker}{}", info.label), style)];
        if let Some(count) = self.counts.get(i).copied().flatten() {
            spans.push(Span::styled(format!(" {count}"), theme::meta()));
        }
        Line::from(spans)
    }

    fn tag_line(&self, i: usize, tag: &str) -> Line<'static> {
        let on = self.filter.selected_tags.contains(tag);
        let (marker, mut style) = if on {
            ("● ", theme::tag_active())
        } else {
            ("○ ", theme::tag())
        };
        if self.focused && self.cursor == self.categories.len() + i {
            style = theme::table_selected();
        }
        Line::from(Span::styled(format!("  {marker}{tag}"), style))
    }
}

impl Component for Sidebar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(true);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(false);
                Ok(None)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Ok(self.activate()),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::LibraryChanged(state) = action {
            let LibraryState { view, sidebar_tags } = state.as_ref();
            self.counts = self
                .categories
                .iter()
                .map(|info| view.category_count(&info.category))
                .collect();
            self.tags.clone_from(sidebar_tags);
            self.filter = view.filter.clone();
            self.cursor = self.cursor.min(self.len().saturating_sub(1));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Library ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, info)| self.category_line(i, info))
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Tags",
            Style::default().fg(theme::NEON_CYAN),
        )));
        lines.extend(self.tags.iter().enumerate().map(|(i, t)| self.tag_line(i, t)));

        // Keep the cursor on screen when the palette is longer than the pane.
        let cursor_line = if self.cursor < self.categories.len() {
            self.cursor
        } else {
            self.cursor + 2
        };
        let height = usize::from(inner.height);
        let scroll = cursor_line.saturating_sub(height.saturating_sub(1));
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "sidebar"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use reflib_core::{Category, Library, seed::default_seed};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> Sidebar {
        let lib = Library::from_seed(default_seed())
            .unwrap()
            .with_sidebar_tags(vec!["neon".into(), "nature".into()]);
        let state = LibraryState {
            view: lib.view(),
            sidebar_tags: lib.sidebar_tags(),
        };
        let mut sidebar = Sidebar::new();
        sidebar.update(&Action::LibraryChanged(Arc::new(state))).unwrap();
        sidebar
    }

    #[test]
    fn cursor_walks_categories_then_tags() {
        let mut sidebar = loaded();
        for _ in 0..catalog().len() {
            sidebar.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        }
        let action = sidebar.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::ToggleTag(ref t)) if t == "neon"));

        // Clamped at the last tag.
        for _ in 0..10 {
            sidebar.handle_key_event(key(KeyCode::Down)).unwrap();
        }
        let action = sidebar.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(matches!(action, Some(Action::ToggleTag(ref t)) if t == "nature"));
    }

    #[test]
    fn enter_on_first_entry_selects_all() {
        let mut sidebar = loaded();
        let action = sidebar.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SelectCategory(Category::All))));
    }

    #[test]
    fn counts_only_for_all_and_favorites() {
        let sidebar = loaded();
        assert_eq!(sidebar.counts.first().copied().flatten(), Some(6));
        assert_eq!(sidebar.counts.last().copied().flatten(), Some(3));
        assert_eq!(sidebar.counts.get(1).copied().flatten(), None);
    }
}
