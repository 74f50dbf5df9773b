//! Listing pane: the visible references as a card grid or a list.
//!
//! The cursor is an index into the visible sequence. It is clamped whenever
//! the library changes, so filtering never leaves it past the end.

use std::cell::Cell;
use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use reflib_core::{LibraryView, ReferenceItem, ViewMode};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::card::{self, CARD_HEIGHT, CARD_WIDTH};
use crate::widgets::sub_tabs;

pub struct Listing {
    focused: bool,
    items: Vec<Arc<ReferenceItem>>,
    view_mode: ViewMode,
    heading: &'static str,
    cursor: usize,
    /// Cards per grid row at the last render. Row moves step by this much.
    columns: Cell<usize>,
}

impl Listing {
    pub fn new() -> Self {
        Self {
            focused: false,
            items: Vec::new(),
            view_mode: ViewMode::default(),
            heading: "All references",
            cursor: 0,
            columns: Cell::new(1),
        }
    }

    fn row_step(&self) -> usize {
        match self.view_mode {
            ViewMode::Grid => self.columns.get().max(1),
            ViewMode::List => 1,
        }
    }

    fn move_by(&mut self, delta: isize) {
        let last = self.items.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    fn current(&self) -> Option<&Arc<ReferenceItem>> {
        self.items.get(self.cursor)
    }

    fn apply_view(&mut self, view: &LibraryView) {
        self.items.clone_from(&view.visible);
        self.view_mode = view.view_mode;
        self.heading = view.heading();
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let count = self.items.len();
        let noun = if count == 1 { "reference" } else { "references" };
        let mut spans = vec![
            Span::styled(self.heading, theme::title_style()),
            Span::styled(format!("  {count} {noun}"), theme::meta()),
            Span::raw("   "),
        ];
        spans.extend(sub_tabs::view_mode_tabs(self.view_mode).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        self.columns.set(columns);

        let rows_fit = usize::from((area.height / CARD_HEIGHT).max(1));
        let cursor_row = self.cursor / columns;
        let first_row = cursor_row.saturating_sub(rows_fit - 1);

        let now = Utc::now();
        let start = first_row * columns;
        for (offset, item) in self.items.iter().skip(start).take(rows_fit * columns).enumerate() {
            let (row, col) = (offset / columns, offset % columns);
            let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
                break;
            };
            let cell = Rect::new(
                area.x + col * CARD_WIDTH,
                area.y + row * CARD_HEIGHT,
                CARD_WIDTH,
                CARD_HEIGHT,
            )
            .intersection(area);
            card::render_card(frame, cell, item, start + offset == self.cursor, now);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let now = Utc::now();
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(card::list_row(item, area.width, now)))
            .collect();
        let list = List::new(rows).highlight_style(theme::table_selected());
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

impl Component for Listing {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let step = isize::try_from(self.row_step()).unwrap_or(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_by(step),
            KeyCode::Char('k') | KeyCode::Up => self.move_by(-step),
            KeyCode::Char('l') | KeyCode::Right => self.move_by(1),
            KeyCode::Char('h') | KeyCode::Left => self.move_by(-1),
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => self.cursor = self.items.len().saturating_sub(1),
            KeyCode::Enter => return Ok(self.current().map(|i| Action::OpenDetail(i.id.clone()))),
            KeyCode::Char('f') => {
                return Ok(self.current().map(|i| Action::ToggleFavorite(i.id.clone())));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::LibraryChanged(state) = action {
            self.apply_view(&state.view);
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
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
        self.render_header(frame, header);

        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No references match the current filters. Press c to clear them.",
                    theme::meta(),
                ))),
                body,
            );
            return;
        }

        match self.view_mode {
            ViewMode::Grid => self.render_grid(frame, body),
            ViewMode::List => self.render_list(frame, body),
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "listing"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use reflib_core::{Command, Library, ReferenceId, seed::default_seed};

    use crate::action::LibraryState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn push(listing: &mut Listing, lib: &Library) {
        let state = LibraryState {
            view: lib.view(),
            sidebar_tags: lib.sidebar_tags(),
        };
        listing.update(&Action::LibraryChanged(Arc::new(state))).unwrap();
    }

    fn opened(action: Option<Action>) -> Option<ReferenceId> {
        match action {
            Some(Action::OpenDetail(id)) => Some(id),
            _ => None,
        }
    }

    #[test]
    fn grid_rows_step_by_column_count() {
        let lib = Library::from_seed(default_seed()).unwrap();
        let mut listing = Listing::new();
        push(&mut listing, &lib);
        listing.columns.set(3);

        listing.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let id = opened(listing.handle_key_event(key(KeyCode::Enter)).unwrap());
        assert_eq!(id, Some(ReferenceId::from("4")));

        listing.handle_key_event(key(KeyCode::Char('h'))).unwrap();
        let id = opened(listing.handle_key_event(key(KeyCode::Enter)).unwrap());
        assert_eq!(id, Some(ReferenceId::from("3")));
    }

    #[test]
    fn cursor_clamps_when_filter_narrows() {
        let mut lib = Library::from_seed(default_seed()).unwrap();
        let mut listing = Listing::new();
        push(&mut listing, &lib);
        listing.handle_key_event(key(KeyCode::Char('G'))).unwrap();

        lib.apply(Command::Search("neon".into())).unwrap();
        push(&mut listing, &lib);
        let id = opened(listing.handle_key_event(key(KeyCode::Enter)).unwrap());
        assert_eq!(id, Some(ReferenceId::from("1")));
    }

    #[test]
    fn empty_listing_opens_nothing() {
        let mut lib = Library::from_seed(default_seed()).unwrap();
        lib.apply(Command::Search("zzz".into())).unwrap();
        let mut listing = Listing::new();
        push(&mut listing, &lib);
        assert!(listing.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert!(listing.handle_key_event(key(KeyCode::Char('f'))).unwrap().is_none());
    }
}
