//! Detail modal: one reference with its description and tags editable.
//!
//! Open whenever the library view resolves a selected reference. Captures
//! every key while open. Description edits stream into the library's
//! draft and are committed or discarded there; a new tag is typed locally
//! and only sent on Enter.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tui_input::{Input, InputRequest};

use reflib_core::ReferenceItem;

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Browse,
    EditDescription,
    AddTag,
}

pub struct Detail {
    item: Option<Arc<ReferenceItem>>,
    mode: Mode,
    input: Input,
    /// Index of the highlighted tag chip.
    tag_cursor: usize,
}

/// Map a key to a line-editing request. Plain characters insert.
fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let req = match key.code {
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(req)
}

impl Detail {
    pub fn new() -> Self {
        Self {
            item: None,
            mode: Mode::Browse,
            input: Input::default(),
            tag_cursor: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.item.is_some()
    }

    fn selected_tag(&self) -> Option<&str> {
        self.item.as_ref()?.tags.get(self.tag_cursor)
    }

    fn handle_browse(&mut self, key: KeyEvent) -> Option<Action> {
        let item = self.item.clone()?;
        match key.code {
            KeyCode::Esc => Some(Action::CloseDetail),
            KeyCode::Char('f') => Some(Action::ToggleFavorite(item.id.clone())),
            KeyCode::Char('e') => {
                self.mode = Mode::EditDescription;
                self.input = Input::new(item.description.clone());
                Some(Action::BeginEditDescription)
            }
            KeyCode::Char('a') => {
                self.mode = Mode::AddTag;
                self.input.reset();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.tag_cursor = self.tag_cursor.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.tag_cursor = (self.tag_cursor + 1).min(item.tags.len().saturating_sub(1));
                None
            }
            KeyCode::Char('x') | KeyCode::Delete => self
                .selected_tag()
                .map(|t| Action::RemoveTag(item.id.clone(), t.to_owned())),
            KeyCode::Char('o') => {
                let note = if item.has_source_link() {
                    Notification::info(format!("Source: {}", item.source_url))
                } else {
                    Notification::info(format!("{} has no source link", item.source))
                };
                Some(Action::Notify(note))
            }
            _ => None,
        }
    }

    fn handle_edit_description(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                Some(Action::CancelEditDescription)
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                Some(Action::SaveDescription)
            }
            _ => {
                let changed = input_request(key).and_then(|req| self.input.handle(req));
                changed
                    .filter(|c| c.value)
                    .map(|_| Action::DescriptionInput(self.input.value().to_owned()))
            }
        }
    }

    fn handle_add_tag(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.input.reset();
                None
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                let raw = self.input.value().to_owned();
                self.input.reset();
                let item = self.item.as_ref()?;
                Some(Action::AddTag(item.id.clone(), raw))
            }
            _ => {
                if let Some(req) = input_request(key) {
                    self.input.handle(req);
                }
                None
            }
        }
    }

    /// Centered modal area, at most 72x22.
    fn modal_area(area: Rect) -> Rect {
        let width = 72u16.min(area.width.saturating_sub(4));
        let height = 22u16.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        Rect::new(area.x + x, area.y + y, width, height)
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, label: &str) {
        let block = Block::default()
            .title(format!(" {label} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = usize::from(inner.width.max(1));
        let scroll = self.input.visual_scroll(width.saturating_sub(1));
        let scroll_u16 = u16::try_from(scroll).unwrap_or(0);
        frame.render_widget(
            Paragraph::new(self.input.value())
                .style(Style::default().fg(theme::NEON_CYAN))
                .scroll((0, scroll_u16)),
            inner,
        );
        let cursor = self.input.visual_cursor().saturating_sub(scroll);
        let cursor = u16::try_from(cursor).unwrap_or(inner.width);
        frame.set_cursor_position(Position::new(inner.x + cursor, inner.y));
    }

    fn hints(&self) -> Line<'static> {
        let pairs: &[(&str, &str)] = match self.mode {
            Mode::Browse => &[
                ("Esc", "close"),
                ("f", "favorite"),
                ("e", "edit"),
                ("a", "add tag"),
                ("←/→", "tag"),
                ("x", "remove"),
                ("o", "source"),
            ],
            Mode::EditDescription => &[("Enter", "save"), ("Esc", "cancel")],
            Mode::AddTag => &[("Enter", "add"), ("Esc", "cancel")],
        };
        let mut spans = Vec::with_capacity(pairs.len() * 2);
        for (key, label) in pairs {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{label} "), theme::key_hint()));
        }
        Line::from(spans)
    }
}

impl Component for Detail {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.mode {
            Mode::Browse => self.handle_browse(key),
            Mode::EditDescription => self.handle_edit_description(key),
            Mode::AddTag => self.handle_add_tag(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::LibraryChanged(state) = action {
            let view = &state.view;
            let switched = match (&self.item, &view.selected) {
                (Some(old), Some(new)) => old.id != new.id,
                (None, None) => false,
                _ => true,
            };
            if switched {
                self.mode = Mode::Browse;
                self.tag_cursor = 0;
                self.input.reset();
            }
            if self.mode == Mode::EditDescription && view.description_draft.is_none() {
                self.mode = Mode::Browse;
            }
            self.item.clone_from(&view.selected);
            if let Some(item) = &self.item {
                self.tag_cursor = self.tag_cursor.min(item.tags.len().saturating_sub(1));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(item) = &self.item else {
            return;
        };
        let modal = Self::modal_area(area);
        frame.render_widget(Clear, modal);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            modal,
        );

        let star = if item.is_favorited { " ★" } else { "" };
        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(format!(" {} ", item.title), theme::title_style()),
                Span::styled(star, theme::favorite()),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [media, meta, description, tags, input, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        let kind = if item.is_video { "▶ video" } else { "image" };
        let kind_style = if item.is_video {
            theme::video()
        } else {
            theme::meta()
        };
        let url = card::truncate(&item.media_url, usize::from(media.width).saturating_sub(10));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{kind}  "), kind_style),
                Span::styled(url, theme::meta()),
            ])),
            media,
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(item.source.clone(), theme::table_row()),
                Span::styled(format!(" · {}", item.captured_label(Utc::now())), theme::meta()),
            ])),
            meta,
        );

        match (self.mode, &item.description) {
            (Mode::EditDescription, _) => self.render_input(frame, description, "Description"),
            (_, text) if text.is_empty() => frame.render_widget(
                Paragraph::new(Span::styled("No description. Press e to add one.", theme::meta())),
                description,
            ),
            (_, text) => frame.render_widget(
                Paragraph::new(text.as_str())
                    .style(theme::table_row())
                    .wrap(Wrap { trim: true }),
                description,
            ),
        }

        let highlight = (self.mode == Mode::Browse).then_some(self.tag_cursor);
        let chips = if item.tags.is_empty() {
            Line::from(Span::styled("No tags", theme::meta()))
        } else {
            Line::from(card::tag_spans(&item.tags, highlight))
        };
        frame.render_widget(Paragraph::new(chips).wrap(Wrap { trim: true }), tags);

        if self.mode == Mode::AddTag {
            self.render_input(frame, input, "New tag");
        }

        frame.render_widget(Paragraph::new(self.hints()), hints);
    }

    fn id(&self) -> &'static str {
        "detail"
    }
}
