//! Application core: event loop, focus management, action dispatch.
//!
//! The `App` is the only owner of the [`Library`]. Actions that stand for a
//! library command are applied here; every change is followed by a
//! `LibraryChanged` broadcast so the panes re-read the view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::{Input, InputRequest};

use reflib_core::{Command, Library};

use crate::action::{Action, Focus, LibraryState, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{Detail, Listing, SIDEBAR_WIDTH, Sidebar};
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    library: Library,
    sidebar: Sidebar,
    listing: Listing,
    detail: Detail,
    /// Pane that receives navigation keys.
    focus: Focus,
    /// Whether the app should keep running.
    running: bool,
    help_visible: bool,
    /// Search bar has the keyboard.
    search_active: bool,
    search: Input,
    /// Action sender: components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver: main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    /// Wrap `library` and queue the initial view for every pane.
    pub fn new(library: Library) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            library,
            sidebar: Sidebar::new(),
            listing: Listing::new(),
            detail: Detail::new(),
            focus: Focus::default(),
            running: true,
            help_visible: false,
            search_active: false,
            search: Input::default(),
            action_tx,
            action_rx,
            notification: None,
        };
        app.apply_focus();
        app.broadcast()?;
        Ok(app)
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (w, h) = tui.size().unwrap_or((80, 24));
        self.action_tx.send(Action::Resize(w, h))?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(references = self.library.store().len(), "event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Map a key event to an action. Overlays capture input first, then
    /// global keys, then the focused pane.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.search_active {
            return Ok(self.handle_search_key(key));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if self.detail.is_open() {
            return self.detail.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('/') => return Ok(Some(Action::OpenSearch)),
            KeyCode::Char('v') => return Ok(Some(Action::ToggleViewMode)),
            KeyCode::Char('c') => return Ok(Some(Action::ClearFilters)),
            KeyCode::Tab | KeyCode::BackTab => return Ok(Some(Action::FocusNext)),
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.sidebar.handle_key_event(key),
            Focus::Listing => self.listing.handle_key_event(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        let req = match key.code {
            KeyCode::Esc => return Some(Action::CloseSearch),
            KeyCode::Enter => return Some(Action::SubmitSearch),
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            _ => return None,
        };
        self.search
            .handle(req)
            .filter(|changed| changed.value)
            .map(|_| Action::SearchInput(self.search.value().to_owned()))
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Process a single action: UI state first, then the library command
    /// it stands for, if any.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::FocusNext => {
                self.focus = self.focus.toggled();
                self.apply_focus();
                debug!(focus = ?self.focus, "focus changed");
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search = Input::new(self.library.filter().search_query.clone());
            }
            Action::SubmitSearch => self.search_active = false,
            Action::CloseSearch | Action::ClearFilters => {
                self.search_active = false;
                self.search.reset();
            }

            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),

            Action::LibraryChanged(_) => {
                let tx = self.action_tx.clone();
                for component in self.components_mut() {
                    if let Some(follow_up) = component.update(action)? {
                        tx.send(follow_up)?;
                    }
                }
            }

            _ => {}
        }

        if let Some(cmd) = action.to_command() {
            self.apply(cmd, action)?;
        }
        Ok(())
    }

    /// Apply a library command and broadcast the result. Rejected commands
    /// leave the library untouched and surface as a toast.
    fn apply(&mut self, cmd: Command, origin: &Action) -> Result<()> {
        match self.library.apply(cmd) {
            Ok(outcome) if outcome.changed() => {
                self.broadcast()?;
                if let Action::SaveDescription = origin {
                    self.action_tx
                        .send(Action::Notify(Notification::success("Description saved")))?;
                }
            }
            Ok(_) => {}
            Err(e) if e.is_rejection() => {
                self.action_tx
                    .send(Action::Notify(Notification::info(e.to_string())))?;
            }
            Err(e) => {
                warn!(error = %e, "library command failed");
                self.action_tx
                    .send(Action::Notify(Notification::error(e.to_string())))?;
            }
        }
        Ok(())
    }

    /// Queue the current library view for every pane.
    fn broadcast(&self) -> Result<()> {
        let state = LibraryState {
            view: self.library.view(),
            sidebar_tags: self.library.sidebar_tags(),
        };
        self.action_tx.send(Action::LibraryChanged(Arc::new(state)))?;
        Ok(())
    }

    fn components_mut(&mut self) -> [&mut dyn Component; 3] {
        [&mut self.sidebar, &mut self.listing, &mut self.detail]
    }

    fn apply_focus(&mut self) {
        self.sidebar.set_focused(self.focus == Focus::Sidebar);
        self.listing.set_focused(self.focus == Focus::Listing);
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [header, body, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [side, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .areas(body);

        self.render_header(frame, header);
        self.sidebar.render(frame, side);
        self.listing.render(frame, main);
        self.render_status_bar(frame, status);

        // Overlays, last = topmost
        self.detail.render(frame, area);

        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// App title plus the search box.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let border = if self.search_active {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" reflib ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let query = &self.library.filter().search_query;
        let line = if self.search_active {
            Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled(self.search.value(), Style::default().fg(theme::NEON_CYAN)),
            ])
        } else if query.is_empty() {
            Line::from(Span::styled(" / Search by title or tag", theme::key_hint()))
        } else {
            Line::from(vec![
                Span::styled(" / ", theme::key_hint()),
                Span::styled(query.as_str(), Style::default().fg(theme::NEON_CYAN)),
            ])
        };
        frame.render_widget(Paragraph::new(line), inner);

        if self.search_active {
            let cursor = u16::try_from(self.search.visual_cursor()).unwrap_or(inner.width);
            frame.set_cursor_position(Position::new(inner.x + 3 + cursor, inner.y));
        }
    }

    /// Bottom status bar with focus indicator and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.search_active {
            &[("Enter", "keep"), ("Esc", "clear")]
        } else {
            &[
                ("Tab", "focus"),
                ("/", "search"),
                ("v", "view"),
                ("c", "clear"),
                ("?", "help"),
                ("q", "quit"),
            ]
        };
        let pane = match self.focus {
            Focus::Sidebar => self.sidebar.id(),
            Focus::Listing => self.listing.id(),
        };

        let mut spans = vec![Span::styled(format!(" ● {pane} "), theme::tab_active())];
        spans.push(Span::styled("│", theme::key_hint()));
        for (key, label) in hints {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(*label, theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 26u16.min(area.height.saturating_sub(2));

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let sections: &[(&str, &[(&str, &str)])] = &[
            (
                "Global",
                &[
                    ("/", "Search (Enter keeps, Esc clears)"),
                    ("Tab", "Switch sidebar / listing"),
                    ("v", "Grid / list view"),
                    ("c", "Clear all filters"),
                    ("? q", "Help / quit"),
                ],
            ),
            (
                "Listing & sidebar",
                &[
                    ("j/k h/l", "Move"),
                    ("g/G", "Top / bottom"),
                    ("Enter", "Open detail / select"),
                    ("f", "Toggle favorite"),
                ],
            ),
            (
                "Detail",
                &[
                    ("e", "Edit description"),
                    ("a", "Add tag"),
                    ("←/→ x", "Pick / remove tag"),
                    ("o", "Show source link"),
                    ("Esc", "Close"),
                ],
            ),
        ];

        let mut lines = Vec::new();
        for (title, keys) in sections {
            lines.push(Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            )));
            for (key, label) in *keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                    Span::styled(*label, theme::key_hint()),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "                         Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Info => (theme::BORDER_GRAY, "·"),
        };

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
