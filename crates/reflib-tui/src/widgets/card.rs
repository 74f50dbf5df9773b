//! Reference cards (grid mode) and rows (list mode).
//!
//! Media is never decoded; a card shows a `▶` glyph for videos and the
//! title, source, capture date and tags as text.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use reflib_core::{ReferenceItem, TagSet};

use crate::theme;

/// Outer size of one grid card, borders included.
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 6;

/// Cut `s` to at most `max` characters, ending in `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `#tag` chips separated by spaces. The chip at `highlight` is inverted.
pub fn tag_spans(tags: &TagSet, highlight: Option<usize>) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(tags.len() * 2);
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if highlight == Some(i) {
            theme::tag_active()
        } else {
            theme::tag()
        };
        spans.push(Span::styled(format!("#{tag}"), style));
    }
    spans
}

fn title_spans(item: &ReferenceItem, max: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(3);
    let mut room = max;
    if item.is_video {
        spans.push(Span::styled("▶ ", theme::video()));
        room = room.saturating_sub(2);
    }
    if item.is_favorited {
        room = room.saturating_sub(2);
    }
    spans.push(Span::styled(truncate(&item.title, room), theme::table_row()));
    if item.is_favorited {
        spans.push(Span::styled(" ★", theme::favorite()));
    }
    spans
}

fn meta_text(item: &ReferenceItem, now: DateTime<Utc>) -> String {
    format!("{} · {}", item.source, item.captured_label(now))
}

/// One grid card with a rounded border. The card under the cursor gets the
/// focused border and highlight background.
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    item: &ReferenceItem,
    selected: bool,
    now: DateTime<Utc>,
) {
    let (border, body) = if selected {
        (theme::border_focused(), theme::table_selected())
    } else {
        (theme::border_default(), ratatui::style::Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(body);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let lines = vec![
        Line::from(title_spans(item, width)),
        Line::from(Span::styled(truncate(&meta_text(item, now), width), theme::meta())),
        Line::from(""),
        Line::from(tag_spans(&item.tags, None)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// One list-mode row: title, then source and date, then tags.
pub fn list_row(item: &ReferenceItem, width: u16, now: DateTime<Utc>) -> Line<'static> {
    let title_width = usize::from(width / 3).max(12);
    let mut spans = title_spans(item, title_width);
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    spans.push(Span::raw(" ".repeat(title_width.saturating_sub(used) + 2)));
    spans.push(Span::styled(format!("{:<28}", meta_text(item, now)), theme::meta()));
    spans.extend(tag_spans(&item.tags, None));
    Line::from(spans)
}
