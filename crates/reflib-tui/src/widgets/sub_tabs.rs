//! Grid/list switch shown in the listing header.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use strum::IntoEnumIterator;

use reflib_core::ViewMode;

use crate::theme;

fn label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Grid => "▦ Grid",
        ViewMode::List => "☰ List",
    }
}

/// One tab per view mode; the active one is bracketed in Electric Purple.
pub fn view_mode_tabs(active: ViewMode) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, mode) in ViewMode::iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        if mode == active {
            spans.push(Span::styled(
                format!("[{}]", label(mode)),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label(mode), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}
