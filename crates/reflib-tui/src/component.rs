//! Component trait: the building block for every pane and overlay.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Every UI element implements Component.
///
/// Lifecycle: (`handle_key_event` | `update` | `render`)*. Components never
/// touch the library; they read it from `Action::LibraryChanged` and ask for
/// changes by returning actions.
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently holds input focus.
    fn focused(&self) -> bool {
        false
    }

    /// Set focus state.
    fn set_focused(&mut self, _focused: bool) {}

    /// Unique identifier for this component, used in logs.
    fn id(&self) -> &'static str;
}
