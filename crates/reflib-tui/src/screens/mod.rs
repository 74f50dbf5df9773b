//! Panes and overlays. Each one is a Component driven by the App.

mod detail;
mod listing;
mod sidebar;

pub use detail::Detail;
pub use listing::Listing;
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
