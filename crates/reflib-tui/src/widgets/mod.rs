//! Reusable rendering helpers shared by the panes.

pub mod card;
pub mod sub_tabs;
