// ── Domain model ──
//
// Plain data types shared by the store, the filter engine and the UI.

pub mod category;
pub mod reference;
pub mod reference_id;
pub mod tags;

// ── Re-exports ──────────────────────────────────────────────────────

pub use category::{Category, CategoryInfo, ViewMode, catalog};
pub use reference::{ReferenceItem, relative_label};
pub use reference_id::ReferenceId;
pub use tags::TagSet;
