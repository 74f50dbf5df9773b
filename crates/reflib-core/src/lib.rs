//! State layer for a personal reference library (moodboard-style collection
//! of images and videos), shared by the terminal UI and its tests.
//!
//! - **[`Library`]**: Central facade. Owns every piece of mutable state and
//!   accepts user intents as [`Command`]s through
//!   [`apply()`](Library::apply). [`view()`](Library::view) recomputes the
//!   visible listing, counts and open detail from current state.
//!
//! - **[`ReferenceStore`]**: Ordered id-keyed storage with copy-on-write
//!   records. Each mutation rebuilds a shared [`Snapshot`] and broadcasts it
//!   over a `tokio::sync::watch` channel.
//!
//! - **Filtering** ([`filter`]): Pure search, category and tag predicates
//!   combined by conjunction. Output order always follows the store.
//!
//! - **Detail editing** ([`editor`], [`selection`]): Description drafts that
//!   commit or discard explicitly, tag add/remove rules, and the id of the
//!   reference open in the detail view.
//!
//! - **Domain model** ([`model`]): [`ReferenceItem`], [`TagSet`],
//!   [`Category`] and [`ViewMode`], plus the built-in [`seed`] data.

pub mod command;
pub mod editor;
pub mod error;
pub mod filter;
pub mod library;
pub mod model;
pub mod seed;
pub mod selection;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use error::{CoreError, InvalidInput};
pub use filter::FilterState;
pub use library::{Library, LibraryView};
pub use store::{ReferenceStore, Snapshot};

pub use model::{
    Category, CategoryInfo, ReferenceId, ReferenceItem, TagSet, ViewMode, catalog, relative_label,
};
