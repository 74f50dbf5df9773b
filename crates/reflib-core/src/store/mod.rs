// ── Reference storage ──

mod reference_store;

pub use reference_store::{ReferenceStore, Snapshot};
