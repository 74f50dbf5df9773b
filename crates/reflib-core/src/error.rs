// ── Core error types ──
//
// Every failure in the library degrades to "state unchanged". Callers get
// a typed reason so the UI can decide whether to surface it.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ReferenceId;

/// Reasons a user edit was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("tag is empty")]
    EmptyTag,

    #[error("tag '{tag}' is already present")]
    DuplicateTag { tag: String },

    #[error("no description edit in progress")]
    NotEditing,

    #[error("no reference is open")]
    NoSelection,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data errors ──────────────────────────────────────────────────
    #[error("Reference not found: {id}")]
    NotFound { id: ReferenceId },

    #[error("Duplicate reference id in seed: {id}")]
    DuplicateId { id: ReferenceId },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    // ── Seed errors ──────────────────────────────────────────────────
    #[error("Cannot load seed from {}: {reason}", path.display())]
    Seed { path: PathBuf, reason: String },
}

impl CoreError {
    /// Whether this error is an expected user-level no-op (as opposed to a
    /// problem with the data the library was started with).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_converts_into_core_error() {
        let err: CoreError = InvalidInput::EmptyTag.into();
        assert!(matches!(err, CoreError::InvalidInput(InvalidInput::EmptyTag)));
        assert!(err.is_rejection());
    }

    #[test]
    fn seed_error_is_not_a_rejection() {
        let err = CoreError::Seed {
            path: PathBuf::from("/tmp/seed.json"),
            reason: "missing field `id`".into(),
        };
        assert!(!err.is_rejection());
        assert_eq!(
            err.to_string(),
            "Cannot load seed from /tmp/seed.json: missing field `id`"
        );
    }

    #[test]
    fn duplicate_tag_message_names_the_tag() {
        let err = CoreError::from(InvalidInput::DuplicateTag { tag: "neon".into() });
        assert_eq!(err.to_string(), "Invalid input: tag 'neon' is already present");
    }
}
