// ── Detail editing rules ──
//
// Description edits go through an explicit draft that is either committed
// or discarded. Tag edits have no draft: each add or remove produces the
// full new tag set to hand to the store.

use crate::error::{CoreError, InvalidInput};
use crate::model::TagSet;

/// In-progress description text, separate from the committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionDraft {
    draft: Option<String>,
}

impl DescriptionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter edit mode seeded with the committed description.
    pub fn begin(&mut self, current: &str) {
        self.draft = Some(current.to_owned());
    }

    /// Replace the draft text. Fails when not editing.
    pub fn update(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        let draft = self.draft.as_mut().ok_or(InvalidInput::NotEditing)?;
        *draft = text.into();
        Ok(())
    }

    /// Leave edit mode, yielding the text to commit.
    pub fn commit(&mut self) -> Result<String, CoreError> {
        Ok(self.draft.take().ok_or(InvalidInput::NotEditing)?)
    }

    /// Leave edit mode without yielding anything. Returns whether a draft
    /// was dropped.
    pub fn discard(&mut self) -> bool {
        self.draft.take().is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.draft.as_deref()
    }
}

/// Tag set with `raw` appended, after trimming. Empty and already-present
/// tags are rejected.
pub fn add_tag(current: &TagSet, raw: &str) -> Result<TagSet, CoreError> {
    let tag = raw.trim();
    if tag.is_empty() {
        return Err(InvalidInput::EmptyTag.into());
    }
    if current.contains(tag) {
        return Err(InvalidInput::DuplicateTag { tag: tag.to_owned() }.into());
    }
    let mut next = current.clone();
    next.push(tag);
    Ok(next)
}

/// Tag set without the exact entry `tag`; unchanged if it was not there.
pub fn remove_tag(current: &TagSet, tag: &str) -> TagSet {
    let mut next = current.clone();
    next.remove(tag);
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(list: &[&str]) -> TagSet {
        list.iter().copied().collect()
    }

    #[test]
    fn add_trims_and_appends() {
        let next = add_tag(&tags(&["a", "b"]), "  c \t").unwrap();
        assert_eq!(next, tags(&["a", "b", "c"]));
    }

    #[test]
    fn add_rejects_blank() {
        let err = add_tag(&tags(&["a"]), "   ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(InvalidInput::EmptyTag)));
    }

    #[test]
    fn add_rejects_exact_duplicate_after_trim() {
        let err = add_tag(&tags(&["neon"]), " neon ").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(InvalidInput::DuplicateTag { ref tag }) if tag == "neon"
        ));
        // Different case is a different tag.
        assert_eq!(add_tag(&tags(&["neon"]), "Neon").unwrap(), tags(&["neon", "Neon"]));
    }

    #[test]
    fn remove_absent_tag_is_identity() {
        let current = tags(&["a", "b"]);
        assert_eq!(remove_tag(&current, "zzz"), current);
        assert_eq!(remove_tag(&current, "a"), tags(&["b"]));
    }

    #[test]
    fn draft_lifecycle() {
        let mut draft = DescriptionDraft::new();
        assert!(!draft.is_editing());
        assert!(draft.update("x").is_err());
        assert!(draft.commit().is_err());

        draft.begin("committed");
        assert_eq!(draft.text(), Some("committed"));
        draft.update("edited").unwrap();
        assert_eq!(draft.commit().unwrap(), "edited");
        assert!(!draft.is_editing());

        draft.begin("committed");
        assert!(draft.discard());
        assert!(!draft.discard());
        assert_eq!(draft.text(), None);
    }
}
