// ── Tag set ──
//
// Ordered, duplicate-free tag list. Order is insertion order and is what
// the UI shows; equality is exact and case-sensitive.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of tags attached to one reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(IndexSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` at the end. Returns `false` (and leaves the set alone)
    /// when an identical tag is already present.
    pub fn push(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Remove `tag`, keeping the relative order of the remaining tags.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.shift_remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// True when at least one tag is shared with `other`.
    pub fn intersects<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        other.into_iter().any(|t| self.0.contains(t.as_str()))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
