// ── Reference identity ──
//
// Ids are opaque strings assigned when an item enters the library (seed
// today, an import flow later). Nothing parses them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for a reference item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReferenceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for ReferenceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReferenceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for ReferenceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reference_id_display_is_raw_string() {
        let id = ReferenceId::from("ref-42");
        assert_eq!(id.to_string(), "ref-42");
    }

    #[test]
    fn reference_id_from_str() {
        let id: ReferenceId = "7".parse().unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn reference_id_serializes_transparently() {
        let id = ReferenceId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: ReferenceId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }
}
