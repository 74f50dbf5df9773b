// ── Categories and view mode ──
//
// Only `All` and `Favorites` change what is visible. Named categories are
// labels in the sidebar with no item association behind them, so they let
// every item through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// The category selected in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    All,
    Favorites,
    Named(String),
}

impl Category {
    pub fn named(id: impl Into<String>) -> Self {
        Self::from(id.into())
    }

    /// Stable identifier, e.g. `"all"`, `"favorites"`, `"video-ideas"`.
    pub fn id(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Favorites => "favorites",
            Self::Named(id) => id,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "all" => Self::All,
            "favorites" => Self::Favorites,
            _ => Self::Named(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Named(id) => id,
            other => other.id().to_owned(),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// A sidebar entry: the category plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub label: &'static str,
}

/// Sidebar categories in display order. `All` first, `Favorites` last.
pub fn catalog() -> Vec<CategoryInfo> {
    vec![
        CategoryInfo {
            category: Category::All,
            label: "All references",
        },
        CategoryInfo {
            category: Category::named("video-ideas"),
            label: "Video ideas",
        },
        CategoryInfo {
            category: Category::named("color-palettes"),
            label: "Color palettes",
        },
        CategoryInfo {
            category: Category::named("locations"),
            label: "Locations",
        },
        CategoryInfo {
            category: Category::named("composition"),
            label: "Composition",
        },
        CategoryInfo {
            category: Category::Favorites,
            label: "Favorites",
        },
    ]
}

/// How the listing lays out cards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}
