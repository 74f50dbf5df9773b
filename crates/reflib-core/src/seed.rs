// ── Seed data ──
//
// The library starts from a fixed list of references. A JSON file with the
// same record layout can replace the built-in list.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::CoreError;
use crate::model::{ReferenceId, ReferenceItem};

struct SeedRow {
    id: &'static str,
    title: &'static str,
    media_url: &'static str,
    is_video: bool,
    source: &'static str,
    source_url: &'static str,
    age_days: i64,
    description: &'static str,
    tags: &'static [&'static str],
    is_favorited: bool,
}

const BUILTIN: &[SeedRow] = &[
    SeedRow {
        id: "1",
        title: "Neon portrait photography",
        media_url: "https://images.unsplash.com/photo-1544717297-fa95b6ee9643?w=400&h=400&fit=crop",
        is_video: false,
        source: "Instagram",
        source_url: "https://instagram.com/example",
        age_days: 2,
        description: "Striking portrait shoot lit entirely with neon",
        tags: &["portrait", "neon", "photography"],
        is_favorited: true,
    },
    SeedRow {
        id: "2",
        title: "Minimalist interior",
        media_url: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400&h=400&fit=crop",
        is_video: false,
        source: "Uploaded",
        source_url: "#",
        age_days: 5,
        description: "Clean lines and open space in a modern interior",
        tags: &["minimalism", "interior", "white"],
        is_favorited: false,
    },
    SeedRow {
        id: "3",
        title: "TikTok street fashion",
        media_url: "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=400&h=400&fit=crop",
        is_video: true,
        source: "Instagram",
        source_url: "https://instagram.com/example",
        age_days: 7,
        description: "Trending street-style looks for social media",
        tags: &["fashion", "street-style", "trends"],
        is_favorited: true,
    },
    SeedRow {
        id: "4",
        title: "Gradient design",
        media_url: "https://images.unsplash.com/photo-1557682224-5b8590cd9ec5?w=400&h=400&fit=crop",
        is_video: false,
        source: "Link",
        source_url: "https://dribbble.com/example",
        age_days: 3,
        description: "Smooth gradient transitions in graphic design",
        tags: &["gradient", "design", "bright colors"],
        is_favorited: false,
    },
    SeedRow {
        id: "5",
        title: "Night architecture",
        media_url: "https://images.unsplash.com/photo-1480714378408-67cf0d13bc1f?w=400&h=400&fit=crop",
        is_video: false,
        source: "Instagram",
        source_url: "https://instagram.com/example",
        age_days: 4,
        description: "Architectural photography under night lighting",
        tags: &["architecture", "night", "cityscape"],
        is_favorited: false,
    },
    SeedRow {
        id: "6",
        title: "Nature color palette",
        media_url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=400&fit=crop",
        is_video: false,
        source: "Pinterest",
        source_url: "https://pinterest.com/example",
        age_days: 1,
        description: "A natural color range taken from landscapes",
        tags: &["nature", "color palette", "green"],
        is_favorited: true,
    },
];

/// Built-in references, with capture dates placed relative to `now`.
pub fn default_seed_at(now: DateTime<Utc>) -> Vec<ReferenceItem> {
    BUILTIN
        .iter()
        .map(|row| ReferenceItem {
            id: ReferenceId::from(row.id),
            title: row.title.into(),
            media_url: row.media_url.into(),
            is_video: row.is_video,
            source: row.source.into(),
            source_url: row.source_url.into(),
            captured_at: now - Duration::days(row.age_days),
            description: row.description.into(),
            tags: row.tags.iter().copied().collect(),
            is_favorited: row.is_favorited,
        })
        .collect()
}

/// Built-in references dated relative to the current time.
pub fn default_seed() -> Vec<ReferenceItem> {
    default_seed_at(Utc::now())
}

/// Read a JSON array of reference records.
pub fn load_seed_file(path: &Path) -> Result<Vec<ReferenceItem>, CoreError> {
    let seed_err = |reason: String| CoreError::Seed {
        path: path.to_path_buf(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| seed_err(e.to_string()))?;
    let items: Vec<ReferenceItem> = serde_json::from_str(&raw).map_err(|e| seed_err(e.to_string()))?;
    info!(path = %path.display(), count = items.len(), "loaded seed file");
    Ok(items)
}

#[cfg(test)]
pub(crate) fn test_item(id: &str, title: &str, tags: &[&str], is_favorited: bool) -> ReferenceItem {
    use chrono::TimeZone;

    ReferenceItem {
        id: ReferenceId::from(id),
        title: title.into(),
        media_url: format!("https://example.com/{id}.jpg"),
        is_video: false,
        source: "Uploaded".into(),
        source_url: "#".into(),
        captured_at: Utc
            .with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
            .single()
            .unwrap_or_default(),
        description: String::new(),
        tags: tags.iter().copied().collect(),
        is_favorited,
    }
}
