// ── Reference item ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference_id::ReferenceId;
use super::tags::TagSet;

/// One catalogued image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub id: ReferenceId,
    pub title: String,
    /// Locator of the preview asset.
    pub media_url: String,
    /// Selects the play affordance when rendering.
    #[serde(default)]
    pub is_video: bool,
    /// Free-text origin label ("Instagram", "Uploaded", "Link", ...).
    pub source: String,
    /// Where "open in source" points. May be a placeholder such as `#`.
    #[serde(default = "placeholder_url")]
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub is_favorited: bool,
}

fn placeholder_url() -> String {
    "#".into()
}

impl ReferenceItem {
    /// Whether `source_url` points somewhere real.
    pub fn has_source_link(&self) -> bool {
        !self.source_url.is_empty() && self.source_url != "#"
    }

    /// Relative capture date for display, computed against `now`.
    pub fn captured_label(&self, now: DateTime<Utc>) -> String {
        relative_label(self.captured_at, now)
    }
}

/// Format the distance between `at` and `now` as "3 days ago" style text.
///
/// Future instants and anything under a minute read as "just now".
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(at).num_seconds();
    if secs < 60 {
        return "just now".into();
    }

    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (n, unit) = if hours == 0 {
        (minutes, "minute")
    } else if days == 0 {
        (hours, "hour")
    } else if days < 7 {
        (days, "day")
    } else if days < 30 {
        (days / 7, "week")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn labels_pick_the_largest_whole_unit() {
        let now = now();
        insta::assert_snapshot!(relative_label(now - Duration::seconds(5), now), @"just now");
        insta::assert_snapshot!(relative_label(now - Duration::minutes(1), now), @"1 minute ago");
        insta::assert_snapshot!(relative_label(now - Duration::minutes(59), now), @"59 minutes ago");
        insta::assert_snapshot!(relative_label(now - Duration::hours(3), now), @"3 hours ago");
        insta::assert_snapshot!(relative_label(now - Duration::days(2), now), @"2 days ago");
        insta::assert_snapshot!(relative_label(now - Duration::days(7), now), @"1 week ago");
        insta::assert_snapshot!(relative_label(now - Duration::days(65), now), @"2 months ago");
        insta::assert_snapshot!(relative_label(now - Duration::days(800), now), @"2 years ago");
    }

    #[test]
    fn future_instants_read_as_just_now() {
        let now = now();
        assert_eq!(relative_label(now + Duration::hours(4), now), "just now");
    }

    #[test]
    fn deserializes_camel_case_record_with_defaults() {
        let json = r#"{
            "id": "9",
            "title": "Fog study",
            "mediaUrl": "https://example.com/fog.jpg",
            "source": "Uploaded",
            "capturedAt": "2026-10-01T08:30:00Z",
            "tags": ["fog", "landscape", "fog"]
        }"#;
        let item: ReferenceItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "9");
        assert!(!item.is_video);
        assert!(!item.is_favorited);
        assert_eq!(item.source_url, "#");
        assert!(!item.has_source_link());
        assert_eq!(item.tags.iter().collect::<Vec<_>>(), vec!["fog", "landscape"]);
    }
}
