//! Content item model shared by news, events, research, alumni, internships
//! and decisions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ItemId, MediaKind, MediaRef, Validate, check_slug, require};
use crate::error::SchemaError;

/// A tag or category association.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Slug used as the filter value.
    pub slug: String,

    /// Display name in the requested locale.
    #[serde(default, alias = "title")]
    pub name: String,
}

impl Tag {
    /// Display name, falling back to the slug.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() { &self.slug } else { &self.name }
    }
}

impl Validate for Tag {
    fn validate(&self) -> Result<(), SchemaError> {
        check_slug(&self.slug)
    }
}

/// A news article, event, research paper or similar listing entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier.
    pub id: ItemId,

    /// URL slug for the detail page.
    #[serde(default)]
    pub slug: String,

    /// Title in the requested locale.
    #[serde(default)]
    pub title: String,

    /// Short descriptive text.
    #[serde(default, alias = "excerpt", alias = "summary")]
    pub description: Option<String>,

    /// Full body, only present on detail responses.
    #[serde(default, alias = "content")]
    pub body: Option<String>,

    /// Associated images and videos.
    #[serde(default, alias = "images")]
    pub media: Vec<MediaRef>,

    /// Author or issuing office.
    #[serde(default)]
    pub author: Option<String>,

    /// Publication date in ISO format.
    #[serde(default, alias = "date", alias = "created_at")]
    pub published_at: Option<String>,

    /// Tag associations.
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Primary category.
    #[serde(default)]
    pub category: Option<Tag>,
}

impl ContentItem {
    /// Publication date, if the API sent a parseable one.
    ///
    /// Accepts plain dates and full timestamps (only the date part is read).
    #[must_use]
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.as_deref()?.trim();
        NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
    }

    /// First image, used as the card cover.
    #[must_use]
    pub fn cover(&self) -> Option<&MediaRef> {
        self.media.iter().find(|m| m.kind == MediaKind::Image)
    }
}

impl Validate for ContentItem {
    fn validate(&self) -> Result<(), SchemaError> {
        require("id", self.id.as_str())?;
        check_slug(&self.slug)?;
        require("title", &self.title)?;
        for tag in self.tags.iter().chain(self.category.iter()) {
            tag.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news_json() -> serde_json::Value {
        serde_json::json!({
            "id": 17,
            "slug": "open-day-2025",
            "title": "Open Day 2025",
            "excerpt": "Visit the campus",
            "images": ["https://cdn.example.edu/open-day.jpg"],
            "date": "2025-03-01T09:00:00Z",
            "tags": [{"slug": "admissions", "name": "Admissions"}],
            "category": {"slug": "events", "title": "Events"}
        })
    }

    #[test]
    fn test_decodes_aliases() {
        let item: ContentItem = serde_json::from_value(news_json()).unwrap();
        assert_eq!(item.id.as_str(), "17");
        assert_eq!(item.description.as_deref(), Some("Visit the campus"));
        assert_eq!(item.media.len(), 1);
        assert_eq!(item.category.as_ref().map(Tag::label), Some("Events"));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_published_date() {
        let item: ContentItem = serde_json::from_value(news_json()).unwrap();
        assert_eq!(item.published_date(), NaiveDate::from_ymd_opt(2025, 3, 1));

        let undated = ContentItem { published_at: Some("soon".into()), ..ContentItem::default() };
        assert_eq!(undated.published_date(), None);
    }

    #[test]
    fn test_cover_skips_videos() {
        let item = ContentItem {
            media: vec![
                MediaRef { kind: MediaKind::Video, ..MediaRef::image("/v.mp4") },
                MediaRef::image("/cover.jpg"),
            ],
            ..ContentItem::default()
        };
        assert_eq!(item.cover().and_then(|m| m.original.as_deref()), Some("/cover.jpg"));
    }

    #[test]
    fn test_validate_rejects_bad_tag_slug() {
        let mut item: ContentItem = serde_json::from_value(news_json()).unwrap();
        item.tags.push(Tag { slug: "has space".into(), name: "x".into() });
        assert!(matches!(item.validate(), Err(SchemaError::InvalidSlug(_))));
    }

    #[test]
    fn test_tag_label_falls_back_to_slug() {
        let tag = Tag { slug: "physics".into(), name: String::new() };
        assert_eq!(tag.label(), "physics");
    }
}
