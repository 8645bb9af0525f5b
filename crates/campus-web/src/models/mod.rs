//! Data models for content API entities.
//!
//! Every model is a read-only view model. Optional fields use `#[serde(default)]`
//! and each type implements [`Validate`] so responses are checked at the boundary
//! instead of being trusted as declared.

mod content;
mod list;
mod media;
mod people;
mod unit;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

pub use content::{ContentItem, Tag};
pub use list::ListResponse;
pub use media::{MediaKind, MediaRef, MediaSize, ResolvedMedia};
pub use people::StaffProfile;
pub use unit::{AcademicUnit, UnitKind};

use crate::error::SchemaError;

/// Boundary validation for decoded API responses.
pub trait Validate {
    /// Check invariants the templates rely on.
    fn validate(&self) -> Result<(), SchemaError>;
}

/// Identifier of a content entity.
///
/// The API emits ids as numbers for some content types and strings for
/// others; both normalize to the same text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from its text form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Text form of the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text.trim().to_string()),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s/?#]+$").expect("valid slug pattern"));

/// Reject blank required text.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::EmptyField { field });
    }
    Ok(())
}

/// Slugs end up in URL paths, so they may not contain whitespace or delimiters.
pub(crate) fn check_slug(slug: &str) -> Result<(), SchemaError> {
    require("slug", slug)?;
    if !SLUG.is_match(slug) {
        return Err(SchemaError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_from_number_or_string() {
        let from_number: ItemId = serde_json::from_str("42").unwrap();
        let from_string: ItemId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn test_item_id_rejects_objects() {
        assert!(serde_json::from_str::<ItemId>("{\"id\": 1}").is_err());
    }

    #[test]
    fn test_check_slug() {
        assert!(check_slug("annual-report-2024").is_ok());
        assert!(check_slug("کۆلێژی-ئەندازیاری").is_ok());
        assert_eq!(check_slug(""), Err(SchemaError::EmptyField { field: "slug" }));
        assert!(matches!(check_slug("a b"), Err(SchemaError::InvalidSlug(_))));
        assert!(matches!(check_slug("a/b"), Err(SchemaError::InvalidSlug(_))));
    }
}
