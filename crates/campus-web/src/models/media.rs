//! Media references and placeholder resolution.

use serde::{Deserialize, Serialize};

/// Image or video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    #[default]
    #[serde(other)]
    Image,
}

/// Resolution variants the asset host produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSize {
    Small,
    Medium,
    Large,
    Original,
}

/// A set of URLs for one asset at different resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMedia")]
pub struct MediaRef {
    /// Image or video.
    pub kind: MediaKind,

    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

/// The API sometimes sends a bare URL string instead of the full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMedia {
    Url(String),
    Full {
        #[serde(default, alias = "type")]
        kind: MediaKind,
        #[serde(default)]
        small: Option<String>,
        #[serde(default)]
        medium: Option<String>,
        #[serde(default)]
        large: Option<String>,
        #[serde(default, alias = "url")]
        original: Option<String>,
    },
}

impl From<RawMedia> for MediaRef {
    fn from(raw: RawMedia) -> Self {
        match raw {
            RawMedia::Url(url) => Self { original: Some(url), ..Self::default() },
            RawMedia::Full { kind, small, medium, large, original } => {
                Self { kind, small, medium, large, original }
            }
        }
    }
}

/// The `src` a template should emit for a media slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    /// URL to load.
    pub src: String,

    /// Image or video.
    pub kind: MediaKind,

    /// True when `src` is already the placeholder asset.
    pub is_placeholder: bool,
}

impl ResolvedMedia {
    /// Resolution result for a slot with no usable asset.
    #[must_use]
    pub fn placeholder(placeholder: &str) -> Self {
        Self { src: placeholder.to_string(), kind: MediaKind::Image, is_placeholder: true }
    }
}

impl MediaRef {
    /// Image reference with only an original URL.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self { original: Some(url.into()), ..Self::default() }
    }

    fn slot(&self, size: MediaSize) -> Option<&str> {
        match size {
            MediaSize::Small => self.small.as_deref(),
            MediaSize::Medium => self.medium.as_deref(),
            MediaSize::Large => self.large.as_deref(),
            MediaSize::Original => self.original.as_deref(),
        }
    }

    /// Best URL for the requested size.
    ///
    /// Falls back to larger variants first, then smaller ones, skipping
    /// anything that is not a loadable URL.
    #[must_use]
    pub fn url(&self, size: MediaSize) -> Option<&str> {
        use MediaSize::{Large, Medium, Original, Small};
        let order: &[MediaSize] = match size {
            Small => &[Small, Medium, Large, Original],
            Medium => &[Medium, Large, Original, Small],
            Large => &[Large, Original, Medium, Small],
            Original => &[Original, Large, Medium, Small],
        };
        order.iter().filter_map(|s| self.slot(*s)).find(|url| is_loadable(url))
    }

    /// Resolve to a concrete `src`, substituting the placeholder when no
    /// variant is usable.
    #[must_use]
    pub fn resolve(&self, size: MediaSize, placeholder: &str) -> ResolvedMedia {
        match self.url(size) {
            Some(url) => ResolvedMedia { src: url.to_string(), kind: self.kind, is_placeholder: false },
            None => ResolvedMedia::placeholder(placeholder),
        }
    }
}

/// Absolute http(s) URLs and root-relative paths are loadable; anything
/// else (blank, `javascript:`, protocol-relative, garbage) is not.
fn is_loadable(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return false;
    }
    if candidate.starts_with('/') {
        return !candidate.starts_with("//");
    }
    url::Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "/static/placeholder.svg";

    #[test]
    fn test_bare_string_becomes_original() {
        let media: MediaRef = serde_json::from_str("\"https://cdn.example.edu/a.jpg\"").unwrap();
        assert_eq!(media.original.as_deref(), Some("https://cdn.example.edu/a.jpg"));
        assert_eq!(media.kind, MediaKind::Image);
    }

    #[test]
    fn test_full_object_with_type_alias() {
        let media: MediaRef = serde_json::from_value(serde_json::json!({
            "type": "video",
            "url": "https://cdn.example.edu/v.mp4"
        }))
        .unwrap();
        assert_eq!(media.kind, MediaKind::Video);
        assert_eq!(media.url(MediaSize::Small), Some("https://cdn.example.edu/v.mp4"));
    }

    #[test]
    fn test_unknown_kind_is_image() {
        let media: MediaRef =
            serde_json::from_value(serde_json::json!({"kind": "gif", "small": "/a.gif"})).unwrap();
        assert_eq!(media.kind, MediaKind::Image);
    }

    #[test]
    fn test_kind_decodes_known_and_unknown_values() {
        let video: MediaKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(video, MediaKind::Video);
        let image: MediaKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(image, MediaKind::Image);
        let other: MediaKind = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(other, MediaKind::Image);
    }

    #[test]
    fn test_size_fallback_prefers_larger() {
        let media = MediaRef {
            small: Some("/s.jpg".into()),
            large: Some("/l.jpg".into()),
            ..MediaRef::default()
        };
        assert_eq!(media.url(MediaSize::Medium), Some("/l.jpg"));
        assert_eq!(media.url(MediaSize::Small), Some("/s.jpg"));
    }

    #[test]
    fn test_unloadable_urls_resolve_to_placeholder() {
        for bad in ["", "   ", "javascript:alert(1)", "//evil.example", "not a url"] {
            let media = MediaRef::image(bad);
            let resolved = media.resolve(MediaSize::Medium, PLACEHOLDER);
            assert!(resolved.is_placeholder, "{bad:?} should fall back");
            assert_eq!(resolved.src, PLACEHOLDER);
        }
    }

    #[test]
    fn test_missing_media_resolves_to_placeholder() {
        let resolved = MediaRef::default().resolve(MediaSize::Large, PLACEHOLDER);
        assert_eq!(resolved, ResolvedMedia::placeholder(PLACEHOLDER));
    }
}
