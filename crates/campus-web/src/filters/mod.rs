//! Filter state for list pages.
//!
//! The query string is the single source of truth: [`FilterState`] is always
//! derived by parsing the current URL (see [`QueryState`]) and every
//! interaction produces a new URL rather than mutating stored state.

mod query;

pub use query::{FilterPatch, History, Navigation, QueryState, Scroll};

use chrono::NaiveDate;

/// Date format used for `from`/`to` in URLs and API requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameter recognized by list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Search,
    CategorySlug,
    Tag,
    From,
    To,
    Type,
    Page,
}

impl FilterKey {
    /// Every key, in canonical encoding order.
    pub const ALL: &'static [Self] =
        &[Self::Search, Self::CategorySlug, Self::Tag, Self::From, Self::To, Self::Type, Self::Page];

    /// Query parameter name (shared by page URLs and API requests).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::CategorySlug => "category_slug",
            Self::Tag => "tag",
            Self::From => "from",
            Self::To => "to",
            Self::Type => "type",
            Self::Page => "page",
        }
    }

    /// Key for a query parameter name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

/// The filter keys a page manages. `page` is always managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSchema {
    keys: &'static [FilterKey],
}

impl FilterSchema {
    /// Schema managing the given keys (listed in canonical order).
    #[must_use]
    pub const fn new(keys: &'static [FilterKey]) -> Self {
        Self { keys }
    }

    /// Schema with only pagination.
    #[must_use]
    pub const fn pagination_only() -> Self {
        Self { keys: &[] }
    }

    /// Whether `key` belongs to this page's filter state.
    #[must_use]
    pub fn manages(&self, key: FilterKey) -> bool {
        key == FilterKey::Page || self.keys.contains(&key)
    }

    /// Managed filter keys, excluding `page`.
    #[must_use]
    pub fn keys(&self) -> &'static [FilterKey] {
        self.keys
    }
}

/// Current filter and pagination values of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search.
    pub search: Option<String>,
    /// Category filter.
    pub category_slug: Option<String>,
    /// Tag filter.
    pub tag: Option<String>,
    /// Start of the date range (inclusive).
    pub from: Option<NaiveDate>,
    /// End of the date range (inclusive).
    pub to: Option<NaiveDate>,
    /// Tab discriminator on multi-tab pages.
    pub kind: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self { search: None, category_slug: None, tag: None, from: None, to: None, kind: None, page: 1 }
    }
}

impl FilterState {
    /// Encoded value of a key, or `None` when unset (page 1 counts as unset).
    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Search => self.search.clone(),
            FilterKey::CategorySlug => self.category_slug.clone(),
            FilterKey::Tag => self.tag.clone(),
            FilterKey::From => self.from.map(|d| d.format(DATE_FORMAT).to_string()),
            FilterKey::To => self.to.map(|d| d.format(DATE_FORMAT).to_string()),
            FilterKey::Type => self.kind.clone(),
            FilterKey::Page => (self.page > 1).then(|| self.page.to_string()),
        }
    }

    /// Set a key from a raw query value.
    ///
    /// Blank values clear the key; an unparseable date clears the key; an
    /// unparseable or zero page becomes 1.
    pub fn set(&mut self, key: FilterKey, raw: Option<&str>) {
        let value = raw.map(str::trim).filter(|v| !v.is_empty());
        match key {
            FilterKey::Search => self.search = value.map(str::to_string),
            FilterKey::CategorySlug => self.category_slug = value.map(str::to_string),
            FilterKey::Tag => self.tag = value.map(str::to_string),
            FilterKey::From => self.from = value.and_then(parse_date),
            FilterKey::To => self.to = value.and_then(parse_date),
            FilterKey::Type => self.kind = value.map(str::to_string),
            FilterKey::Page => {
                self.page = value.and_then(|v| v.parse().ok()).filter(|p| *p > 0).unwrap_or(1);
            }
        }
    }

    /// Canonical `(key, value)` pairs for the managed keys, in schema order
    /// followed by `page` (omitted when 1).
    #[must_use]
    pub fn to_pairs(&self, schema: FilterSchema) -> Vec<(&'static str, String)> {
        schema
            .keys()
            .iter()
            .copied()
            .filter(|k| *k != FilterKey::Page)
            .chain(std::iter::once(FilterKey::Page))
            .filter_map(|k| self.get(k).map(|v| (k.as_str(), v)))
            .collect()
    }

    /// Query parameters for the content API: `page`, `limit`, then every
    /// set managed filter.
    #[must_use]
    pub fn api_params(&self, schema: FilterSchema, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut params = vec![
            (FilterKey::Page.as_str().to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        for key in schema.keys().iter().copied().filter(|k| *k != FilterKey::Page) {
            if let Some(value) = self.get(key) {
                params.push((key.as_str().to_string(), value));
            }
        }
        params
    }

    /// Same filter configuration, ignoring the page number.
    #[must_use]
    pub fn same_filters(&self, other: &Self) -> bool {
        Self { page: 1, ..self.clone() } == Self { page: 1, ..other.clone() }
    }

    /// Whether any filter other than page is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.same_filters(&Self::default())
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
