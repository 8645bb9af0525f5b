//! URL-synchronized filter controller.
//!
//! A [`QueryState`] wraps the current page URL. Filter values are re-derived
//! from it on every call, and every interaction returns a [`Navigation`] to a
//! new canonical URL instead of mutating anything in place.

use url::form_urlencoded;

use super::{FilterKey, FilterSchema, FilterState};

/// How the browser history should record a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum History {
    /// New history entry (numbered pagination).
    Push,
    /// Replace the current entry (filter changes, load more).
    Replace,
}

impl History {
    /// Attribute value understood by the page script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Replace => "replace",
        }
    }
}

/// What happens to the scroll position after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Top,
    Preserve,
}

impl Scroll {
    /// Attribute value understood by the page script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Preserve => "preserve",
        }
    }
}

/// Target of a filter interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Canonical path plus query.
    pub href: String,
    /// History mode.
    pub history: History,
    /// Scroll behaviour.
    pub scroll: Scroll,
}

impl Navigation {
    /// Query string of the target, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        self.href.split_once('?').map_or("", |(_, q)| q)
    }

    /// Same query under a different path.
    #[must_use]
    pub fn with_path(&self, path: &str) -> String {
        match self.query() {
            "" => path.to_string(),
            query => format!("{path}?{query}"),
        }
    }
}

/// A set of filter changes from one interaction.
///
/// `Some` values that are blank after trimming count as removals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    entries: Vec<(FilterKey, Option<String>)>,
}

impl FilterPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    #[must_use]
    pub fn set(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.entries.push((key, Some(value.into())));
        self
    }

    /// Remove `key`.
    #[must_use]
    pub fn remove(mut self, key: FilterKey) -> Self {
        self.entries.push((key, None));
        self
    }

    /// Patch from submitted form fields; fields the schema does not manage
    /// are ignored.
    #[must_use]
    pub fn from_form<'a>(
        schema: FilterSchema,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let entries = fields
            .into_iter()
            .filter_map(|(name, value)| {
                FilterKey::parse(name)
                    .filter(|key| *key != FilterKey::Page && schema.manages(*key))
                    .map(|key| (key, Some(value.to_string())))
            })
            .collect();
        Self { entries }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_deref()))
    }
}

/// The current URL of a list page, interpreted through its filter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    path: String,
    pairs: Vec<(String, String)>,
    schema: FilterSchema,
}

impl QueryState {
    /// Parse `path?query`.
    #[must_use]
    pub fn parse(path_and_query: &str, schema: FilterSchema) -> Self {
        let (path, query) = path_and_query.split_once('?').unwrap_or((path_and_query, ""));
        Self::new(path, Some(query), schema)
    }

    /// Build from a path and an optional raw query string.
    #[must_use]
    pub fn new(path: &str, query: Option<&str>, schema: FilterSchema) -> Self {
        let pairs = form_urlencoded::parse(query.unwrap_or("").as_bytes()).into_owned().collect();
        Self { path: path.to_string(), pairs, schema }
    }

    /// Page path without the query.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Filter schema of the page.
    #[must_use]
    pub const fn schema(&self) -> FilterSchema {
        self.schema
    }

    /// Derive the filter state from the URL. When a key repeats, the last
    /// occurrence wins.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        let mut state = FilterState::default();
        for (name, value) in &self.pairs {
            if let Some(key) = self.managed_key(name) {
                state.set(key, Some(value));
            }
        }
        state
    }

    /// Query pairs this page does not manage, in original order.
    pub fn unmanaged(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter(|(name, _)| self.managed_key(name).is_none())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn managed_key(&self, name: &str) -> Option<FilterKey> {
        FilterKey::parse(name).filter(|key| self.schema.manages(*key))
    }

    /// Canonical href for `state` on this page, keeping unmanaged parameters.
    #[must_use]
    pub fn href_for(&self, state: &FilterState) -> String {
        let managed = state.to_pairs(self.schema);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &managed {
            serializer.append_pair(name, value);
        }
        let mut has_pairs = !managed.is_empty();
        for (name, value) in self.unmanaged() {
            serializer.append_pair(name, value);
            has_pairs = true;
        }

        if has_pairs {
            format!("{}?{}", self.path, serializer.finish())
        } else {
            self.path.clone()
        }
    }

    /// Canonical form of the current URL.
    #[must_use]
    pub fn href(&self) -> String {
        self.href_for(&self.filters())
    }

    /// Apply a filter patch. Truthy values are set, everything else is
    /// removed, and the page always resets to 1.
    #[must_use]
    pub fn update_params(&self, patch: &FilterPatch) -> Navigation {
        let mut state = self.filters();
        for (key, value) in patch.iter() {
            if key != FilterKey::Page {
                state.set(key, value);
            }
        }
        state.page = 1;
        self.navigate(&state, History::Replace, Scroll::Top)
    }

    /// Advance to the next page, keeping every filter and the scroll position.
    #[must_use]
    pub fn load_more(&self) -> Navigation {
        let mut state = self.filters();
        state.page = state.page.saturating_add(1);
        self.navigate(&state, History::Replace, Scroll::Preserve)
    }

    /// Jump to a numbered page, keeping every filter.
    #[must_use]
    pub fn go_to_page(&self, page: u32) -> Navigation {
        let mut state = self.filters();
        state.page = page.max(1);
        self.navigate(&state, History::Push, Scroll::Top)
    }

    /// Drop every managed parameter.
    #[must_use]
    pub fn clear(&self) -> Navigation {
        self.navigate(&FilterState::default(), History::Replace, Scroll::Top)
    }

    fn navigate(&self, state: &FilterState, history: History, scroll: Scroll) -> Navigation {
        Navigation { href: self.href_for(state), history, scroll }
    }
}
