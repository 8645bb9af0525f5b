//! HTML and JSON output for the site.
//!
//! Templates are pure functions of already-loaded state: they pick one of the
//! [`ViewState`]s and render it. Nothing here performs I/O.

pub mod cards;
pub mod html;
pub mod json;
pub mod media;

pub use cards::Card;

use crate::accumulator::Identified;
use crate::client::{RemoteData, RemoteStatus};
use crate::locale::Locale;
use crate::pages::Section;
use crate::resource::{Loading, PaginatedResource};

/// What a list or detail slot should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Initial load of a filter configuration is in flight.
    Skeleton,
    /// The load failed and nothing can be shown.
    Failed,
    /// The load succeeded with zero results.
    Empty,
    /// Items to show.
    Content {
        /// More items exist on the server.
        has_more: bool,
        /// A "load more" fetch is in flight.
        loading_more: bool,
    },
}

impl ViewState {
    /// State of a paginated list.
    #[must_use]
    pub fn of_resource<T: Identified>(resource: &PaginatedResource<T>) -> Self {
        if resource.items().is_empty() {
            return match (resource.loading(), resource.error()) {
                (Some(_), _) => Self::Skeleton,
                (None, Some(_)) => Self::Failed,
                (None, None) if resource.filters().is_none() => Self::Skeleton,
                (None, None) => Self::Empty,
            };
        }
        Self::Content {
            has_more: resource.has_more(),
            loading_more: resource.loading() == Some(Loading::More),
        }
    }

    /// State of a single remote value. `is_empty` decides whether loaded
    /// data counts as an empty result.
    #[must_use]
    pub fn of_remote<T>(remote: &RemoteData<T>, is_empty: impl Fn(&T) -> bool) -> Self {
        match (remote.status(), remote.data()) {
            (RemoteStatus::Failed, None) => Self::Failed,
            (RemoteStatus::Idle | RemoteStatus::Loading, None) => Self::Skeleton,
            (_, Some(data)) if is_empty(data) => Self::Empty,
            (status, Some(_)) => Self::Content {
                has_more: false,
                loading_more: status == RemoteStatus::Loading,
            },
            (RemoteStatus::Ready, None) => Self::Empty,
        }
    }
}

/// Shared inputs of every template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Page locale.
    pub locale: Locale,
    /// Section the rendered entries belong to.
    pub section: Section,
    /// Placeholder asset for missing or broken media.
    pub placeholder: &'a str,
}

/// Escape HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
