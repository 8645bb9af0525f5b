//! Paginated filtered resource.
//!
//! One generic implementation of "fetch a list endpoint under the filters in
//! the URL and accumulate pages", reused by every list page. A resource is
//! parameterized by its endpoint and [`FilterSchema`]; the item type decides
//! how responses are decoded and deduplicated.

use std::ops::Range;

use futures::future::join_all;
use serde::de::DeserializeOwned;

use crate::accumulator::{Accumulator, Identified};
use crate::client::{self, ApiRequest, ContentSource, RequestToken};
use crate::error::{ClientError, ClientResult};
use crate::filters::{FilterSchema, FilterState};
use crate::locale::Locale;
use crate::models::{ListResponse, Validate};

/// Kind of fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// First page(s) of a new filter configuration.
    Initial,
    /// Further pages appended to an existing list.
    More,
}

/// One page request planned by [`PaginatedResource::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetch {
    /// Filter generation the fetch belongs to.
    pub token: RequestToken,
    /// Page number.
    pub page: u32,
    /// API request for the page.
    pub request: ApiRequest,
}

/// A list endpoint, its filter configuration and the pages loaded so far.
#[derive(Debug)]
pub struct PaginatedResource<T: Identified> {
    endpoint: String,
    schema: FilterSchema,
    limit: u32,
    max_page: u32,
    filters: Option<FilterState>,
    accumulator: Accumulator<T>,
    generation: u64,
    loading: Option<Loading>,
    error: Option<ClientError>,
}

impl<T: Identified> PaginatedResource<T> {
    /// Resource for `endpoint` under `schema`, `limit` items per page.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, schema: FilterSchema, limit: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            schema,
            limit: limit.max(1),
            max_page: u32::MAX,
            filters: None,
            accumulator: Accumulator::new(),
            generation: 0,
            loading: None,
            error: None,
        }
    }

    /// Cap the page number a URL may request.
    #[must_use]
    pub fn with_max_page(mut self, max_page: u32) -> Self {
        self.max_page = max_page.max(1);
        self
    }

    /// Plan the fetches needed to show `filters`.
    ///
    /// A different filter configuration resets the list and fetches pages
    /// `1..=page`. The same configuration fetches only the pages not merged
    /// yet, which is empty when the page was already shown.
    pub fn plan(&mut self, filters: &FilterState) -> Vec<PageFetch> {
        let target = filters.page.clamp(1, self.max_page);
        let fresh = !self.filters.as_ref().is_some_and(|current| current.same_filters(filters));

        if fresh {
            self.accumulator.reset();
            self.filters = Some(FilterState { page: 1, ..filters.clone() });
        }
        self.error = None;

        let first = self.accumulator.pages() + 1;
        if first > target {
            self.loading = None;
            return Vec::new();
        }

        self.generation += 1;
        let token = RequestToken::new(self.generation);
        self.loading = Some(if first == 1 { Loading::Initial } else { Loading::More });
        (first..=target)
            .map(|page| PageFetch { token, page, request: self.request_for(page) })
            .collect()
    }

    fn request_for(&self, page: u32) -> ApiRequest {
        let filters = self.filters.clone().unwrap_or_default();
        ApiRequest::new(self.endpoint.clone(), filters.api_params(self.schema, page, self.limit))
    }

    /// Merge the result of a planned fetch.
    ///
    /// Results must arrive in page order. Returns the range of appended
    /// items, or `None` when the result was discarded (stale generation,
    /// out of order) or was an error.
    pub fn resolve(
        &mut self,
        fetch: &PageFetch,
        result: ClientResult<ListResponse<T>>,
    ) -> Option<Range<usize>> {
        if fetch.token != RequestToken::new(self.generation) {
            tracing::debug!(endpoint = %self.endpoint, page = fetch.page, "discarding stale page");
            return None;
        }
        if fetch.page != self.accumulator.pages() + 1 {
            tracing::debug!(endpoint = %self.endpoint, page = fetch.page, "discarding out-of-order page");
            return None;
        }

        match result {
            Ok(response) => {
                let appended = self.accumulator.apply(fetch.page, response);
                if let Some(filters) = &mut self.filters {
                    filters.page = fetch.page;
                }
                if !self.has_more() {
                    self.loading = None;
                }
                Some(appended)
            }
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, page = fetch.page, error = %err, "page fetch failed");
                if fetch.page == 1 {
                    self.accumulator.reset();
                }
                self.error = Some(err);
                self.loading = None;
                None
            }
        }
    }

    /// Mark the planned fetches as finished.
    pub fn settle(&mut self) {
        self.loading = None;
    }

    /// Filters the accumulated list belongs to, with the last merged page.
    #[must_use]
    pub fn filters(&self) -> Option<&FilterState> {
        self.filters.as_ref()
    }

    /// Endpoint path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.accumulator.items()
    }

    /// Server-reported total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.accumulator.total()
    }

    /// Whether a "load more" affordance applies. False once the page cap
    /// is reached, since a further page would never be fetched.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.accumulator.has_more() && self.accumulator.pages() < self.max_page
    }

    /// Last page the list can reach: the server's page count, capped.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let pages = self.accumulator.total().div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX).clamp(1, self.max_page)
    }

    /// Pages merged so far.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.accumulator.pages()
    }

    /// Fetch in flight, if any.
    #[must_use]
    pub const fn loading(&self) -> Option<Loading> {
        self.loading
    }

    /// Error of the last fetch.
    #[must_use]
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }
}

impl<T> PaginatedResource<T>
where
    T: Identified + DeserializeOwned + Validate,
{
    /// Bring the list up to `filters`, fetching the missing pages
    /// concurrently and merging them in page order.
    ///
    /// Returns the range of items appended by this call.
    pub async fn load<S>(&mut self, source: &S, filters: &FilterState, locale: Locale) -> Range<usize>
    where
        S: ContentSource + ?Sized,
    {
        let fetches = self.plan(filters);
        let start = self.accumulator.len();
        if fetches.is_empty() {
            return start..start;
        }

        let results = join_all(
            fetches
                .iter()
                .map(|fetch| client::fetch::<ListResponse<T>, S>(source, &fetch.request, locale)),
        )
        .await;

        for (fetch, result) in fetches.iter().zip(results) {
            let failed = result.is_err();
            self.resolve(fetch, result);
            if failed {
                break;
            }
        }
        self.settle();

        start..self.accumulator.len()
    }
}
