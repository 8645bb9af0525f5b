//! Request state for one remote resource: `{data, loading, error, refetch}`.
//!
//! Every issued request gets a [`RequestToken`]. Only the response carrying the
//! latest token is accepted, so a slow response for an old URL can never
//! overwrite the result of a newer one.

use serde::de::DeserializeOwned;

use super::{ContentSource, fetch};
use crate::error::ClientError;
use crate::locale::Locale;
use crate::models::Validate;

/// A content API request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiRequest {
    /// Path below the API base, e.g. `news` or `news/open-day`.
    pub path: String,
    /// Query parameters in order.
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Request for `path` with `params`.
    #[must_use]
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self { path: path.into(), params }
    }

    /// Request for a single entity below a list endpoint.
    #[must_use]
    pub fn detail(endpoint: &str, slug: &str) -> Self {
        Self::new(format!("{}/{slug}", endpoint.trim_end_matches('/')), Vec::new())
    }

    /// The empty request, meaning "nothing to fetch yet".
    #[must_use]
    pub fn none() -> Self {
        Self::new(String::new(), Vec::new())
    }

    /// Whether there is nothing to fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.trim().is_empty()
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        let mut sep = '?';
        for (k, v) in &self.params {
            write!(f, "{sep}{k}={v}")?;
            sep = '&';
        }
        Ok(())
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) const fn new(generation: u64) -> Self {
        Self(generation)
    }
}

/// Where a remote resource stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    /// No request has been made (empty URL).
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Ready,
    /// The latest request failed.
    Failed,
}

/// Loading state of a single remote value.
#[derive(Debug)]
pub struct RemoteData<T> {
    current: Option<(ApiRequest, Locale)>,
    data: Option<T>,
    error: Option<ClientError>,
    loading: bool,
    generation: u64,
    attached: bool,
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self { current: None, data: None, error: None, loading: false, generation: 0, attached: true }
    }
}

impl<T> RemoteData<T> {
    /// Idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the resource at `request`.
    ///
    /// Returns a token when a fetch must be issued: the request or locale
    /// changed. An empty request cancels interest in any in-flight response
    /// and issues nothing.
    pub fn request(&mut self, request: ApiRequest, locale: Locale) -> Option<RequestToken> {
        if request.is_empty() {
            self.current = None;
            self.loading = false;
            self.generation += 1;
            return None;
        }
        if self.current.as_ref() == Some(&(request.clone(), locale)) {
            return None;
        }
        self.current = Some((request, locale));
        Some(self.begin())
    }

    /// Re-issue the most recent request.
    pub fn refetch(&mut self) -> Option<RequestToken> {
        self.current.is_some().then(|| self.begin())
    }

    fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.loading = true;
        RequestToken::new(self.generation)
    }

    /// Accept a response. Returns `false` (and changes nothing) when the
    /// token is stale or the resource was detached.
    pub fn resolve(&mut self, token: RequestToken, result: Result<T, ClientError>) -> bool {
        if !self.attached || token.0 != self.generation {
            tracing::debug!(token = token.0, latest = self.generation, "discarding stale response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "content request failed");
                self.error = Some(err);
            }
        }
        true
    }

    /// Stop accepting responses (the owning view went away).
    pub fn detach(&mut self) {
        self.attached = false;
        self.loading = false;
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RemoteStatus {
        if self.loading {
            RemoteStatus::Loading
        } else if self.error.is_some() {
            RemoteStatus::Failed
        } else if self.data.is_some() {
            RemoteStatus::Ready
        } else {
            RemoteStatus::Idle
        }
    }

    /// Latest successful value. Kept when a later request fails.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error of the latest request, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }
}

impl<T: DeserializeOwned + Validate> RemoteData<T> {
    /// Point at `request` and, if that issues a fetch, perform it.
    pub async fn load<S>(&mut self, source: &S, request: ApiRequest, locale: Locale) -> RemoteStatus
    where
        S: ContentSource + ?Sized,
    {
        if let Some(token) = self.request(request, locale) {
            self.run(source, token).await;
        }
        self.status()
    }

    /// Re-issue and perform the most recent request.
    pub async fn reload<S>(&mut self, source: &S) -> RemoteStatus
    where
        S: ContentSource + ?Sized,
    {
        if let Some(token) = self.refetch() {
            self.run(source, token).await;
        }
        self.status()
    }

    async fn run<S>(&mut self, source: &S, token: RequestToken)
    where
        S: ContentSource + ?Sized,
    {
        let Some((request, locale)) = self.current.clone() else {
            return;
        };
        let result = fetch(source, &request, locale).await;
        self.resolve(token, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(page: u32) -> ApiRequest {
        ApiRequest::new("news", vec![("page".into(), page.to_string())])
    }

    #[test]
    fn test_empty_request_stays_idle() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        assert_eq!(remote.request(ApiRequest::none(), Locale::En), None);
        assert_eq!(remote.status(), RemoteStatus::Idle);
    }

    #[test]
    fn test_unchanged_request_does_not_refetch() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        let token = remote.request(news(1), Locale::En).unwrap();
        assert!(remote.resolve(token, Ok(1)));
        assert_eq!(remote.request(news(1), Locale::En), None);
        assert!(remote.request(news(1), Locale::Ar).is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut remote: RemoteData<&str> = RemoteData::new();
        let slow = remote.request(news(1), Locale::En).unwrap();
        let fast = remote.request(news(2), Locale::En).unwrap();

        assert!(remote.resolve(fast, Ok("page two")));
        assert!(!remote.resolve(slow, Ok("page one")));
        assert_eq!(remote.data(), Some(&"page two"));
        assert_eq!(remote.status(), RemoteStatus::Ready);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        let token = remote.request(news(1), Locale::En).unwrap();
        remote.resolve(token, Ok(7));

        let token = remote.refetch().unwrap();
        assert_eq!(remote.status(), RemoteStatus::Loading);
        remote.resolve(token, Err(ClientError::server(500, "down")));

        assert_eq!(remote.status(), RemoteStatus::Failed);
        assert_eq!(remote.data(), Some(&7));
        assert!(remote.error().is_some());
    }

    #[test]
    fn test_detached_resource_ignores_responses() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        let token = remote.request(news(1), Locale::En).unwrap();
        remote.detach();
        assert!(!remote.resolve(token, Ok(1)));
        assert_eq!(remote.data(), None);
    }

    #[test]
    fn test_clearing_request_invalidates_in_flight() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        let token = remote.request(news(1), Locale::En).unwrap();
        remote.request(ApiRequest::none(), Locale::En);
        assert!(!remote.resolve(token, Ok(1)));
    }

    #[test]
    fn test_refetch_without_request() {
        let mut remote: RemoteData<u32> = RemoteData::new();
        assert_eq!(remote.refetch(), None);
    }

    #[test]
    fn test_request_display() {
        assert_eq!(news(2).to_string(), "news?page=2");
        assert_eq!(ApiRequest::detail("news/", "open-day").to_string(), "news/open-day");
    }
}
