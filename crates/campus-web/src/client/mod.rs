//! Content API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Locale header on every request
//! - Optional retry middleware with exponential backoff
//! - Response caching with a short TTL
//! - Boundary validation of decoded responses

mod remote;

pub use remote::{ApiRequest, RemoteData, RemoteStatus, RequestToken};

use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::locale::Locale;
use crate::models::Validate;

/// Source of raw content API responses.
///
/// Implemented by [`ContentClient`]; tests substitute in-memory sources.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// GET `request` in `locale` and return the JSON body.
    async fn get_json(&self, request: &ApiRequest, locale: Locale) -> ClientResult<serde_json::Value>;
}

/// Fetch, decode and validate one response.
///
/// Detail endpoints may wrap their object in `{"data": {...}}`; the wrapper
/// is removed before decoding.
pub async fn fetch<T, S>(source: &S, request: &ApiRequest, locale: Locale) -> ClientResult<T>
where
    T: DeserializeOwned + Validate,
    S: ContentSource + ?Sized,
{
    let value = source.get_json(request, locale).await?;
    decode(&request.path, unwrap_envelope(value))
}

/// Decode a JSON value and validate it at the boundary.
pub fn decode<T>(endpoint: &str, value: serde_json::Value) -> ClientResult<T>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T = serde_json::from_value(value)?;
    decoded.validate().map_err(|err| {
        tracing::warn!(endpoint, error = %err, "content API response failed validation");
        ClientError::schema(endpoint, err)
    })?;
    Ok(decoded)
}

fn unwrap_envelope(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map)
            if map.get("data").is_some_and(serde_json::Value::is_object) && !map.contains_key("total") =>
        {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Content API client.
#[derive(Clone)]
pub struct ContentClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache, absent when caching is disabled.
    cache: Option<Cache<String, serde_json::Value>>,

    /// API base URL.
    base_url: Url,

    /// Header carrying the locale.
    locale_header: HeaderName,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,
}

impl ContentClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL or locale header name is invalid, or
    /// HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&config.api_base_url)?;
        anyhow::ensure!(!base_url.cannot_be_a_base(), "content API URL cannot be a base");
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let locale_header = HeaderName::from_bytes(config.locale_header.as_bytes())?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let mut builder = ClientBuilder::new(http);
        if config.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder()
                .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
                .build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        let client = builder.build();

        let cache = config.cache_enabled().then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_size)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            client,
            cache,
            base_url,
            locale_header,
            request_timeout: config.request_timeout,
        })
    }

    /// API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a request path. Each path segment is percent-encoded.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    /// Make a GET request.
    async fn get(&self, request: &ApiRequest, locale: Locale) -> ClientResult<serde_json::Value> {
        let url = self.endpoint_url(&request.path);

        // Check cache
        let cache_key = self.cache_key(url.as_str(), &request.params, locale);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::trace!(%url, %locale, "content cache hit");
                return Ok(cached);
            }
        }

        tracing::debug!(%url, %locale, params = ?request.params, "GET content API");

        let response = self
            .client
            .get(url)
            .query(&request.params)
            .header(self.locale_header.clone(), locale.as_str())
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let response = self.handle_response(response).await?;
        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;

        // Cache response
        if let Some(cache) = &self.cache {
            cache.insert(cache_key, value.clone()).await;
        }

        Ok(value)
    }

    fn transport_error(&self, err: reqwest_middleware::Error) -> ClientError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ClientError::Timeout(self.request_timeout)
            }
            reqwest_middleware::Error::Reqwest(e) => ClientError::Http(e),
            other => ClientError::Middleware(other),
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let resource = response.url().path().to_string();
        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(ClientError::not_found(resource)),
            400 => Err(ClientError::bad_request(text)),
            500..=599 => Err(ClientError::server(status.as_u16(), text)),
            _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text }),
        }
    }

    /// Generate cache key.
    fn cache_key(&self, url: &str, params: &[(String, String)], locale: Locale) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(locale.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

#[async_trait::async_trait]
impl ContentSource for ContentClient {
    async fn get_json(&self, request: &ApiRequest, locale: Locale) -> ClientResult<serde_json::Value> {
        self.get(request, locale).await
    }
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient")
            .field("base_url", &self.base_url.as_str())
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
