//! Configuration for the campus website.

use std::time::Duration;

use crate::locale::Locale;

/// Content API and rendering defaults.
pub mod api {
    use std::time::Duration;

    /// Base URL of the content API.
    pub const BASE_URL: &str = "http://localhost:8080/api";

    /// Header that carries the requested content locale.
    pub const LOCALE_HEADER: &str = "Accept-Language";

    /// Items requested per list page.
    pub const PAGE_LIMIT: u32 = 12;

    /// Highest page a shared link may ask the server to accumulate up to.
    pub const MAX_PAGE: u32 = 50;

    /// Asset substituted for missing or broken media.
    pub const PLACEHOLDER_URL: &str = "/static/placeholder.svg";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Transport retries for transient failures. Zero leaves retrying to the visitor.
    pub const MAX_RETRIES: u32 = 0;

    /// Cache TTL (1 minute).
    pub const CACHE_TTL: Duration = Duration::from_secs(60);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Site configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API (no trailing slash).
    pub api_base_url: String,

    /// Locale served at `/`.
    pub default_locale: Locale,

    /// Header name carrying the locale on outbound requests.
    pub locale_header: String,

    /// Items per list page.
    pub page_limit: u32,

    /// Upper bound for the `page` query parameter.
    pub max_page: u32,

    /// Placeholder asset for broken media.
    pub placeholder_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Transport retries for transient failures.
    pub max_retries: u32,

    /// Cache TTL. Zero disables caching.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a configuration pointing at the given content API.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            default_locale: Locale::default(),
            locale_header: api::LOCALE_HEADER.to_string(),
            page_limit: api::PAGE_LIMIT,
            max_page: api::MAX_PAGE,
            placeholder_url: api::PLACEHOLDER_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
            ..Self::new(format!("{}/api", base_url.trim_end_matches('/')))
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults in [`api`].
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config =
            Self::new(std::env::var("CONTENT_API_URL").unwrap_or_else(|_| api::BASE_URL.to_string()));

        if let Ok(locale) = std::env::var("DEFAULT_LOCALE") {
            config.default_locale = locale.parse().map_err(anyhow::Error::msg)?;
        }
        if let Ok(header) = std::env::var("LOCALE_HEADER") {
            config.locale_header = header;
        }
        if let Ok(limit) = std::env::var("PAGE_LIMIT") {
            config.page_limit = limit.parse()?;
            anyhow::ensure!(config.page_limit > 0, "PAGE_LIMIT must be positive");
        }
        if let Ok(url) = std::env::var("PLACEHOLDER_URL") {
            config.placeholder_url = url;
        }
        if let Ok(secs) = std::env::var("CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(secs.parse()?);
        }
        if let Ok(retries) = std::env::var("MAX_RETRIES") {
            config.max_retries = retries.parse()?;
        }

        Ok(config)
    }

    /// Check if response caching is enabled.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        !self.cache_ttl.is_zero() && self.cache_max_size > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL)
    }
}
