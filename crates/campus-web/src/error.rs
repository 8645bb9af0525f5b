//! Error types for the campus website.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::http::StatusCode;

use crate::locale::{Locale, Message};

/// A content API response that decoded but violates the expected shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required text field is missing or blank.
    #[error("field '{field}' must not be empty")]
    EmptyField {
        /// Offending field name
        field: &'static str,
    },

    /// A slug contains whitespace or URL delimiters.
    #[error("invalid slug '{0}'")]
    InvalidSlug(String),

    /// List envelope reports a page number below 1.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),

    /// List envelope carries more items than its declared limit.
    #[error("page holds {count} items but limit is {limit}")]
    OverLimit {
        /// Items in the page
        count: usize,
        /// Declared page size
        limit: u32,
    },

    /// First page carries more items than the declared total.
    #[error("first page holds {count} items but total is {total}")]
    OverTotal {
        /// Items in the page
        count: usize,
        /// Declared total
        total: u64,
    },

    /// Nested item failed validation.
    #[error("item {index}: {source}")]
    Item {
        /// Position of the item in `data`
        index: usize,
        /// Underlying violation
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Wrap a violation with the position of the offending list item.
    #[must_use]
    pub fn at(index: usize, source: Self) -> Self {
        Self::Item { index, source: Box::new(source) }
    }
}

/// Errors from the content API client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response decoded but failed boundary validation
    #[error("Invalid response from {endpoint}: {source}")]
    Schema {
        /// Endpoint that produced the response
        endpoint: String,
        /// Violation
        #[source]
        source: SchemaError,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a schema violation error for an endpoint.
    #[must_use]
    pub fn schema(endpoint: impl Into<String>, source: SchemaError) -> Self {
        Self::Schema { endpoint: endpoint.into(), source }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Server { .. })
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status for a page this error prevented from rendering.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Localized message for the page body.
    #[must_use]
    pub fn to_user_message(&self, locale: Locale) -> &'static str {
        if self.is_not_found() {
            locale.text(Message::NotFound)
        } else {
            locale.text(Message::ErrorTitle)
        }
    }
}

/// Errors surfaced by the web layer.
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    /// Error from the content API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Path names a locale the site does not serve
    #[error("Unsupported locale: {0}")]
    UnknownLocale(String),

    /// Path names a section the site does not have
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

impl PageError {
    /// HTTP status to answer with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Client(err) => err.status(),
            Self::UnknownLocale(_) | Self::UnknownSection(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Convert to a localized message suitable for the page body.
    #[must_use]
    pub fn to_user_message(&self, locale: Locale) -> &'static str {
        match self {
            Self::Client(err) => err.to_user_message(locale),
            Self::UnknownLocale(_) | Self::UnknownSection(_) => locale.text(Message::NotFound),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;
