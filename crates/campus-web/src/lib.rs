//! Campus Website
//!
//! A server-rendered, multilingual (English, Arabic, Kurdish) university
//! website backed by a JSON content API.
//!
//! # Features
//!
//! - **URL-driven filters**: search, category, tag, date range and tabs live
//!   in the query string; every interaction is a new canonical URL
//! - **Load more**: pages accumulate without duplicates, server-side for
//!   shared links and through JSON fragments in the browser
//! - **One list abstraction**: [`resource::PaginatedResource`] serves every
//!   section, parameterized by endpoint and filter schema
//! - **Validated at the boundary**: malformed API responses become errors,
//!   not half-rendered pages
//! - **Cached**: short-TTL response cache reduces API calls
//!
//! # Example
//!
//! ```no_run
//! use campus_web::{config::Config, server::WebServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = WebServer::new(config)?;
//!     server.run_http(8000).await
//! }
//! ```

pub mod accumulator;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod formatters;
pub mod locale;
pub mod models;
pub mod pages;
pub mod resource;
pub mod server;

pub use accumulator::Accumulator;
pub use client::{ContentClient, ContentSource, RemoteData};
pub use config::Config;
pub use error::{ClientError, PageError, SchemaError};
pub use filters::{FilterState, QueryState};
pub use locale::Locale;
pub use resource::PaginatedResource;
