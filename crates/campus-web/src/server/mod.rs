//! Web server.
//!
//! Serves server-rendered pages for every locale and section, plus the JSON
//! fragments the page script appends on "load more".

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::client::{ContentClient, ContentSource};
use crate::config::Config;
use crate::pages::Section;

pub use routes::{AppState, create_router};

/// The campus website.
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    /// Create a server backed by the content API in `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = ContentClient::new(&config)?;
        Ok(Self::with_source(Arc::new(client), config))
    }

    /// Create a server backed by any content source.
    #[must_use]
    pub fn with_source(source: Arc<dyn ContentSource>, config: Config) -> Self {
        Self { state: AppState { source, config: Arc::new(config) } }
    }

    /// Router with every route, for serving or for in-process tests.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!(
            api = %self.state.config.api_base_url,
            default_locale = %self.state.config.default_locale,
            sections = Section::ALL.len(),
            "Starting campus website"
        );

        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for WebServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebServer").field("state", &self.state).finish()
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
