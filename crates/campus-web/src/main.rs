//! Campus website - Entry Point
//!
//! Serves the multilingual university website over HTTP.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use campus_web::{config::Config, locale::Locale, server::WebServer};

#[derive(Parser, Debug)]
#[command(name = "campus-web")]
#[command(about = "Server-rendered multilingual university website")]
#[command(version)]
struct Cli {
    /// Content API base URL (overrides CONTENT_API_URL from the environment)
    #[arg(long)]
    api_url: Option<String>,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Locale served at `/` when the browser prefers none of ours (en, ar, ku)
    #[arg(long)]
    default_locale: Option<Locale>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), port = cli.port, "Starting campus website");

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(locale) = cli.default_locale {
        config.default_locale = locale;
    }

    let server = WebServer::new(config)?;
    server.run_http(cli.port).await?;

    Ok(())
}
