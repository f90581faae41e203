//! # News Search
//!
//! A small web front-end for searching a news aggregation API and paging
//! through the results.
//!
//! ## Usage
//!
//! ```sh
//! # PORT and news_api_key come from app.env or the environment
//! news_search
//! news_search --port 8080 --page-size 10
//! ```
//!
//! ## Architecture
//!
//! A request to `/search` flows through:
//! 1. **Parameters**: `q` and `page` are read and defaulted ([`search`])
//! 2. **Fetching**: one call to the upstream `everything` endpoint ([`api`])
//! 3. **Pagination**: total pages derived from the result count and page size
//! 4. **Rendering**: the view becomes an HTML page ([`render`])

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod error;
mod models;
mod render;
mod search;
mod server;
mod utils;

use api::{http_client, NewsClient};
use cli::Cli;
use server::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Env file first so RUST_LOG and friends can live there too
    let env_file = cli::env_file_from_args(std::env::args());
    let env_loaded = dotenv::from_path(&env_file);

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("news_search starting up");
    match env_loaded {
        Ok(()) => info!(path = %env_file.display(), "Loaded env file"),
        Err(e) => warn!(path = %env_file.display(), error = %e, "Env file not loaded; using process environment"),
    }

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if !args.assets_dir.is_dir() {
        warn!(path = %args.assets_dir.display(), "Assets directory not found; /assets will return 404");
    }

    // ---- News client ----
    let http = http_client(Duration::from_secs(args.timeout_secs))?;
    let client = NewsClient::new(http, args.api_key.clone(), args.page_size)?
        .with_base_url(&args.base_url)?;
    info!(?client, timeout_secs = args.timeout_secs, "News client ready");

    // ---- Server ----
    let app = server::router(AppState::new(client), &args.assets_dir);
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    server::serve(listener, app).await?;

    info!("news_search stopped");
    Ok(())
}
