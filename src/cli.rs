//! Command-line interface definitions for News Search.
//!
//! Every option can be given as a flag or through the environment. The
//! environment is seeded from an env file (`app.env` by default) before the
//! arguments are parsed, so the file can supply the API key and port.

use crate::api::DEFAULT_BASE_URL;
use crate::utils::redact_secret;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Env file read when `--env-file` is not given.
pub const DEFAULT_ENV_FILE: &str = "app.env";

/// Command-line arguments for the News Search server.
///
/// # Examples
///
/// ```sh
/// # Everything from app.env
/// news_search
///
/// # Explicit settings
/// news_api_key=YOUR_KEY news_search --port 8080 --page-size 10
/// ```
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// News API key
    #[arg(long, env = "news_api_key", hide_env_values = true)]
    pub api_key: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Articles requested per page
    #[arg(long, env = "PAGE_SIZE", default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Upstream request timeout in seconds
    #[arg(long, env = "NEWS_API_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Base URL of the news API
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory served under /assets
    #[arg(long, env = "ASSETS_DIR", default_value = "./assets")]
    pub assets_dir: PathBuf,

    /// Env file loaded before parsing the remaining options
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("api_key", &redact_secret(&self.api_key))
            .field("port", &self.port)
            .field("host", &self.host)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("assets_dir", &self.assets_dir)
            .field("env_file", &self.env_file)
            .finish()
    }
}

/// Find the `--env-file` value ahead of full parsing.
///
/// The env file has to be loaded before [`Cli::parse`] so that its variables
/// can satisfy required options.
pub fn env_file_from_args<I>(args: I) -> PathBuf
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        if arg == "--env-file" {
            if let Some(value) = args.next() {
                return PathBuf::from(value);
            }
        } else if let Some(value) = arg.strip_prefix("--env-file=") {
            return PathBuf::from(value);
        }
    }
    PathBuf::from(DEFAULT_ENV_FILE)
}
