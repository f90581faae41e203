//! News API client.
//!
//! This module owns the single outbound call the application makes: a GET to
//! the upstream `everything` search endpoint.
//!
//! # Architecture
//!
//! - [`NewsSearch`]: the seam the search orchestrator depends on
//! - [`NewsClient`]: the `reqwest`-backed implementation talking to the news API
//!
//! # Request shape
//!
//! ```text
//! GET {base_url}everything?q={query}&pageSize={page_size}&page={page}
//! X-Api-Key: {api_key}
//! ```
//!
//! The key travels in a header so it never shows up in logged URLs. No retries
//! are attempted; every failure is returned to the caller as a [`NewsError`].

use crate::error::NewsError;
use crate::models::QueryResult;
use crate::utils::{redact_secret, truncate_for_log};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default upstream location.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

const API_KEY_HEADER: &str = "X-Api-Key";

/// Something that can run an `everything` search.
///
/// Implementors must be shareable across concurrently running requests.
pub trait NewsSearch {
    /// Number of articles requested per page.
    fn page_size(&self) -> u32;

    /// Fetch one page of articles matching `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search; may be empty, in which case it is passed through as-is
    /// * `page` - Page number, already validated as an integer by the caller
    fn fetch_everything(
        &self,
        query: &str,
        page: &str,
    ) -> impl Future<Output = Result<QueryResult, NewsError>> + Send;
}

/// Error body the upstream sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Build the shared HTTP client with a bounded per-request timeout.
///
/// The returned client pools connections and is cheap to clone.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, NewsError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| NewsError::Config(format!("could not build http client: {e}")))
}

/// Client for the news API `everything` endpoint.
///
/// Immutable once built. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    api_key: String,
    page_size: u32,
    base_url: Url,
}

impl NewsClient {
    /// Create a client pointed at [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Config`] if `page_size` is zero or `api_key` is empty.
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        page_size: u32,
    ) -> Result<Self, NewsError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NewsError::Config("api key must not be empty".to_string()));
        }
        if page_size == 0 {
            return Err(NewsError::Config(
                "page size must be greater than zero".to_string(),
            ));
        }
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| NewsError::Config(format!("invalid base url: {e}")))?;

        Ok(Self {
            http,
            api_key,
            page_size,
            base_url,
        })
    }

    /// Point the client at a different upstream, e.g. a proxy or a test server.
    ///
    /// A trailing slash is added when missing so the endpoint path is appended
    /// rather than replacing the last segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, NewsError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        self.base_url = Url::parse(&normalized)
            .map_err(|e| NewsError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        Ok(self)
    }

    fn everything_url(&self, query: &str, page: &str) -> Result<Url, NewsError> {
        let mut url = self
            .base_url
            .join("everything")
            .map_err(|e| NewsError::Config(format!("invalid endpoint url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("page", page);
        Ok(url)
    }
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("api_key", &redact_secret(&self.api_key))
            .field("page_size", &self.page_size)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl NewsSearch for NewsClient {
    fn page_size(&self) -> u32 {
        self.page_size
    }

    #[instrument(level = "info", skip_all, fields(query = %query, page = %page))]
    async fn fetch_everything(&self, query: &str, page: &str) -> Result<QueryResult, NewsError> {
        let url = self.everything_url(query, page)?;
        debug!(%url, "Requesting everything endpoint");

        let t0 = Instant::now();
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "News API request failed"))?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            let parsed = serde_json::from_str::<UpstreamErrorBody>(&body).ok();
            let code = parsed.as_ref().and_then(|b| b.code.clone());
            let message = parsed
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("unknown error").to_string()
                    } else {
                        truncate_for_log(&body, 300)
                    }
                });
            warn!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or(""),
                elapsed_ms = dt.as_millis() as u64,
                %message,
                "News API returned an error status"
            );
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let result = serde_json::from_str::<QueryResult>(&body).inspect_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "News API response did not match the expected schema"
            )
        })?;

        info!(
            status = status.as_u16(),
            total_results = result.total_results,
            articles = result.articles.len(),
            elapsed_ms = dt.as_millis() as u64,
            "Fetched everything page"
        );
        Ok(result)
    }
}
