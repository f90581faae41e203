//! Data models for upstream search results and the per-request view.
//!
//! - [`Article`] and [`Source`]: pass-through records decoded from the news API
//! - [`QueryResult`]: one decoded page of the `everything` endpoint
//! - [`SearchView`]: what a single `/search` request hands to rendering
//!
//! Field names follow the upstream JSON (camelCase) through serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a string that the upstream may send as `null`, yielding `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The outlet an article was published by.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Source {
    /// Upstream identifier, `null` for most smaller outlets.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the outlet.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// A single article as returned by the news API.
///
/// Nothing here is validated beyond successful decoding. Optional upstream
/// fields decode to `None`; a missing or `null` title, url or source name
/// becomes an empty string so one sparse article does not sink the page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Publication date in long form, e.g. `"March 4, 2024"`.
    ///
    /// Returns an empty string when the upstream sent no timestamp.
    pub fn format_published_date(&self) -> String {
        self.published_at
            .map(|ts| ts.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// One page of results from the `everything` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// `"ok"` on success; tolerated when missing.
    #[serde(default)]
    pub status: Option<String>,
    /// Total matches across all pages, not just this one.
    pub total_results: u64,
    /// Articles on this page, in upstream order.
    pub articles: Vec<Article>,
}

/// The assembled result of one search request.
///
/// Lives only for the duration of a single request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub current_page: i64,
    pub total_pages: u64,
    pub results: QueryResult,
}

impl SearchView {
    pub fn previous_page(&self) -> i64 {
        self.current_page - 1
    }

    pub fn next_page(&self) -> i64 {
        self.current_page + 1
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// True once the current page reaches the computed page count.
    ///
    /// An empty result set (zero pages) is always on its last page.
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages as i64
    }
}
