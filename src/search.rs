//! Search orchestration: request parameters in, [`SearchView`] out.
//!
//! One call to [`search`] performs, in order:
//! 1. Defaulting of the raw `q` / `page` parameters
//! 2. Integer parsing of `page` (zero and negative values pass through)
//! 3. Exactly one upstream fetch through [`NewsSearch`]
//! 4. Page-count arithmetic
//!
//! Failures in steps 2 and 3 end the request; nothing is retried and no
//! partial view is produced.

use crate::api::NewsSearch;
use crate::error::NewsError;
use crate::models::SearchView;
use tracing::{info, instrument};

/// Page used when the request carries none.
pub const DEFAULT_PAGE: &str = "1";

/// Raw query-string parameters of a search request.
#[derive(Debug, Default, Clone)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

impl SearchParams {
    /// Pick `q` and `page` out of decoded query-string pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "page" => &mut params.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Number of pages needed to show `total_results` items at `page_size` per page.
///
/// Callers guarantee `page_size > 0`; the client refuses to be built otherwise.
pub fn total_pages(total_results: u64, page_size: u32) -> u64 {
    (total_results as f64 / page_size as f64).ceil() as u64
}

/// Run one search against `client` and assemble the view for rendering.
///
/// # Errors
///
/// - [`NewsError::InvalidPage`] when `page` is not an integer; no upstream call is made
/// - Any error from [`NewsSearch::fetch_everything`], unchanged
#[instrument(level = "info", skip_all)]
pub async fn search<C>(client: &C, params: SearchParams) -> Result<SearchView, NewsError>
where
    C: NewsSearch,
{
    let query = params.q.unwrap_or_default();
    let page = params
        .page
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PAGE.to_string());

    let current_page = page
        .parse::<i64>()
        .map_err(|source| NewsError::InvalidPage {
            page: page.clone(),
            source,
        })?;

    let results = client.fetch_everything(&query, &page).await?;
    let total_pages = total_pages(results.total_results, client.page_size());

    info!(
        query = %query,
        page = current_page,
        total_results = results.total_results,
        total_pages,
        "Search completed"
    );

    Ok(SearchView {
        query,
        current_page,
        total_pages,
        results,
    })
}
