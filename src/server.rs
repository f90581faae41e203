//! HTTP front-end.
//!
//! | Route       | Handler          | Notes                                 |
//! |-------------|------------------|---------------------------------------|
//! | `/`         | [`index`]        | Empty search form                     |
//! | `/search`   | [`search_page`]  | `q` and `page` query parameters       |
//! | `/assets/*` | `ServeDir`       | Static files from the assets directory |
//!
//! The news client is handed to handlers through [`AppState`]; there is no
//! process-wide client. Errors from the search pipeline are turned into
//! responses by [`NewsError`]'s `IntoResponse` impl.

use crate::api::NewsClient;
use crate::error::NewsError;
use crate::render;
use crate::search::{self, SearchParams};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<NewsClient>,
}

impl AppState {
    pub fn new(client: NewsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search_page))
        .nest_service("/assets", ServeDir::new(assets_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

async fn index() -> Html<String> {
    Html(render::index_page())
}

async fn search_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, NewsError> {
    let params = SearchParams::from_pairs(pairs);
    let view = search::search(state.client.as_ref(), params)
        .await
        .inspect_err(|e| error!(error = %e, "Search request failed"))?;
    Ok(Html(render::search_page(&view)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mockito::{Matcher, Server};
    use tower::ServiceExt;

    const OK_BODY: &str = r#"{
        "status": "ok",
        "totalResults": 45,
        "articles": [
            {
                "source": { "id": null, "name": "Example Times" },
                "author": null,
                "title": "Rust in production",
                "description": "Teams share notes",
                "url": "https://example.com/rust",
                "urlToImage": null,
                "publishedAt": "2025-01-15T08:00:00Z",
                "content": null
            }
        ]
    }"#;

    fn assets_dir() -> String {
        format!("{}/assets", env!("CARGO_MANIFEST_DIR"))
    }

    fn app_for(server: &Server) -> Router {
        let client = NewsClient::new(reqwest::Client::new(), "test-key", 20)
            .unwrap()
            .with_base_url(&server.url())
            .unwrap();
        router(AppState::new(client), assets_dir())
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let server = Server::new_async().await;
        let (status, body) = get_body(app_for(&server), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"action="/search""#));
    }

    #[tokio::test]
    async fn test_search_renders_results() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "rust".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(OK_BODY)
            .create_async()
            .await;

        let (status, body) = get_body(app_for(&server), "/search?q=rust&page=2").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Rust in production"));
        assert!(body.contains("page <strong>2</strong> of <strong>3</strong>"));
    }

    #[tokio::test]
    async fn test_search_without_page_uses_first_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(OK_BODY)
            .create_async()
            .await;

        let (status, _) = get_body(app_for(&server), "/search?q=rust").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_repeated_parameters_use_first_value() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "a".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(OK_BODY)
            .expect(1)
            .create_async()
            .await;

        let (status, body) =
            get_body(app_for(&server), "/search?q=a&q=b&page=1&page=2").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="a""#));
    }

    #[tokio::test]
    async fn test_upstream_error_is_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#)
            .create_async()
            .await;

        let (status, body) = get_body(app_for(&server), "/search?q=rust").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Your API key is invalid."));
    }

    #[tokio::test]
    async fn test_invalid_page_is_server_error_without_upstream_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (status, body) = get_body(app_for(&server), "/search?q=rust&page=abc").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("invalid page"));
    }

    #[tokio::test]
    async fn test_assets_are_served() {
        let server = Server::new_async().await;
        let (status, body) = get_body(app_for(&server), "/assets/style.css").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".search-results"));
    }

    #[tokio::test]
    async fn test_missing_asset_is_not_found() {
        let server = Server::new_async().await;
        let (status, _) = get_body(app_for(&server), "/assets/missing.css").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
