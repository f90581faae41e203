//! Error taxonomy for the search pipeline.
//!
//! Every failure the client or the orchestrator can produce is one variant of
//! [`NewsError`]. None of them are recovered internally: they travel up to the
//! HTTP boundary, where [`NewsError::status_code`] decides the response code
//! and the error's message becomes the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while building or running a news search.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The request never produced a response (connect failure, timeout, body read).
    #[error("news api request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("news api returned {status}{}: {message}", code_suffix(.code))]
    Upstream {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A success response whose body did not match the expected schema.
    #[error("could not decode news api response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The `page` request parameter is not an integer.
    #[error("invalid page {page:?}: {source}")]
    InvalidPage {
        page: String,
        #[source]
        source: ParseIntError,
    },

    /// Client construction was given unusable settings.
    #[error("invalid news client configuration: {0}")]
    Config(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl NewsError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NewsError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NewsError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            NewsError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NewsError::InvalidPage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            NewsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
