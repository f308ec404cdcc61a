use reqwest::StatusCode;
use rms_search::{SearchError, SearchType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("server returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("no endpoint configured for {0} search")]
    Unmapped(SearchType),

    /// The server answered with `{"status": "error"}`
    #[error("{0}")]
    Rejected(String),
}
