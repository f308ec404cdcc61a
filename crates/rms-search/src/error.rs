use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("unknown search type '{0}'")]
    UnknownType(String),

    #[error("unknown order status '{0}'")]
    UnknownStatus(String),

    #[error("failed to parse search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected search response: {0}")]
    UnexpectedPayload(String),
}
