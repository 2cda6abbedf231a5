use std::time::Duration;

/// Failure of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("response addressed to `{found}`, expected `{expected}`")]
    Correlation { expected: String, found: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("undecodable payload: {0}")]
    Decode(#[from] serde_json::Error),
}
