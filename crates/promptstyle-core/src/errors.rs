use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(pub String);

/// Why a single model query did not produce a completion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// HTTP 429; the only retryable failure.
    #[error("HTTP 429: rate limited")]
    RateLimited,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl QueryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, QueryError::RateLimited)
    }
}
