//! Image search provider error types.

use std::sync::Arc;

use gridpick_core::Error;

/// Errors from the image search provider client.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Search term is empty once whitespace is removed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Thumbnail host pattern does not compile.
    #[error("invalid thumbnail pattern: {0}")]
    InvalidPattern(String),

    /// Provider answered with a non-success status.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body could not be read as a result page.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidQuery(msg) => Error::InvalidInput(msg),
            other => Error::UpstreamFailed(other.to_string()),
        }
    }
}
