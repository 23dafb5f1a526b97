//! Unified error types for gridpick.
//!
//! Lookups against the session cache never produce these; they return
//! explicit sentinels instead. Errors are reserved for failures the caller
//! has to surface: bad input, upstream and render failures, and programming
//! errors.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the gridpick workspace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., a search term that is too short).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A string that was expected to be a token is not token-shaped.
    #[error("INVALID_TOKEN: {0}")]
    InvalidToken(String),

    /// No live session backs the requested lookup.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Every slug drawn within the retry ceiling was already taken.
    #[error("SLUG_SPACE_EXHAUSTED: no free slug after {attempts} attempts")]
    SlugSpaceExhausted { attempts: usize },

    /// Internal consistency check failed; indicates a bug, not a runtime condition.
    #[error("INVARIANT_VIOLATION: {0}")]
    InvariantViolation(String),

    /// The image search provider failed or returned an unusable payload.
    #[error("UPSTREAM_FAILED: {0}")]
    UpstreamFailed(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// A thumbnail could not be fetched or decoded, or the grid could not be encoded.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidToken(msg) => (-32602, format!("not a token: {msg}")),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::SlugSpaceExhausted { .. } => (-32002, err.to_string()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::UpstreamFailed(msg) => (-32009, msg.clone()),
            Error::RenderFailed(msg) => (-32012, msg.clone()),
            Error::InvariantViolation(msg) => (-32603, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
