//! image_find tool implementation.
//!
//! Runs a fresh image search and returns the first grid.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gridpick_client::Finder;
use gridpick_core::Error;

use super::{grid_result, require};

/// Shortest search term accepted.
pub const MIN_TERM_CHARS: usize = 3;

/// Input parameters for image_find tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageFindParams {
    /// Identity the search session belongs to.
    pub owner: String,
    /// Search term (at least 3 characters).
    pub term: String,
}

/// Implementation of the image_find tool.
pub async fn find_impl(finder: &Finder, params: ImageFindParams) -> Result<CallToolResult, McpError> {
    require("owner", &params.owner)?;

    let term = params.term.trim();
    if term.chars().count() < MIN_TERM_CHARS {
        return Err(Error::InvalidInput(format!("term must be at least {MIN_TERM_CHARS} characters")).into());
    }

    let listing = finder.find(&params.owner, term).await?;
    grid_result(finder, &listing).await
}
