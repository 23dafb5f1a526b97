//! image_more tool implementation.
//!
//! Serves the next grid of an existing search session.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gridpick_client::{Finder, NextPage};

use super::{grid_result, require};

/// Input parameters for image_more tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageMoreParams {
    /// Identity the search session belongs to.
    pub owner: String,
    /// Term of a previous image_find call.
    pub term: String,
}

/// Implementation of the image_more tool.
///
/// A missing, expired or fully served session is not an error; the caller
/// gets a text message telling them to search again.
pub async fn more_impl(finder: &Finder, params: ImageMoreParams) -> Result<CallToolResult, McpError> {
    require("owner", &params.owner)?;
    let term = params.term.trim();

    match finder.next(&params.owner, term).await {
        NextPage::Listing(listing) => grid_result(finder, &listing).await,
        NextPage::Exhausted => {
            tracing::debug!(owner = %params.owner, term, "no further results");
            Ok(CallToolResult::success(vec![Content::text(format!(
                "No more results for '{term}'. Run image_find to start a new search."
            ))]))
        }
    }
}
