//! image_resolve tool implementation.
//!
//! Turns a grid label back into the image URL it stands for.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gridpick_client::Finder;
use gridpick_core::{Error, Token};

use super::require;

/// Input parameters for image_resolve tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageResolveParams {
    /// Identity the search session belongs to.
    pub owner: String,
    /// Grid label such as `ABCx07`.
    pub token: String,
}

/// Output structure for image_resolve tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageResolveOutput {
    /// Normalized token.
    pub token: String,
    pub url: String,
}

/// Implementation of the image_resolve tool.
pub async fn resolve_impl(finder: &Finder, params: ImageResolveParams) -> Result<CallToolResult, McpError> {
    require("owner", &params.owner)?;

    let raw = params.token.trim();
    let token = Token::decode(raw).ok_or_else(|| Error::InvalidToken(raw.to_string()))?;

    let url = finder
        .url_for(&params.owner, raw)
        .await
        .ok_or_else(|| Error::NotFound(format!("no live result for {token}")))?;

    let output = ImageResolveOutput { token: token.encode(), url };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvariantViolation(format!("failed to serialize resolve output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing;
    use crate::tools::{GridOutput, ImageFindParams, image_find::find_impl};

    async fn search(finder: &Finder) -> GridOutput {
        let result = find_impl(finder, ImageFindParams { owner: "U1".into(), term: "cats".into() })
            .await
            .unwrap();
        serde_json::from_str(&result.content[1].as_text().unwrap().text).unwrap()
    }

    fn params(owner: &str, token: &str) -> ImageResolveParams {
        ImageResolveParams { owner: owner.into(), token: token.into() }
    }

    #[tokio::test]
    async fn test_resolve_rendered_token() {
        let finder = testing::finder(30);
        let grid = search(&finder).await;

        let result = resolve_impl(&finder, params("U1", &grid.tokens[7])).await.unwrap();
        let output: ImageResolveOutput = serde_json::from_str(&result.content[0].as_text().unwrap().text).unwrap();
        assert_eq!(output.url, testing::urls(30)[7]);
        assert_eq!(output.token, grid.tokens[7]);
    }

    #[tokio::test]
    async fn test_resolve_lowercase_slug() {
        let finder = testing::finder(30);
        let grid = search(&finder).await;

        let lower = grid.tokens[3].to_lowercase();
        let result = resolve_impl(&finder, params("U1", &lower)).await.unwrap();
        let output: ImageResolveOutput = serde_json::from_str(&result.content[0].as_text().unwrap().text).unwrap();
        assert_eq!(output.token, grid.tokens[3]);
    }

    #[tokio::test]
    async fn test_resolve_not_a_token() {
        let finder = testing::finder(30);
        let err = resolve_impl(&finder, params("U1", "https://example.com/cat.png")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let finder = testing::finder(30);
        let grid = search(&finder).await;

        let err = resolve_impl(&finder, params("U2", &grid.tokens[0])).await.unwrap_err();
        assert_eq!(err.code.0, -32001);

        let beyond = format!("{}x31", grid.slug);
        let err = resolve_impl(&finder, params("U1", &beyond)).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }
}
