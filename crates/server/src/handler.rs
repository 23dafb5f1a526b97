//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    ImageFindParams, ImageMoreParams, ImageResolveParams, image_find::find_impl, image_more::more_impl,
    image_resolve::resolve_impl,
};

use gridpick_client::Finder;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for gridpick.
#[derive(Clone)]
pub struct GridPickServer {
    finder: Finder,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl GridPickServer {
    /// Create a new server handler around a search orchestrator.
    pub fn new(finder: Finder) -> Self {
        Self { finder, tool_router: Self::tool_router() }
    }

    /// Search for images and return the first grid.
    #[tool(
        description = "Search images for a term. Returns a PNG grid of up to 24 thumbnails, each labelled with a token such as ABCx07, plus the token list as JSON."
    )]
    async fn image_find(&self, params: Parameters<ImageFindParams>) -> Result<CallToolResult, McpError> {
        find_impl(&self.finder, params.0).await
    }

    /// Next grid of the owner's latest search for a term.
    #[tool(
        description = "Show the next grid of results for a term previously searched with image_find. Returns a text notice when no results remain."
    )]
    async fn image_more(&self, params: Parameters<ImageMoreParams>) -> Result<CallToolResult, McpError> {
        more_impl(&self.finder, params.0).await
    }

    #[tool(description = "Resolve a grid token such as ABCx07 to the image URL it labels.")]
    async fn image_resolve(&self, params: Parameters<ImageResolveParams>) -> Result<CallToolResult, McpError> {
        resolve_impl(&self.finder, params.0).await
    }
}

impl ServerHandler for GridPickServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "gridpick".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Call image_find with an owner and term, page with image_more, and redeem a cell label with image_resolve. Sessions expire after a few minutes.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
