//! MCP tool implementations.
//!
//! This module contains all tools exposed by the gridpick server.

pub mod image_find;
pub mod image_more;
pub mod image_resolve;

pub use image_find::ImageFindParams;
pub use image_more::ImageMoreParams;
pub use image_resolve::{ImageResolveOutput, ImageResolveParams};

use base64::{Engine, prelude::BASE64_STANDARD};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gridpick_client::{Finder, Listing};
use gridpick_core::{Error, Token};

/// Metadata returned alongside a rendered grid.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GridOutput {
    /// Session slug shared by every token in this grid.
    pub slug: String,
    /// Absolute index of the first cell.
    pub offset: usize,
    /// Tokens in cell order (row-major, 6 per row).
    pub tokens: Vec<String>,
}

impl From<&Listing> for GridOutput {
    fn from(listing: &Listing) -> Self {
        let tokens = (0..listing.urls.len())
            .map(|i| Token::new(listing.slug.as_str(), listing.offset + i).encode())
            .collect();
        Self { slug: listing.slug.clone(), offset: listing.offset, tokens }
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} cannot be empty")).into());
    }
    Ok(())
}

/// Render `listing` and package it as a PNG image plus token metadata.
pub(crate) async fn grid_result(finder: &Finder, listing: &Listing) -> Result<CallToolResult, McpError> {
    let png = finder.render_grid(listing).await?;
    let output = GridOutput::from(listing);
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvariantViolation(format!("failed to serialize grid output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::image(BASE64_STANDARD.encode(png), "image/png"), Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory provider and thumbnail fakes shared by tool tests.

    use bytes::Bytes;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Arc;

    use gridpick_client::render::GridRenderer;
    use gridpick_client::{Finder, ImageQuery, ImageSource, ProviderError, ThumbnailFetcher};
    use gridpick_core::{Error, ResultCache};

    /// Serves `count` URLs for the unfiltered query and nothing for the variants.
    pub struct FakeSource {
        pub count: usize,
    }

    #[async_trait::async_trait]
    impl ImageSource for FakeSource {
        async fn search(&self, query: &ImageQuery) -> Result<Vec<String>, ProviderError> {
            if query.filter.is_some() {
                return Ok(Vec::new());
            }
            Ok(urls(self.count))
        }
    }

    /// Serves the same small PNG for every URL.
    pub struct FakeFetcher;

    #[async_trait::async_trait]
    impl ThumbnailFetcher for FakeFetcher {
        async fn fetch_image(&self, _url: &str) -> Result<Bytes, Error> {
            let image = RgbaImage::from_pixel(64, 48, Rgba([30, 120, 200, 255]));
            let mut buffer = Cursor::new(Vec::new());
            image.write_to(&mut buffer, ImageFormat::Png).unwrap();
            Ok(Bytes::from(buffer.into_inner()))
        }
    }

    pub fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://encrypted-tbn0.gstatic.com/images?q=tbn:{i}")).collect()
    }

    pub fn finder(count: usize) -> Finder {
        Finder::new(
            ResultCache::new(),
            Arc::new(FakeSource { count }),
            GridRenderer::with_fetcher(Arc::new(FakeFetcher)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_output_tokens() {
        let listing = Listing { urls: testing::urls(3), offset: 24, slug: "QRS".into() };
        let output = GridOutput::from(&listing);
        assert_eq!(output.tokens, ["QRSx24", "QRSx25", "QRSx26"]);
        assert_eq!(output.offset, 24);
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("owner", "  ").is_err());
        assert!(require("owner", "U1").is_ok());
    }
}
