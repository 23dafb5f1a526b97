//! Search orchestration.
//!
//! A fresh search fans out to the provider with the base term and each
//! broadening filter, merges the results and opens a cache session. Later
//! pages and token redemption go straight to the cache.

use futures_util::future::try_join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use gridpick_core::{AppConfig, Error, Page, ResultCache, TOKEN_INDEX_LIMIT};

use crate::provider::{ImageQuery, ImageSearchClient, ImageSource, ProviderConfig, SEARCH_VARIANTS};
use crate::render::GridRenderer;

/// One page of results ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub urls: Vec<String>,
    /// Absolute index of the first URL within the session.
    pub offset: usize,
    pub slug: String,
}

/// Outcome of asking for another page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    Listing(Listing),
    /// No live session, or every result has been served.
    Exhausted,
}

/// Coordinates the provider, the session cache and the grid renderer.
#[derive(Clone)]
pub struct Finder {
    cache: ResultCache,
    source: Arc<dyn ImageSource>,
    renderer: GridRenderer,
}

impl Finder {
    pub fn new(cache: ResultCache, source: Arc<dyn ImageSource>, renderer: GridRenderer) -> Self {
        Self { cache, source, renderer }
    }

    /// Wire up HTTP-backed provider and renderer around `cache`.
    pub fn from_config(config: &AppConfig, cache: ResultCache) -> Result<Self, Error> {
        let source = ImageSearchClient::new(ProviderConfig::from(config))?;
        let renderer = GridRenderer::from_config(config)?;
        Ok(Self::new(cache, Arc::new(source), renderer))
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Run a fresh search and return its first page.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` / `Error::UpstreamFailed` if any provider query fails
    /// - `Error::NotFound` if no query produced a usable URL
    /// - `Error::InvariantViolation` if the new session cannot be read back
    pub async fn find(&self, owner: &str, term: &str) -> Result<Listing, Error> {
        let start = Instant::now();

        let queries: Vec<ImageQuery> = SEARCH_VARIANTS.iter().map(|filter| ImageQuery::new(term, *filter)).collect();
        let batches = try_join_all(queries.iter().map(|query| self.source.search(query))).await?;

        let fetched: usize = batches.iter().map(Vec::len).sum();
        let mut urls = dedupe(batches.into_iter().flatten());
        urls.truncate(TOKEN_INDEX_LIMIT);

        if urls.is_empty() {
            return Err(Error::NotFound(format!("no images found for '{term}'")));
        }

        let count = urls.len();
        let slug = self.cache.set(owner, term, urls).await?;

        let listing = match self.cache.get_by_slug(owner, &slug).await {
            Page::Batch { urls, offset, slug } => Listing { urls, offset, slug },
            other => {
                return Err(Error::InvariantViolation(format!(
                    "session {slug} for '{term}' unreadable right after creation: {other:?}"
                )));
            }
        };

        tracing::info!(
            owner,
            term,
            slug = %listing.slug,
            fetched,
            unique = count,
            search_ms = start.elapsed().as_millis() as u64,
            "search session opened"
        );

        Ok(listing)
    }

    /// Serve the next page of the newest session for `(owner, term)`.
    pub async fn next(&self, owner: &str, term: &str) -> NextPage {
        match self.cache.get(owner, term).await {
            Page::Batch { urls, offset, slug } => NextPage::Listing(Listing { urls, offset, slug }),
            Page::Drained | Page::Unknown => NextPage::Exhausted,
        }
    }

    /// URL behind `token` in one of the owner's live sessions.
    pub async fn url_for(&self, owner: &str, token: &str) -> Option<String> {
        self.cache.resolve(owner, token).await
    }

    pub async fn render_grid(&self, listing: &Listing) -> Result<Vec<u8>, Error> {
        self.renderer.render_grid(&listing.urls, &listing.slug, listing.offset).await
    }
}

/// Drop repeated URLs, keeping the first occurrence of each.
pub fn dedupe(urls: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}
