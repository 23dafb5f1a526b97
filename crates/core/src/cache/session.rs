//! A single cached search session.

use tokio::time::{Duration, Instant};

use super::Page;

/// Cached result list for one `(owner, term)` search with its pagination cursor.
#[derive(Debug, Clone)]
pub struct Session {
    pub owner: String,
    pub term: String,
    pub slug: String,
    pub urls: Vec<String>,
    /// Index of the next unserved result. May overshoot `urls.len()` by less than one batch.
    pub cursor: usize,
    pub created_at: Instant,
}

impl Session {
    pub fn new(owner: &str, term: &str, slug: String, urls: Vec<String>) -> Self {
        Self { owner: owner.to_string(), term: term.to_string(), slug, urls, cursor: 0, created_at: Instant::now() }
    }

    /// Age strictly greater than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }

    pub fn is_drained(&self) -> bool {
        self.cursor >= self.urls.len()
    }

    /// Serve the next batch and advance the cursor by a full batch.
    pub(crate) fn advance(&mut self, batch_size: usize) -> Page {
        if self.is_drained() {
            return Page::Drained;
        }

        let offset = self.cursor;
        let end = (offset + batch_size).min(self.urls.len());
        let urls = self.urls[offset..end].to_vec();
        self.cursor += batch_size;

        Page::Batch { urls, offset, slug: self.slug.clone() }
    }

    pub fn url_at(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }
}
