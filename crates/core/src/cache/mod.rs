//! Ephemeral per-owner search session cache.
//!
//! Each search stores its result list under a fresh three-letter slug and a
//! pagination cursor. Callers page through the list in fixed batches and
//! redeem individual results by token. Sessions live for a fixed TTL:
//!
//! - lookups treat sessions older than the TTL as absent
//! - every cache call schedules a deferred sweep that removes them
//! - a [`Reaper`] can additionally sweep on a fixed interval
//!
//! The table sits behind a single async mutex. No critical section awaits
//! while holding it, and a sweep scans and mutates in one critical section,
//! so sweeps never interleave with each other or with foreground calls.

pub mod reaper;
pub mod session;
pub mod slug;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::Error;
use crate::token::Token;

pub use reaper::Reaper;
pub use session::Session;

/// Results served per page, and cells per rendered grid.
pub const BATCH_SIZE: usize = 24;

/// Lifetime of a session before it becomes eligible for eviction.
pub const SESSION_TTL: Duration = Duration::from_secs(5 * 60);

/// Outcome of a pagination call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// No live session for the owner and term.
    Unknown,
    /// The session exists but every result has been served.
    Drained,
    /// Up to [`BATCH_SIZE`] results from the session named `slug`; `offset`
    /// is the absolute index of the first one.
    Batch { urls: Vec<String>, offset: usize, slug: String },
}

#[derive(Debug, Default)]
struct SessionTable {
    /// Insertion order; later entries are newer.
    sessions: Vec<Session>,
}

impl SessionTable {
    fn insert(&mut self, owner: &str, term: &str, urls: Vec<String>) -> Result<String, Error> {
        let mut rng = rand::rng();
        let slug = slug::unique_slug(&mut rng, |candidate| self.sessions.iter().any(|s| s.slug == candidate))?;
        self.sessions.push(Session::new(owner, term, slug.clone(), urls));
        Ok(slug)
    }

    /// Newest live session for `(owner, term)`.
    fn by_term_mut(&mut self, owner: &str, term: &str, ttl: Duration) -> Option<&mut Session> {
        self.sessions
            .iter_mut()
            .rev()
            .find(|s| s.owner == owner && s.term == term && !s.is_expired(ttl))
    }

    fn by_slug_mut(&mut self, owner: &str, slug: &str, ttl: Duration) -> Option<&mut Session> {
        self.sessions
            .iter_mut()
            .rev()
            .find(|s| s.owner == owner && s.slug == slug && !s.is_expired(ttl))
    }

    fn by_slug(&self, owner: &str, slug: &str, ttl: Duration) -> Option<&Session> {
        self.sessions
            .iter()
            .rev()
            .find(|s| s.owner == owner && s.slug == slug && !s.is_expired(ttl))
    }

    fn sweep(&mut self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|s| !s.is_expired(ttl));
        before - self.sessions.len()
    }
}

/// Handle to a session table. Clones share the same table.
#[derive(Debug, Clone)]
pub struct ResultCache {
    table: Arc<Mutex<SessionTable>>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    /// Create an empty cache with the standard five minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { table: Arc::new(Mutex::new(SessionTable::default())), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `urls` as a new session and return its slug.
    ///
    /// An earlier session for the same owner and term stays live (its tokens
    /// still redeem) but term lookups move to the new one.
    ///
    /// # Errors
    ///
    /// Returns `Error::SlugSpaceExhausted` if no free slug was drawn within the retry ceiling.
    pub async fn set(&self, owner: &str, term: &str, urls: Vec<String>) -> Result<String, Error> {
        let count = urls.len();
        let result = {
            let mut table = self.table.lock().await;
            table.insert(owner, term, urls)
        };
        self.schedule_sweep();

        let slug = result?;
        tracing::debug!(owner, term, slug = %slug, count, "created search session");
        Ok(slug)
    }

    /// Serve the next batch for `(owner, term)` and advance its cursor.
    pub async fn get(&self, owner: &str, term: &str) -> Page {
        let page = {
            let mut table = self.table.lock().await;
            match table.by_term_mut(owner, term, self.ttl) {
                Some(session) => session.advance(BATCH_SIZE),
                None => Page::Unknown,
            }
        };
        self.schedule_sweep();
        page
    }

    /// Serve the next batch of the owner's session named `slug` and advance its cursor.
    ///
    /// Unlike [`ResultCache::get`] this is unaffected by newer sessions for the
    /// same term.
    pub async fn get_by_slug(&self, owner: &str, slug: &str) -> Page {
        let slug = slug.to_ascii_uppercase();
        let page = {
            let mut table = self.table.lock().await;
            match table.by_slug_mut(owner, &slug, self.ttl) {
                Some(session) => session.advance(BATCH_SIZE),
                None => Page::Unknown,
            }
        };
        self.schedule_sweep();
        page
    }

    /// Slug of the newest live session for `(owner, term)`.
    pub async fn slug_for(&self, owner: &str, term: &str) -> Option<String> {
        let slug = {
            let mut table = self.table.lock().await;
            table.by_term_mut(owner, term, self.ttl).map(|s| s.slug.clone())
        };
        self.schedule_sweep();
        slug
    }

    /// URL at absolute `index` of the owner's live session named `slug`.
    ///
    /// The slug is matched case-insensitively.
    pub async fn resolve_token(&self, owner: &str, slug: &str, index: usize) -> Option<String> {
        let slug = slug.to_ascii_uppercase();
        let url = {
            let table = self.table.lock().await;
            table
                .by_slug(owner, &slug, self.ttl)
                .and_then(|s| s.url_at(index))
                .map(str::to_string)
        };
        self.schedule_sweep();
        url
    }

    /// Decode `token` and resolve it. Strings that are not token-shaped resolve to `None`.
    pub async fn resolve(&self, owner: &str, token: &str) -> Option<String> {
        let token = Token::decode(token)?;
        self.resolve_token(owner, &token.slug, token.index).await
    }

    /// Remove every session older than the TTL, returning how many were removed.
    pub async fn sweep(&self) -> usize {
        let removed = self.table.lock().await.sweep(self.ttl);
        if removed > 0 {
            tracing::debug!(removed, "evicted expired search sessions");
        }
        removed
    }

    /// Number of sessions held, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.table.lock().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Queue a sweep that runs after the current call has released the table.
    ///
    /// Outside a tokio runtime there is nothing to queue onto; lazy expiry
    /// still hides stale sessions until the next sweep.
    fn schedule_sweep(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let cache = self.clone();
        handle.spawn(async move {
            cache.sweep().await;
        });
    }
}
