//! Image search provider client.
//!
//! Queries an HTML image search endpoint and scrapes result thumbnails.
//!
//! ### Protocol
//!
//! - **Endpoint**: `GET {provider_url}?q=<term>&source=lnms&tbm=isch[&tbs=<filter>]`
//! - **Term**: all whitespace is removed before querying.
//! - **Results**: `<img src>` values matching the thumbnail host pattern, in
//!   page order, capped per query.
//! - **Failures**: non-2xx statuses, timeouts and unreadable bodies are
//!   errors. There are no retries.

pub mod error;
pub mod request;
pub mod response;

pub use error::ProviderError;
pub use request::{ImageFilter, ImageQuery, SEARCH_VARIANTS};
pub use response::extract_image_urls;

use regex::Regex;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gridpick_core::AppConfig;

/// Default search endpoint.
const DEFAULT_BASE_URL: &str = "https://www.google.com/search";

/// Default thumbnail host pattern.
const DEFAULT_HOST_PATTERN: &str = r"gstatic\.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "gridpick/0.1";

/// Default cap on URLs kept from one query.
const DEFAULT_RESULT_LIMIT: usize = 100;

/// Something that turns an image query into a list of image URLs.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<String>, ProviderError>;
}

/// Image search client configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Search endpoint.
    pub base_url: String,
    /// Regex an `<img src>` must match to count as a result.
    pub host_pattern: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: gridpick/0.x).
    pub user_agent: String,
    /// Maximum URLs kept from one query (default: 100).
    pub result_limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            host_pattern: DEFAULT_HOST_PATTERN.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl From<&AppConfig> for ProviderConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.provider_url.clone(),
            host_pattern: config.thumbnail_host_pattern.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            result_limit: config.results_per_query,
        }
    }
}

/// HTTP image search client.
#[derive(Debug, Clone)]
pub struct ImageSearchClient {
    http: reqwest::Client,
    config: ProviderConfig,
    host_pattern: Arc<Regex>,
}

impl ImageSearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let host_pattern =
            Regex::new(&config.host_pattern).map_err(|e| ProviderError::InvalidPattern(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Network(Arc::new(e)))?;

        Ok(Self { http, config, host_pattern: Arc::new(host_pattern) })
    }

    /// Execute one image search query.
    pub async fn search(&self, query: &ImageQuery) -> Result<Vec<String>, ProviderError> {
        query.validate()?;

        let start = Instant::now();

        tracing::debug!(term = %query.term, filter = ?query.filter, "querying image provider");

        let http_response = self
            .http
            .get(&self.config.base_url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&query.params())
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("image provider response status: {}", status);

        if !status.is_success() {
            return Err(ProviderError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let html = std::str::from_utf8(&bytes).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let urls = extract_image_urls(html, &self.host_pattern, self.config.result_limit);

        tracing::debug!(
            term = %query.term,
            filter = ?query.filter,
            results = urls.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "image search completed"
        );

        Ok(urls)
    }
}

#[async_trait::async_trait]
impl ImageSource for ImageSearchClient {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<String>, ProviderError> {
        ImageSearchClient::search(self, query).await
    }
}
