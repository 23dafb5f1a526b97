//! HTTP fetch pipeline for result thumbnails.
//!
//! ### URL Canonicalization
//! - Trim whitespace, resolve protocol-relative URLs to `https`
//! - Reject non-http(s) schemes such as inline `data:` images
//! - Remove fragments, preserve query string
//!
//! ### Limits
//! - Per-request timeout (default 20s)
//! - Max redirects: 5
//! - Max body bytes: 5MB (configurable)

pub mod url;

use bytes::Bytes;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize};

use gridpick_core::{AppConfig, Error};

/// Source of raw thumbnail bytes.
///
/// The HTTP implementation is [`FetchClient`]; tests substitute in-memory fakes.
#[async_trait::async_trait]
pub trait ThumbnailFetcher: Send + Sync {
    /// Download the image at `url`.
    async fn fetch_image(&self, url: &str) -> Result<Bytes, Error>;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "gridpick/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "gridpick/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// HTTP client for downloading thumbnails with size and time limits.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning the raw body.
    ///
    /// Non-success statuses and bodies over `max_bytes` are errors.
    pub async fn fetch(&self, url_str: &str) -> Result<Bytes, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "image/avif,image/webp,image/png,image/jpeg,image/gif,image/*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(url.to_string())
                } else {
                    Error::HttpError(format!("network error: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} for {}", status.as_u16(), url)));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                Error::FetchTimeout(url.to_string())
            } else {
                Error::HttpError(format!("failed to read response: {}", e))
            }
        })?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!(url = %url, bytes = bytes.len(), fetch_ms = start.elapsed().as_millis() as u64, "fetched thumbnail");

        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ThumbnailFetcher for FetchClient {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, Error> {
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "gridpick/0.1");
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: "test-agent".into(), max_bytes: 1024, timeout_ms: 500, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.max_redirects, 5);
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_rejects_data_uri_without_network() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let result = client.fetch("data:image/png;base64,iVBORw0KGgo=").await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
