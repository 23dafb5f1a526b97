//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GRIDPICK_*)
//! 2. TOML config file (if GRIDPICK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GRIDPICK_*)
/// 2. TOML config file (if GRIDPICK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Image search endpoint queried with `q`, `tbm` and `tbs` parameters.
    ///
    /// Set via GRIDPICK_PROVIDER_URL environment variable.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Regex an `<img src>` must match to count as a result thumbnail.
    ///
    /// Set via GRIDPICK_THUMBNAIL_HOST_PATTERN environment variable.
    #[serde(default = "default_thumbnail_host_pattern")]
    pub thumbnail_host_pattern: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via GRIDPICK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per thumbnail.
    ///
    /// Set via GRIDPICK_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds, for provider queries and thumbnail fetches.
    ///
    /// Set via GRIDPICK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum URLs kept from a single provider query.
    ///
    /// Set via GRIDPICK_RESULTS_PER_QUERY environment variable.
    #[serde(default = "default_results_per_query")]
    pub results_per_query: usize,

    /// Session lifetime in seconds.
    ///
    /// Set via GRIDPICK_SESSION_TTL_SECS environment variable.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Interval between background session sweeps in seconds.
    ///
    /// Set via GRIDPICK_SWEEP_INTERVAL_SECS environment variable.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Maximum concurrent thumbnail downloads per grid.
    ///
    /// Set via GRIDPICK_RENDER_CONCURRENCY environment variable.
    #[serde(default = "default_render_concurrency")]
    pub render_concurrency: usize,
}

fn default_provider_url() -> String {
    "https://www.google.com/search".into()
}

fn default_thumbnail_host_pattern() -> String {
    r"gstatic\.com".into()
}

fn default_user_agent() -> String {
    "gridpick/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_results_per_query() -> usize {
    100
}

fn default_session_ttl_secs() -> u64 {
    300
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_render_concurrency() -> usize {
    8
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            thumbnail_host_pattern: default_thumbnail_host_pattern(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            results_per_query: default_results_per_query(),
            session_ttl_secs: default_session_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            render_concurrency: default_render_concurrency(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GRIDPICK_`
    /// 2. TOML file from `GRIDPICK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GRIDPICK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GRIDPICK_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
