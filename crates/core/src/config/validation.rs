//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `provider_url` is not an http(s) URL
    /// - `thumbnail_host_pattern` does not compile
    /// - `user_agent` is empty
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `results_per_query` is outside 1..=100
    /// - `session_ttl_secs` or `sweep_interval_secs` is 0
    /// - `render_concurrency` is outside 1..=64
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.provider_url.starts_with("https://") || self.provider_url.starts_with("http://")) {
            return Err(invalid("provider_url", "must be an http or https URL"));
        }

        if let Err(e) = regex::Regex::new(&self.thumbnail_host_pattern) {
            return Err(invalid("thumbnail_host_pattern", e.to_string()));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if !(1..=100).contains(&self.results_per_query) {
            return Err(invalid("results_per_query", "must be between 1 and 100"));
        }

        if self.session_ttl_secs == 0 {
            return Err(invalid("session_ttl_secs", "must be greater than 0"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(invalid("sweep_interval_secs", "must be greater than 0"));
        }

        if !(1..=64).contains(&self.render_concurrency) {
            return Err(invalid("render_concurrency", "must be between 1 and 64"));
        }

        if self.sweep_interval_secs > self.session_ttl_secs {
            tracing::warn!(
                sweep_interval_secs = self.sweep_interval_secs,
                session_ttl_secs = self.session_ttl_secs,
                "sweep interval exceeds session TTL; expired sessions linger until the next cache call"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: AppConfig, expected: &str) {
        let result = config.validate();
        assert!(
            matches!(&result, Err(ConfigError::Invalid { field, .. }) if field == expected),
            "expected {expected} to be rejected, got {result:?}"
        );
    }

    #[test]
    fn test_validate_default_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_provider_url() {
        assert_invalid(AppConfig { provider_url: "ftp://example.com".into(), ..Default::default() }, "provider_url");
    }

    #[test]
    fn test_validate_thumbnail_pattern() {
        assert_invalid(
            AppConfig { thumbnail_host_pattern: "gstatic(".into(), ..Default::default() },
            "thumbnail_host_pattern",
        );
    }

    #[test]
    fn test_validate_empty_user_agent() {
        assert_invalid(AppConfig { user_agent: String::new(), ..Default::default() }, "user_agent");
    }

    #[test]
    fn test_validate_max_bytes() {
        assert_invalid(AppConfig { max_bytes: 0, ..Default::default() }, "max_bytes");
        assert_invalid(AppConfig { max_bytes: 51 * 1024 * 1024, ..Default::default() }, "max_bytes");
    }

    #[test]
    fn test_validate_timeout() {
        assert_invalid(AppConfig { timeout_ms: 50, ..Default::default() }, "timeout_ms");
        assert_invalid(AppConfig { timeout_ms: 301_000, ..Default::default() }, "timeout_ms");
    }

    #[test]
    fn test_validate_results_per_query() {
        assert_invalid(AppConfig { results_per_query: 0, ..Default::default() }, "results_per_query");
        assert_invalid(AppConfig { results_per_query: 101, ..Default::default() }, "results_per_query");
    }

    #[test]
    fn test_validate_intervals() {
        assert_invalid(AppConfig { session_ttl_secs: 0, ..Default::default() }, "session_ttl_secs");
        assert_invalid(AppConfig { sweep_interval_secs: 0, ..Default::default() }, "sweep_interval_secs");
    }

    #[test]
    fn test_validate_render_concurrency() {
        assert_invalid(AppConfig { render_concurrency: 0, ..Default::default() }, "render_concurrency");
        assert_invalid(AppConfig { render_concurrency: 65, ..Default::default() }, "render_concurrency");
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            max_bytes: 1,
            timeout_ms: 100,
            results_per_query: 1,
            session_ttl_secs: 1,
            sweep_interval_secs: 1,
            render_concurrency: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_values() {
        let config = AppConfig {
            max_bytes: 50 * 1024 * 1024,
            timeout_ms: 300_000,
            results_per_query: 100,
            render_concurrency: 64,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
