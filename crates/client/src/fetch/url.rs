//! Normalization of scraped image URLs before fetching.

/// Error type for image URL normalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Normalize an image URL as it appears in a result page or a cached session.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Resolve protocol-relative `//host/...` references to https
/// 3. Require an absolute http(s) URL (inline `data:` images are rejected)
/// 4. Remove fragment (#...)
/// 5. Keep query string intact; thumbnail hosts key images by it
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = match trimmed.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => trimmed.to_string(),
    };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::InvalidUrl(format!("missing host: {trimmed}")));
    }

    parsed.set_fragment(None);

    Ok(parsed)
}
