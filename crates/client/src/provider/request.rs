//! Image search request types.

use serde::Serialize;

use super::ProviderError;

/// Narrowing filter applied to an image search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    /// Square aspect ratio only.
    Square,
    /// Animated images only.
    Animated,
    /// Icon-sized images only.
    Icon,
}

impl ImageFilter {
    /// Provider `tbs` parameter value.
    pub fn code(self) -> &'static str {
        match self {
            ImageFilter::Square => "iar:s",
            ImageFilter::Animated => "itp:animated",
            ImageFilter::Icon => "isz:i",
        }
    }
}

/// Queries issued per search, in result order: square first, then unfiltered,
/// animated and icon.
pub const SEARCH_VARIANTS: [Option<ImageFilter>; 4] =
    [Some(ImageFilter::Square), None, Some(ImageFilter::Animated), Some(ImageFilter::Icon)];

/// One image search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    /// Search term with all whitespace removed.
    pub term: String,
    pub filter: Option<ImageFilter>,
}

/// Query string sent to the provider.
#[derive(Debug, Serialize)]
pub(crate) struct QueryParams<'a> {
    q: &'a str,
    source: &'static str,
    tbm: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tbs: Option<&'static str>,
}

impl ImageQuery {
    /// Build a query, collapsing the term by removing whitespace.
    pub fn new(term: &str, filter: Option<ImageFilter>) -> Self {
        let term = term.split_whitespace().collect::<String>();
        Self { term, filter }
    }

    /// Validate the query.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.term.is_empty() {
            return Err(ProviderError::InvalidQuery("query cannot be empty".to_string()));
        }

        if self.term.len() > 400 {
            return Err(ProviderError::InvalidQuery(format!("query too long: {} chars (max 400)", self.term.len())));
        }

        Ok(())
    }

    pub(crate) fn params(&self) -> QueryParams<'_> {
        QueryParams { q: &self.term, source: "lnms", tbm: "isch", tbs: self.filter.map(ImageFilter::code) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_whitespace_removed() {
        let query = ImageQuery::new("  happy \t cows ", None);
        assert_eq!(query.term, "happycows");
    }

    #[test]
    fn test_empty_query() {
        assert!(ImageQuery::new("   ", None).validate().is_err());
        assert!(ImageQuery::new("cats", None).validate().is_ok());
    }

    #[test]
    fn test_query_too_long() {
        let query = ImageQuery::new(&"a".repeat(401), None);
        assert!(matches!(query.validate(), Err(ProviderError::InvalidQuery(_))));
    }

    #[test]
    fn test_filter_codes() {
        assert_eq!(ImageFilter::Square.code(), "iar:s");
        assert_eq!(ImageFilter::Animated.code(), "itp:animated");
        assert_eq!(ImageFilter::Icon.code(), "isz:i");
    }

    #[test]
    fn test_variants_order() {
        assert_eq!(
            SEARCH_VARIANTS,
            [Some(ImageFilter::Square), None, Some(ImageFilter::Animated), Some(ImageFilter::Icon)]
        );
    }

    #[test]
    fn test_params() {
        let query = ImageQuery::new("cats", Some(ImageFilter::Icon));
        let params = query.params();
        assert_eq!(params.q, "cats");
        assert_eq!(params.tbm, "isch");
        assert_eq!(params.tbs, Some("isz:i"));

        assert_eq!(ImageQuery::new("cats", None).params().tbs, None);
    }
}
