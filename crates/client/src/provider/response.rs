//! Result page scraping.

use regex::Regex;
use scraper::{Html, Selector};

/// Collect `<img src>` values matching `host_pattern`, in document order, keeping at most `limit`.
///
/// Duplicates are kept; deduplication happens across all query variants.
pub fn extract_image_urls(html: &str, host_pattern: &Regex, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img[src]").expect("invalid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| host_pattern.is_match(src))
        .take(limit)
        .map(str::to_string)
        .collect()
}
