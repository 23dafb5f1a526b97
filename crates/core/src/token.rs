//! Compact addresses for individual cached results.
//!
//! A token is three slug letters, a literal lowercase `x`, and a two-digit
//! absolute index into a session's result list, e.g. `ABCx07`. Anything not
//! shaped exactly like that is "not a token", which lets callers tell tokens
//! apart from ordinary URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Number of result indices a two-digit token can address.
pub const TOKEN_INDEX_LIMIT: usize = 100;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{3})x([0-9]{2})$").expect("invalid token pattern"));

/// Address of one cached result: a session slug plus an absolute index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub slug: String,
    pub index: usize,
}

impl Token {
    pub fn new(slug: impl Into<String>, index: usize) -> Self {
        Self { slug: slug.into(), index }
    }

    /// Render the token as `{slug}x{index:02}`.
    ///
    /// Indices at or above [`TOKEN_INDEX_LIMIT`] render with three digits and
    /// will not decode again.
    pub fn encode(&self) -> String {
        format!("{}x{:02}", self.slug, self.index)
    }

    /// Parse a token, normalizing the slug to uppercase.
    ///
    /// Returns `None` for anything that is not exactly three ASCII letters,
    /// `x`, and two ASCII digits.
    pub fn decode(input: &str) -> Option<Self> {
        let caps = TOKEN_PATTERN.captures(input)?;
        let slug = caps[1].to_ascii_uppercase();
        let index = caps[2].parse().ok()?;
        Some(Self { slug, index })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{:02}", self.slug, self.index)
    }
}

/// Caption label for the result at `index` in the session named `slug`.
pub fn label(slug: &str, index: usize) -> String {
    Token::new(slug, index).encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_index() {
        assert_eq!(Token::new("ABC", 7).encode(), "ABCx07");
        assert_eq!(Token::new("ABC", 0).encode(), "ABCx00");
        assert_eq!(Token::new("ABC", 99).encode(), "ABCx99");
        assert_eq!(label("XYZ", 23), "XYZx23");
    }

    #[test]
    fn test_roundtrip_full_index_range() {
        for index in 0..TOKEN_INDEX_LIMIT {
            let token = Token::new("HJK", index);
            assert_eq!(Token::decode(&token.encode()), Some(token));
        }
    }

    #[test]
    fn test_decode_uppercases_slug() {
        let token = Token::decode("abcx12").unwrap();
        assert_eq!(token.slug, "ABC");
        assert_eq!(token.index, 12);
    }

    #[test]
    fn test_decode_rejects_non_tokens() {
        for input in [
            "",
            "ABCx7",
            "ABCx007",
            "ABx07",
            "ABCDx07",
            "ABCX07",
            "AB1x07",
            "ABC-07",
            " ABCx07",
            "ABCx07 ",
            "ABCx07\n",
            "ABCx٠٧",
            "https://example.com/ABCx07",
        ] {
            assert_eq!(Token::decode(input), None, "{input:?} should not decode");
        }
    }

    #[test]
    fn test_out_of_range_index_does_not_decode() {
        let encoded = Token::new("ABC", 100).encode();
        assert_eq!(encoded, "ABCx100");
        assert_eq!(Token::decode(&encoded), None);
    }

    #[test]
    fn test_display_matches_encode() {
        let token = Token::new("QRS", 5);
        assert_eq!(token.to_string(), token.encode());
    }
}
