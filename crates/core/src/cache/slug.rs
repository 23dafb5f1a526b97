//! Short human-typable session slugs.

use rand::Rng;

use crate::Error;

/// Slug symbols. `I` and `O` are left out as ambiguous, `X` because it separates tokens.
pub const SLUG_ALPHABET: &[u8; 23] = b"ABCDEFGHJKLMNPQRSTUVWYZ";

pub const SLUG_LEN: usize = 3;

/// Draws attempted before giving up on finding a free slug.
pub const MAX_SLUG_ATTEMPTS: usize = 1000;

/// Draw one slug uniformly from the alphabet.
pub fn random_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SLUG_LEN)
        .map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}

/// Draw slugs until one is not `taken`.
///
/// # Errors
///
/// Returns `Error::SlugSpaceExhausted` after [`MAX_SLUG_ATTEMPTS`] taken draws.
pub fn unique_slug<R, F>(rng: &mut R, mut taken: F) -> Result<String, Error>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for _ in 0..MAX_SLUG_ATTEMPTS {
        let candidate = random_slug(rng);
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(Error::SlugSpaceExhausted { attempts: MAX_SLUG_ATTEMPTS })
}
