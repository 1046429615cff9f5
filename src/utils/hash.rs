//! Content hashing utilities.

use crate::model::SlideToken;
use xxhash_rust::xxh3::Xxh3;

/// Order-sensitive hash over a token sequence
pub fn fingerprint_tokens<'a>(tokens: impl IntoIterator<Item = &'a SlideToken>) -> u64 {
    let mut hasher = Xxh3::new();
    let mut count: u64 = 0;
    for token in tokens {
        hasher.update(token.as_bytes());
        count += 1;
    }
    hasher.update(&count.to_le_bytes());
    hasher.digest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_empty_is_stable() {
        let empty: [SlideToken; 0] = [];
        assert_eq!(fingerprint_tokens(&empty), fingerprint_tokens(&empty));
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        let a = SlideToken::of_content(b"a");
        let b = SlideToken::of_content(b"b");
        assert_ne!(fingerprint_tokens(&[a, b]), fingerprint_tokens(&[b, a]));
        assert_ne!(fingerprint_tokens(&[a]), fingerprint_tokens(&[a, a]));
    }
}
