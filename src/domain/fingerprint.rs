//! Content fingerprinting for duplicate-upload suppression.
//!
//! A fast, non-cryptographic 64-bit digest. Two different payloads hashing
//! equal is an accepted missed-update edge case; the fingerprint exists to
//! detect "no real change", not to authenticate content.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fingerprint raw file content for change detection.
#[must_use]
pub fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_content_matches() {
        let a = r#"{"bid":1.0842,"ask":1.0844}"#;
        assert_eq!(fingerprint(a), fingerprint(a));
    }

    #[test]
    fn changed_content_differs() {
        assert_ne!(
            fingerprint(r#"{"bid":1.0842}"#),
            fingerprint(r#"{"bid":1.0843}"#),
        );
    }

    #[test]
    fn whitespace_is_significant() {
        // A touched mtime with identical bytes must dedup; reformatted
        // bytes count as a change and get uploaded.
        assert_ne!(fingerprint("{\"a\":1}"), fingerprint("{ \"a\": 1 }"));
    }
}
