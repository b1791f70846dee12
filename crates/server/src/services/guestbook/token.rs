//! Per-entry delete capability tokens.
//!
//! A token is 32 random bytes, URL-safe base64 encoded. Only its SHA-256
//! digest is persisted.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Generate a fresh token and the digest to store alongside the entry.
pub fn issue() -> (String, String) {
    let bytes: [u8; 32] = rand::random();
    let token = URL_SAFE_NO_PAD.encode(bytes);
    let hash = digest(&token);
    (token, hash)
}

/// Digest of a token as stored in `delete_token_hash`.
pub fn digest(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

/// Whether `supplied` is the token whose digest is `stored_hash`.
pub fn matches_digest(supplied: &str, stored_hash: &str) -> bool {
    constant_time_compare(&digest(supplied), stored_hash)
}

/// Whether `supplied` equals the configured moderator secret.
pub fn matches_secret(supplied: &str, secret: &SecretString) -> bool {
    constant_time_compare(supplied, secret.expose_secret())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
    }

    #[test]
    fn test_issued_token_matches_its_digest() {
        let (token, hash) = issue();
        assert_eq!(token.len(), 43);
        assert!(matches_digest(&token, &hash));
        assert!(!matches_digest("1234", &hash));
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = issue();
        let (b, _) = issue();
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches_secret() {
        let secret = SecretString::from("aB3$xY9!mK2@nL5#pQ7&");
        assert!(matches_secret("aB3$xY9!mK2@nL5#pQ7&", &secret));
        assert!(!matches_secret("wrong", &secret));
    }
}
