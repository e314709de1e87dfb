//! API token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh raw API token.
///
/// Shown to the caller once; only its digest is stored.
#[must_use]
pub fn generate_token() -> String {
    format!("ps_{}{}", Uuid::now_v7().simple(), Uuid::now_v7().simple())
}

/// SHA-256 digest of a raw token, hex-encoded.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn hash_is_stable_and_hex() {
        let hash = hash_token("ps_example");

        assert_eq!(hash, hash_token("ps_example"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
