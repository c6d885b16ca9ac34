//! SHA-512 digests of refresh tokens.

use sha2::{Digest, Sha512};
use std::fmt;
use subtle::ConstantTimeEq;

/// Length of a refresh token digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// SHA-512 digest of a refresh token string.
///
/// Equality is constant-time.
#[derive(Clone)]
pub struct TokenDigest([u8; DIGEST_LEN]);

impl TokenDigest {
    /// Rebuild a digest from stored bytes.
    ///
    /// Returns `None` if `bytes` is not exactly [`DIGEST_LEN`] long.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; DIGEST_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Raw digest bytes, as persisted.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for TokenDigest {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for TokenDigest {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for TokenDigest {}

impl fmt::Debug for TokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenDigest(..)")
    }
}

/// One-way hashing of refresh token secrets.
///
/// Unsalted: the input is a high-entropy signed token, and lookups need the
/// same input to always produce the same digest.
pub struct RefreshTokenHasher;

impl RefreshTokenHasher {
    /// Digest `token`.
    #[must_use]
    pub fn hash(token: &str) -> TokenDigest {
        let mut hasher = Sha512::new();
        hasher.update(token.as_bytes());

        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&hasher.finalize());
        TokenDigest(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let token = "test-token";
        let hash1 = RefreshTokenHasher::hash(token);
        let hash2 = RefreshTokenHasher::hash(token);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_different_for_different_tokens() {
        let hash1 = RefreshTokenHasher::hash("token1");
        let hash2 = RefreshTokenHasher::hash("token2");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let digest = RefreshTokenHasher::hash("token1");
        assert_eq!(digest.as_bytes().len(), DIGEST_LEN);
        assert_ne!(&digest.as_bytes()[..6], b"token1");
    }

    #[test]
    fn test_from_slice_checks_length() {
        let digest = RefreshTokenHasher::hash("token1");
        assert_eq!(TokenDigest::from_slice(digest.as_bytes()), Some(digest));
        assert_eq!(TokenDigest::from_slice(&[0u8; 32]), None);
    }
}
