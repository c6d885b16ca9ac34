//! Token signing and verification.
//!
//! A signer owns the process-wide secret and algorithm. Both are fixed at
//! construction and only read afterwards, so one signer is shared by every
//! request without locking.

use crate::config::SigningAlgorithm;
use crate::error::TokenError;
use crate::jwt::claims::Claims;
use crate::jwt::token::SignedToken;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use std::fmt;
use std::time::Duration;

/// Why a well-formed token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Signature does not match the process secret
    BadSignature,
    /// Header names a different algorithm than the configured one
    AlgorithmMismatch,
    /// `exp` is in the past
    Expired,
}

impl RejectReason {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadSignature => "bad_signature",
            Self::AlgorithmMismatch => "algorithm_mismatch",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of verifying a parseable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Signature, algorithm and expiry all check out
    Valid(Claims),
    /// Token parsed but must not be trusted
    Rejected(RejectReason),
}

/// Signs claim sets and verifies inbound tokens.
pub trait TokenSigner: Send + Sync {
    /// Sign a token for `identity` expiring `ttl` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the signing primitive fails.
    fn sign_at(
        &self,
        identity: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, TokenError>;

    /// Sign a token for `identity` expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the signing primitive fails.
    fn sign(&self, identity: &str, ttl: Duration) -> Result<SignedToken, TokenError> {
        self.sign_at(identity, ttl, Utc::now())
    }

    /// Verify a token's algorithm, signature and expiry.
    ///
    /// Failed checks are reported as [`Verification::Rejected`], not as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::TokenMalformed`] for input that is not a JWT and
    /// [`TokenError::Signing`] if the crypto primitive itself fails.
    fn verify(&self, token: &str) -> Result<Verification, TokenError>;

    /// The configured algorithm.
    fn algorithm(&self) -> SigningAlgorithm;
}

/// HMAC signer over `jsonwebtoken`.
pub struct HmacSigner {
    algorithm: SigningAlgorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl HmacSigner {
    /// Create a signer with the process secret and algorithm.
    #[must_use]
    pub fn new(secret: &[u8], algorithm: SigningAlgorithm) -> Self {
        let mut validation = Validation::new(algorithm.to_jwt());
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenSigner for HmacSigner {
    fn sign_at(
        &self,
        identity: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, TokenError> {
        let claims = Claims::new(identity, now, ttl);
        let header = Header::new(self.algorithm.to_jwt());

        let value = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::signing(e.to_string()))?;

        Ok(SignedToken::new(value, claims.expires_at()))
    }

    fn verify(&self, token: &str) -> Result<Verification, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::malformed(e.to_string()))?;
        if header.alg != self.algorithm.to_jwt() {
            return Ok(Verification::Rejected(RejectReason::AlgorithmMismatch));
        }

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(Verification::Valid(data.claims)),
            Err(err) => match err.kind() {
                ErrorKind::InvalidSignature => Ok(Verification::Rejected(RejectReason::BadSignature)),
                ErrorKind::ExpiredSignature => Ok(Verification::Rejected(RejectReason::Expired)),
                ErrorKind::InvalidAlgorithm => {
                    Ok(Verification::Rejected(RejectReason::AlgorithmMismatch))
                }
                ErrorKind::Crypto(_) => Err(TokenError::signing(err.to_string())),
                _ => Err(TokenError::malformed(err.to_string())),
            },
        }
    }

    fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only";

    fn signer() -> HmacSigner {
        HmacSigner::new(SECRET, SigningAlgorithm::HS512)
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let token = signer.sign("user-123", Duration::from_secs(300)).unwrap();

        match signer.verify(token.value()).unwrap() {
            Verification::Valid(claims) => {
                assert_eq!(claims.guid, "user-123");
                assert_eq!(claims.exp, token.expires_at().timestamp());
            }
            other => panic!("expected valid token, got {other:?}"),
        }
    }

    #[test]
    fn test_expiry_is_now_plus_ttl() {
        let signer = signer();
        let now = Utc::now();
        let token = signer.sign_at("user-123", Duration::from_secs(604_800), now).unwrap();

        assert_eq!(token.expires_at().timestamp(), now.timestamp() + 604_800);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = HmacSigner::new(b"secret-A", SigningAlgorithm::HS512)
            .sign("user-123", Duration::from_secs(300))
            .unwrap();

        let result = HmacSigner::new(b"secret-B", SigningAlgorithm::HS512)
            .verify(token.value())
            .unwrap();
        assert_eq!(result, Verification::Rejected(RejectReason::BadSignature));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let token = HmacSigner::new(SECRET, SigningAlgorithm::HS256)
            .sign("user-123", Duration::from_secs(300))
            .unwrap();

        let result = signer().verify(token.value()).unwrap();
        assert_eq!(result, Verification::Rejected(RejectReason::AlgorithmMismatch));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let issued = Utc::now() - chrono::Duration::minutes(10);
        let token = signer.sign_at("user-123", Duration::from_secs(300), issued).unwrap();

        let result = signer.verify(token.value()).unwrap();
        assert_eq!(result, Verification::Rejected(RejectReason::Expired));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = signer().verify("definitely-not-a-jwt").unwrap_err();
        assert!(matches!(err, TokenError::TokenMalformed(_)));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_unsigned_token_rejected() {
        // {"alg":"none","typ":"JWT"}
        let forged = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJndWlkIjoidXNlci0xMjMiLCJleHAiOjk5OTk5OTk5OTl9.";
        let result = signer().verify(forged);
        assert!(!matches!(result, Ok(Verification::Valid(_))));
    }

    #[test]
    fn test_algorithm_accessor() {
        assert_eq!(signer().algorithm(), SigningAlgorithm::HS512);
    }
}
