//! Error taxonomy for token issuance and rotation.
//!
//! Every variant is classified as either caller-attributable
//! ([`ErrorClass::Unauthorized`]) or server-side ([`ErrorClass::Internal`]).
//! The transport exposes nothing but that class; detail stays in the logs.

use crate::jwt::RejectReason;
use rust_common::PlatformError;
use thiserror::Error;

/// Externally visible failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing, invalid, expired or replayed credentials.
    Unauthorized,
    /// Signing, persistence or timeout failures.
    Internal,
}

impl ErrorClass {
    /// Stable label used in metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

/// Token service error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TokenError {
    /// No identity supplied at issuance
    #[error("Identity missing from request")]
    MissingIdentity,

    /// No refresh token supplied at rotation
    #[error("Refresh token missing from request")]
    TokenMissing,

    /// Token parsed but failed signature, algorithm or expiry checks
    #[error("Token rejected: {reason}")]
    TokenRejected {
        /// Which check failed
        reason: RejectReason,
    },

    /// Token could not be parsed at all
    #[error("Token malformed: {0}")]
    TokenMalformed(String),

    /// Presented refresh token does not match the stored slot
    #[error("Refresh credential not verified")]
    CredentialNotVerified,

    /// Signing primitive failure
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// A bounded call ran past its deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Classify this error for the transport.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingIdentity
            | Self::TokenMissing
            | Self::TokenRejected { .. }
            | Self::TokenMalformed(_)
            | Self::CredentialNotVerified => ErrorClass::Unauthorized,
            Self::Signing(_)
            | Self::Storage(_)
            | Self::Timeout(_)
            | Self::Internal(_) => ErrorClass::Internal,
        }
    }

    /// Whether the caller is to blame.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.class(), ErrorClass::Unauthorized)
    }

    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a signing error.
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create a malformed-token error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::TokenMalformed(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<mongodb::error::Error> for TokenError {
    fn from(err: mongodb::error::Error) -> Self {
        TokenError::Storage(err.to_string())
    }
}

impl From<PlatformError> for TokenError {
    fn from(err: PlatformError) -> Self {
        TokenError::Timeout(err.to_string())
    }
}
