//! Issuance and rotation of token pairs.
//!
//! [`AuthService`] is the capability the transport depends on;
//! [`AuthOrchestrator`] is the one implementation, composed from a
//! [`TokenSigner`](crate::jwt::TokenSigner) and a
//! [`RefreshCredentialStore`](crate::refresh::RefreshCredentialStore).

pub mod orchestrator;

use crate::config::Config;
use crate::error::TokenError;
use crate::jwt::SignedTokenPair;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

pub use orchestrator::AuthOrchestrator;

/// How `rotate` checks the presented refresh token against the stored slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Check and overwrite in one conditional update.
    ///
    /// Of several concurrent rotations presenting the same token, exactly one
    /// succeeds.
    #[default]
    Atomic,
    /// Check with one call, overwrite with a second.
    ///
    /// Concurrent rotations presenting the same token can all pass the check
    /// before any overwrite lands; each then receives a pair and only the
    /// last writer's refresh token stays valid.
    Sequential,
}

impl RotationMode {
    /// Configuration spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!("unknown rotation mode: {other}")),
        }
    }
}

/// Lifetimes and rotation behaviour applied to every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Rotation check strategy
    pub rotation_mode: RotationMode,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            access_ttl: Duration::from_secs(300),
            refresh_ttl: Duration::from_secs(604_800),
            rotation_mode: RotationMode::Atomic,
        }
    }
}

impl From<&Config> for TokenPolicy {
    fn from(config: &Config) -> Self {
        Self {
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            rotation_mode: config.rotation_mode,
        }
    }
}

/// Token pair issuance and rotation.
pub trait AuthService: Send + Sync + 'static {
    /// Mint a pair for `identity` and make its refresh token the only valid
    /// one.
    ///
    /// # Errors
    ///
    /// [`TokenError::MissingIdentity`] for an empty identity; internal
    /// errors if signing or persistence fails.
    fn issue(
        &self,
        identity: &str,
    ) -> impl Future<Output = Result<SignedTokenPair, TokenError>> + Send;

    /// Exchange a valid refresh token for a fresh pair.
    ///
    /// # Errors
    ///
    /// Unauthorized-class errors when the token is malformed, rejected or
    /// no longer the stored one; internal errors if signing or persistence
    /// fails.
    fn rotate(
        &self,
        presented: &str,
    ) -> impl Future<Output = Result<SignedTokenPair, TokenError>> + Send;
}
