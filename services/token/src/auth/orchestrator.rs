//! Composition of signing and credential storage into issue / rotate.

use crate::auth::{AuthService, RotationMode, TokenPolicy};
use crate::error::TokenError;
use crate::jwt::{SignedTokenPair, TokenSigner, Verification};
use crate::metrics;
use crate::refresh::RefreshCredentialStore;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Issues and rotates token pairs.
///
/// Holds no per-request state; share one instance behind an `Arc`.
pub struct AuthOrchestrator<S, C> {
    signer: S,
    credentials: C,
    policy: TokenPolicy,
}

impl<S, C> AuthOrchestrator<S, C>
where
    S: TokenSigner,
    C: RefreshCredentialStore,
{
    /// Create an orchestrator from its collaborators.
    pub fn new(signer: S, credentials: C, policy: TokenPolicy) -> Self {
        Self {
            signer,
            credentials,
            policy,
        }
    }

    /// Signer used for minting and verification.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Refresh credential store.
    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Lifetimes and rotation mode in force.
    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Sign an access and a refresh token sharing one clock reading.
    fn generate_pair(&self, identity: &str) -> Result<SignedTokenPair, TokenError> {
        let now = Utc::now();
        let access = self.signer.sign_at(identity, self.policy.access_ttl, now)?;
        let refresh = self.signer.sign_at(identity, self.policy.refresh_ttl, now)?;
        Ok(SignedTokenPair { access, refresh })
    }

    async fn issue_pair(&self, identity: &str) -> Result<SignedTokenPair, TokenError> {
        if identity.is_empty() {
            return Err(TokenError::MissingIdentity);
        }

        let pair = self.generate_pair(identity)?;
        self.credentials.store(identity, pair.refresh.value()).await?;

        info!(guid = %identity, "Issued token pair");
        Ok(pair)
    }

    async fn rotate_pair(&self, presented: &str) -> Result<SignedTokenPair, TokenError> {
        if presented.is_empty() {
            return Err(TokenError::TokenMissing);
        }

        let claims = match self.signer.verify(presented)? {
            Verification::Valid(claims) => claims,
            Verification::Rejected(reason) => {
                warn!(%reason, "Refresh token rejected");
                return Err(TokenError::TokenRejected { reason });
            }
        };
        let identity = claims.guid.as_str();

        let pair = match self.policy.rotation_mode {
            RotationMode::Sequential => {
                if !self.credentials.verify(identity, presented).await? {
                    warn!(guid = %identity, "Refresh token does not match stored credential");
                    return Err(TokenError::CredentialNotVerified);
                }
                let pair = self.generate_pair(identity)?;
                self.credentials.store(identity, pair.refresh.value()).await?;
                pair
            }
            RotationMode::Atomic => {
                let pair = self.generate_pair(identity)?;
                let swapped = self
                    .credentials
                    .replace(identity, presented, pair.refresh.value())
                    .await?;
                if !swapped {
                    warn!(guid = %identity, "Refresh token does not match stored credential");
                    return Err(TokenError::CredentialNotVerified);
                }
                pair
            }
        };

        info!(guid = %identity, mode = %self.policy.rotation_mode, "Rotated token pair");
        Ok(pair)
    }

    fn observe(&self, operation: &str, started: Instant, result: &Result<SignedTokenPair, TokenError>) {
        metrics::record_latency(operation, started.elapsed().as_secs_f64());
        match result {
            Ok(_) => metrics::record_tokens_issued(operation, self.signer.algorithm().as_str()),
            Err(err) => metrics::record_failure(operation, err.class().as_str()),
        }
    }
}

impl<S, C> AuthService for AuthOrchestrator<S, C>
where
    S: TokenSigner + 'static,
    C: RefreshCredentialStore + 'static,
{
    #[instrument(skip(self), fields(operation = "issue"))]
    async fn issue(&self, identity: &str) -> Result<SignedTokenPair, TokenError> {
        let started = Instant::now();
        let result = self.issue_pair(identity).await;
        self.observe("issue", started, &result);
        result
    }

    #[instrument(skip_all, fields(operation = "rotate"))]
    async fn rotate(&self, presented: &str) -> Result<SignedTokenPair, TokenError> {
        let started = Instant::now();
        let result = self.rotate_pair(presented).await;
        self.observe("rotate", started, &result);
        result
    }
}
