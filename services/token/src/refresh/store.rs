//! Hashed, single-slot refresh credential store.

use crate::error::TokenError;
use crate::refresh::hasher::RefreshTokenHasher;
use crate::storage::UserRepository;
use rust_common::with_deadline;
use std::future::Future;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Default deadline for each persistence call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Persists and verifies refresh token secrets by digest.
///
/// "Not verified" covers both an unknown identity and a digest mismatch;
/// callers cannot tell the two apart. Persistence failures are errors, never
/// `false`.
pub trait RefreshCredentialStore: Send + Sync {
    /// Record `secret` as the only valid refresh secret for `identity`.
    fn store(
        &self,
        identity: &str,
        secret: &str,
    ) -> impl Future<Output = Result<(), TokenError>> + Send;

    /// Check `secret` against the slot for `identity`.
    fn verify(
        &self,
        identity: &str,
        secret: &str,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;

    /// Swap the slot from `presented` to `replacement` in one step.
    ///
    /// Returns `false`, leaving the slot untouched, if `presented` is not the
    /// current secret.
    fn replace(
        &self,
        identity: &str,
        presented: &str,
        replacement: &str,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;
}

/// [`RefreshCredentialStore`] that keeps SHA-512 digests in a
/// [`UserRepository`], bounding every call by a deadline.
pub struct HashedCredentialStore<R> {
    repository: R,
    call_timeout: Duration,
}

impl<R: UserRepository> HashedCredentialStore<R> {
    /// Wrap `repository` with the default one-minute call deadline.
    pub fn new(repository: R) -> Self {
        Self::with_timeout(repository, DEFAULT_CALL_TIMEOUT)
    }

    /// Wrap `repository`, bounding each call by `call_timeout`.
    pub fn with_timeout(repository: R, call_timeout: Duration) -> Self {
        Self {
            repository,
            call_timeout,
        }
    }

    /// The wrapped repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: UserRepository> RefreshCredentialStore for HashedCredentialStore<R> {
    async fn store(&self, identity: &str, secret: &str) -> Result<(), TokenError> {
        let digest = RefreshTokenHasher::hash(secret);

        with_deadline(
            "users.upsert_refresh_hash",
            self.call_timeout,
            self.repository.upsert_refresh_hash(identity, &digest),
        )
        .await??;

        debug!(guid = %identity, "Stored refresh digest");
        Ok(())
    }

    async fn verify(&self, identity: &str, secret: &str) -> Result<bool, TokenError> {
        let record = with_deadline(
            "users.find_by_guid",
            self.call_timeout,
            self.repository.find_by_guid(identity),
        )
        .await??;

        let Some(stored) = record.and_then(|r| r.refresh_token_hash) else {
            return Ok(false);
        };

        let presented = RefreshTokenHasher::hash(secret);
        Ok(bool::from(stored.ct_eq(&presented)))
    }

    async fn replace(
        &self,
        identity: &str,
        presented: &str,
        replacement: &str,
    ) -> Result<bool, TokenError> {
        let expected = RefreshTokenHasher::hash(presented);
        let next = RefreshTokenHasher::hash(replacement);

        let swapped = with_deadline(
            "users.replace_refresh_hash",
            self.call_timeout,
            self.repository.replace_refresh_hash(identity, &expected, &next),
        )
        .await??;

        debug!(guid = %identity, swapped, "Compare-and-swap of refresh digest");
        Ok(swapped)
    }
}
