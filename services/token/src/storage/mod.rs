//! Persistence of per-identity refresh digests.
//!
//! The repository is the only piece that talks to the document store. It
//! never deletes, and "no such user" is an ordinary `None`/`false` outcome.

pub mod memory;
pub mod mongo;

use crate::error::TokenError;
use crate::refresh::TokenDigest;
use std::future::Future;

pub use memory::InMemoryUserRepository;
pub use mongo::MongoUserRepository;

/// Persisted user record: one per identity, at most one refresh digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Identity key
    pub guid: String,
    /// Digest of the currently valid refresh token, absent before first issuance
    pub refresh_token_hash: Option<TokenDigest>,
}

/// Store of [`UserRecord`]s keyed by identity.
pub trait UserRepository: Send + Sync {
    /// Load the record for `guid`.
    fn find_by_guid(
        &self,
        guid: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, TokenError>> + Send;

    /// Set the refresh digest for `guid`, creating the record if absent.
    fn upsert_refresh_hash(
        &self,
        guid: &str,
        digest: &TokenDigest,
    ) -> impl Future<Output = Result<(), TokenError>> + Send;

    /// Set the refresh digest to `replacement` only if it currently equals
    /// `expected`, as one atomic operation.
    ///
    /// Returns whether the record was updated. Never creates a record.
    fn replace_refresh_hash(
        &self,
        guid: &str,
        expected: &TokenDigest,
        replacement: &TokenDigest,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;
}
