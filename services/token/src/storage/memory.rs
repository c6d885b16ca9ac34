//! In-process repository for tests and local development.

use crate::error::TokenError;
use crate::refresh::TokenDigest;
use crate::storage::{UserRecord, UserRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// `HashMap`-backed [`UserRepository`].
///
/// The write lock makes `replace_refresh_hash` atomic.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, Option<TokenDigest>>>,
    writes: AtomicUsize,
}

impl InMemoryUserRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Drop every record, as if the backing store had been reset.
    pub async fn clear(&self) {
        self.users.write().await.clear();
    }

    /// Number of stored identities.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no identity is stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_guid(&self, guid: &str) -> Result<Option<UserRecord>, TokenError> {
        let users = self.users.read().await;
        Ok(users.get(guid).map(|digest| UserRecord {
            guid: guid.to_string(),
            refresh_token_hash: digest.clone(),
        }))
    }

    async fn upsert_refresh_hash(&self, guid: &str, digest: &TokenDigest) -> Result<(), TokenError> {
        self.users
            .write()
            .await
            .insert(guid.to_string(), Some(digest.clone()));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn replace_refresh_hash(
        &self,
        guid: &str,
        expected: &TokenDigest,
        replacement: &TokenDigest,
    ) -> Result<bool, TokenError> {
        let mut users = self.users.write().await;
        match users.get_mut(guid) {
            Some(slot) if slot.as_ref() == Some(expected) => {
                *slot = Some(replacement.clone());
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::RefreshTokenHasher;

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_guid("nobody").await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() {
        let repo = InMemoryUserRepository::new();
        let first = RefreshTokenHasher::hash("first");
        let second = RefreshTokenHasher::hash("second");

        repo.upsert_refresh_hash("user-1", &first).await.unwrap();
        repo.upsert_refresh_hash("user-1", &second).await.unwrap();

        let record = repo.find_by_guid("user-1").await.unwrap().unwrap();
        assert_eq!(record.refresh_token_hash, Some(second));
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_replace_requires_expected_digest() {
        let repo = InMemoryUserRepository::new();
        let current = RefreshTokenHasher::hash("current");
        let stale = RefreshTokenHasher::hash("stale");
        let next = RefreshTokenHasher::hash("next");

        repo.upsert_refresh_hash("user-1", &current).await.unwrap();

        assert!(!repo.replace_refresh_hash("user-1", &stale, &next).await.unwrap());
        assert!(repo.replace_refresh_hash("user-1", &current, &next).await.unwrap());
        assert!(!repo.replace_refresh_hash("user-1", &current, &next).await.unwrap());

        let record = repo.find_by_guid("user-1").await.unwrap().unwrap();
        assert_eq!(record.refresh_token_hash, Some(next));
    }

    #[tokio::test]
    async fn test_replace_never_creates() {
        let repo = InMemoryUserRepository::new();
        let a = RefreshTokenHasher::hash("a");
        let b = RefreshTokenHasher::hash("b");

        assert!(!repo.replace_refresh_hash("ghost", &a, &b).await.unwrap());
        assert!(repo.find_by_guid("ghost").await.unwrap().is_none());
        assert_eq!(repo.write_count(), 0);
    }
}
