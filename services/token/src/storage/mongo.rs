//! MongoDB-backed user repository.

use crate::error::TokenError;
use crate::refresh::TokenDigest;
use crate::storage::{UserRecord, UserRepository};
use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{Binary, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const USERS_COLLECTION: &str = "users";

/// Document layout of the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<Binary>,
}

impl TryFrom<UserDocument> for UserRecord {
    type Error = TokenError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let refresh_token_hash = match doc.refresh_token {
            Some(bin) => Some(TokenDigest::from_slice(&bin.bytes).ok_or_else(|| {
                TokenError::storage(format!(
                    "stored refresh digest for {} has length {}",
                    doc.guid,
                    bin.bytes.len()
                ))
            })?),
            None => None,
        };

        Ok(UserRecord {
            guid: doc.guid,
            refresh_token_hash,
        })
    }
}

fn to_binary(digest: &TokenDigest) -> Binary {
    Binary {
        subtype: BinarySubtype::Generic,
        bytes: digest.as_bytes().to_vec(),
    }
}

/// Connect to MongoDB and verify the primary answers.
///
/// # Errors
///
/// Returns [`TokenError::Storage`] if the URI is invalid or the ping fails.
pub async fn connect(uri: &str, database: &str) -> Result<Database, TokenError> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database);

    db.run_command(doc! { "ping": 1 }).await?;

    info!(database = %database, "Connected to MongoDB");
    Ok(db)
}

/// [`UserRepository`] over the `users` collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Repository over the `users` collection of `db`.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
        }
    }

    /// Create the unique index on `guid`. Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Storage`] if index creation fails.
    pub async fn ensure_indexes(&self) -> Result<(), TokenError> {
        let index = IndexModel::builder()
            .keys(doc! { "guid": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users.create_index(index).await?;
        debug!(collection = USERS_COLLECTION, "Ensured unique guid index");
        Ok(())
    }
}

impl UserRepository for MongoUserRepository {
    async fn find_by_guid(&self, guid: &str) -> Result<Option<UserRecord>, TokenError> {
        self.users
            .find_one(doc! { "guid": guid })
            .await?
            .map(UserRecord::try_from)
            .transpose()
    }

    async fn upsert_refresh_hash(&self, guid: &str, digest: &TokenDigest) -> Result<(), TokenError> {
        self.users
            .update_one(
                doc! { "guid": guid },
                doc! { "$set": { "refresh_token": to_binary(digest) } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn replace_refresh_hash(
        &self,
        guid: &str,
        expected: &TokenDigest,
        replacement: &TokenDigest,
    ) -> Result<bool, TokenError> {
        let result = self
            .users
            .update_one(
                doc! { "guid": guid, "refresh_token": to_binary(expected) },
                doc! { "$set": { "refresh_token": to_binary(replacement) } },
            )
            .await?;
        Ok(result.matched_count == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::RefreshTokenHasher;

    #[test]
    fn test_document_without_digest() {
        let record = UserRecord::try_from(UserDocument {
            guid: "user-1".to_string(),
            refresh_token: None,
        })
        .unwrap();

        assert_eq!(record.guid, "user-1");
        assert!(record.refresh_token_hash.is_none());
    }

    #[test]
    fn test_document_with_digest() {
        let digest = RefreshTokenHasher::hash("refresh");
        let record = UserRecord::try_from(UserDocument {
            guid: "user-1".to_string(),
            refresh_token: Some(to_binary(&digest)),
        })
        .unwrap();

        assert_eq!(record.refresh_token_hash, Some(digest));
    }

    #[test]
    fn test_truncated_digest_is_storage_error() {
        let err = UserRecord::try_from(UserDocument {
            guid: "user-1".to_string(),
            refresh_token: Some(Binary {
                subtype: BinarySubtype::Generic,
                bytes: vec![1, 2, 3],
            }),
        })
        .unwrap_err();

        assert!(matches!(err, TokenError::Storage(_)));
    }
}
