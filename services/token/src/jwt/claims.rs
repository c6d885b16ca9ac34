//! Claim set shared by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Claim set carried by both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Caller identity the token was issued for
    pub guid: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Unique token id; keeps same-second tokens distinct
    pub jti: String,
}

impl Claims {
    /// Build claims expiring `ttl` after `issued_at`.
    pub fn new(guid: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Claims {
            guid: guid.into(),
            exp: iat.saturating_add(ttl_secs),
            iat,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Expiry as an instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let now = Utc::now();
        let claims = Claims::new("user-123", now, Duration::from_secs(300));

        assert_eq!(claims.guid, "user-123");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 300);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_same_second_claims_differ() {
        let now = Utc::now();
        let a = Claims::new("user-123", now, Duration::from_secs(300));
        let b = Claims::new("user-123", now, Duration::from_secs(300));

        assert_eq!(a.exp, b.exp);
        assert_ne!(a.jti, b.jti);
        assert_ne!(a, b);
    }
}
