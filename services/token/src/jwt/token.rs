//! Signed token values.

use chrono::{DateTime, Utc};
use std::fmt;

/// A signed, wire-transmissible token and its expiry.
///
/// Immutable once produced. `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl SignedToken {
    pub(crate) fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    /// The compact JWT string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the token stops verifying.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Consume the token, returning the JWT string.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Access and refresh token minted together for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTokenPair {
    /// Short-lived bearer token
    pub access: SignedToken,
    /// Long-lived rotation token
    pub refresh: SignedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let token = SignedToken::new("eyJhbGciOi.secret.part".to_string(), Utc::now());
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
