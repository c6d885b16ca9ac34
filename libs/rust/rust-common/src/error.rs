//! Error type shared by platform helpers.

use std::time::Duration;
use thiserror::Error;

/// Failure of a platform helper.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Operation did not complete within its deadline
    #[error("Operation {operation} timed out after {after:?}")]
    Timeout {
        /// Name of the operation that was abandoned
        operation: String,
        /// The deadline that elapsed
        after: Duration,
    },
}

impl PlatformError {
    /// Create a timeout error for the given operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    /// use std::time::Duration;
    ///
    /// let err = PlatformError::timeout("users.find_one", Duration::from_secs(60));
    /// assert_eq!(err.operation(), "users.find_one");
    /// ```
    #[must_use]
    pub fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after,
        }
    }

    /// Name of the operation that failed.
    #[must_use]
    pub fn operation(&self) -> &str {
        match self {
            Self::Timeout { operation, .. } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::timeout("users.find_one", Duration::from_secs(60));
        assert_eq!(err.to_string(), "Operation users.find_one timed out after 60s");
    }

    #[test]
    fn test_operation_name() {
        let err = PlatformError::timeout("users.update_one", Duration::from_millis(250));
        assert_eq!(err.operation(), "users.update_one");
    }
}
