//! Per-call deadlines for outbound I/O.

use crate::error::PlatformError;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Run `future` to completion or abandon it once `limit` elapses.
///
/// The future is dropped on expiry, so any I/O it owns is cancelled
/// cooperatively rather than left running in the background.
///
/// # Errors
///
/// Returns [`PlatformError::Timeout`] naming `operation` when the deadline
/// elapses first.
pub async fn with_deadline<F, T>(
    operation: &str,
    limit: Duration,
    future: F,
) -> Result<T, PlatformError>
where
    F: Future<Output = T>,
{
    timeout(limit, future)
        .await
        .map_err(|_| PlatformError::timeout(operation, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let value = with_deadline("noop", Duration::from_secs(1), async { 7 })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_deadline_is_timeout() {
        let result = with_deadline(
            "users.find_one",
            Duration::from_secs(60),
            std::future::pending::<()>(),
        )
        .await;

        match result {
            Err(PlatformError::Timeout { operation, after }) => {
                assert_eq!(operation, "users.find_one");
                assert_eq!(after, Duration::from_secs(60));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
