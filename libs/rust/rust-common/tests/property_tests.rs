//! Property-based tests for rust-common crate.
//!
//! These tests verify universal properties across all inputs using proptest.

use proptest::prelude::*;
use rust_common::{PlatformError, with_deadline};
use std::time::Duration;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_timeout_names_operation(operation in "[a-z_.]{1,32}", secs in 1u64..600) {
        let err = PlatformError::timeout(operation.clone(), Duration::from_secs(secs));
        prop_assert!(err.to_string().contains(&operation));
        prop_assert_eq!(err.operation(), operation.as_str());
    }

    #[test]
    fn prop_ready_futures_beat_any_deadline(value in any::<u64>(), millis in 1u64..10_000) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(with_deadline(
            "ready",
            Duration::from_millis(millis),
            async move { value },
        ));
        prop_assert_eq!(result.unwrap(), value);
    }
}
