//! Property tests for backoff strategies.
//!
//! Invariants tested:
//! - Capped exponential backoff never exceeds its cap
//! - Delays are non-decreasing in the attempt number
//! - Extreme attempt numbers never panic or produce non-finite delays

use faultline_retry::{ExponentialBackoff, FixedInterval, IntervalFunction};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: delay never exceeds the configured cap.
    #[test]
    fn exponential_never_exceeds_cap(
        initial_ms in 1u64..=10_000,
        cap_ms in 1u64..=60_000,
        attempt in 0usize..=1_000,
    ) {
        let backoff = ExponentialBackoff::new(Duration::from_millis(initial_ms))
            .max_interval(Duration::from_millis(cap_ms));

        let delay = backoff.next_interval(attempt);
        prop_assert!(delay <= Duration::from_millis(cap_ms));
    }

    /// Property: delay is non-decreasing in the attempt number.
    #[test]
    fn exponential_is_monotone(
        initial_ms in 1u64..=10_000,
        attempt in 0usize..=100,
    ) {
        let backoff = ExponentialBackoff::new(Duration::from_millis(initial_ms))
            .max_interval(Duration::from_secs(3600));

        prop_assert!(backoff.next_interval(attempt) <= backoff.next_interval(attempt + 1));
    }

    /// Property: uncapped backoff with extreme inputs still yields a value.
    #[test]
    fn extreme_attempts_never_panic(
        initial_ms in 1u64..=10_000,
        attempt in 0usize..=usize::MAX,
    ) {
        let backoff = ExponentialBackoff::new(Duration::from_millis(initial_ms));
        let _ = backoff.next_interval(attempt);
    }

    /// Property: fixed interval ignores the attempt number entirely.
    #[test]
    fn fixed_is_attempt_independent(
        interval_ms in 0u64..=60_000,
        a in 0usize..=1_000,
        b in 0usize..=1_000,
    ) {
        let interval = FixedInterval::new(Duration::from_millis(interval_ms));
        prop_assert_eq!(interval.next_interval(a), interval.next_interval(b));
    }
}
