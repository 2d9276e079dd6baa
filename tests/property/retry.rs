//! Property tests for the retry policy.
//!
//! Invariants tested:
//! - Never retries while offline, whatever the attempt or error
//! - Never retries at or beyond the attempt cap
//! - A non-retry decision always carries a zero delay

use faultline_connectivity::ConnectivityState;
use faultline_retry::RetryPolicy;
use proptest::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
struct TestError {
    transient: bool,
}

fn connectivity(connected: bool, reachable: bool) -> ConnectivityState {
    ConnectivityState {
        connected,
        reachable,
        kind: "wifi".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: offline (not connected or not reachable) never retries.
    #[test]
    fn offline_never_retries(
        attempt in 0usize..=100,
        transient in any::<bool>(),
        connected in any::<bool>(),
        reachable in any::<bool>(),
    ) {
        prop_assume!(!(connected && reachable));

        let policy: RetryPolicy<TestError> = RetryPolicy::default();
        let decision = policy.decide(
            attempt,
            &TestError { transient },
            &connectivity(connected, reachable),
        );
        prop_assert!(!decision.should_retry);
    }

    /// Property: never retries at or beyond the cap.
    #[test]
    fn cap_is_never_exceeded(
        max_attempts in 1usize..=10,
        attempt in 0usize..=100,
    ) {
        let policy: RetryPolicy<TestError> = RetryPolicy::builder()
            .max_attempts(max_attempts)
            .fixed_backoff(Duration::from_millis(1))
            .build();

        let decision = policy.decide(
            attempt,
            &TestError { transient: true },
            &connectivity(true, true),
        );
        prop_assert_eq!(decision.should_retry, attempt < max_attempts);
    }

    /// Property: a stop decision carries no delay.
    #[test]
    fn stop_decisions_have_zero_delay(
        attempt in 0usize..=100,
        connected in any::<bool>(),
        reachable in any::<bool>(),
    ) {
        let policy: RetryPolicy<TestError> = RetryPolicy::builder()
            .retry_on(|e: &TestError| e.transient)
            .build();

        let decision = policy.decide(
            attempt,
            &TestError { transient: false },
            &connectivity(connected, reachable),
        );
        prop_assert!(!decision.should_retry);
        prop_assert_eq!(decision.delay, Duration::ZERO);
    }
}
