//! Connectivity-aware retry policy.
//!
//! [`RetryPolicy`] is a pure decision function: given the attempt number, the
//! last error, and the current [`ConnectivityState`], it answers "retry or
//! not, and after what delay". It never schedules anything itself; the
//! mechanism that executes operations (an async guard, a fetch layer) owns
//! the timer.
//!
//! Decision rules, in order:
//! 1. Offline (`!connected || !reachable`) never retries. There is no point
//!    retrying with no network.
//! 2. An error rejected by the `retry_on` predicate never retries.
//! 3. Otherwise retry while `attempt < max_attempts` (default 3).
//! 4. The delay comes from the configured [`IntervalFunction`]; by default
//!    exponential, `min(1s * 2^attempt, 30s)`.
//!
//! # Example
//!
//! ```
//! use faultline_connectivity::ConnectivityState;
//! use faultline_retry::RetryPolicy;
//! use std::time::Duration;
//!
//! #[derive(Debug)]
//! struct FetchError;
//!
//! let policy: RetryPolicy<FetchError> = RetryPolicy::default();
//!
//! let online = ConnectivityState {
//!     connected: true,
//!     reachable: true,
//!     kind: "wifi".to_string(),
//! };
//! let decision = policy.decide(1, &FetchError, &online);
//! assert!(decision.should_retry);
//! assert_eq!(decision.delay, Duration::from_secs(2));
//!
//! // No network: never retry.
//! let decision = policy.decide(0, &FetchError, &ConnectivityState::offline());
//! assert!(!decision.should_retry);
//! ```

mod backoff;
mod freshness;
mod policy;

pub use backoff::{ExponentialBackoff, FixedInterval, FnInterval, IntervalFunction};
pub use freshness::FreshnessPolicy;
pub use policy::{RetryDecision, RetryPolicy, RetryPolicyBuilder, RetryPredicate};
