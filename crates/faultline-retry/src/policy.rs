//! The retry decision function.

use crate::backoff::{ExponentialBackoff, FixedInterval, IntervalFunction};
use faultline_connectivity::ConnectivityState;
use std::sync::Arc;
use std::time::Duration;

/// Predicate deciding whether a given error is worth retrying.
pub type RetryPredicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

const DEFAULT_MAX_ATTEMPTS: usize = 3;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// The output of a retry decision. Pure value, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDecision {
    pub should_retry: bool,
    /// Delay before the next attempt. Zero when `should_retry` is false.
    pub delay: Duration,
}

impl RetryDecision {
    fn stop() -> Self {
        Self {
            should_retry: false,
            delay: Duration::ZERO,
        }
    }

    fn retry_after(delay: Duration) -> Self {
        Self {
            should_retry: true,
            delay,
        }
    }
}

/// Decides whether a failed attempt should be retried, and after what delay.
///
/// Pure with respect to its inputs; consult it from an async guard or fetch
/// layer on every failure. Generic over the consumer's error type so a
/// [`retry_on`](RetryPolicyBuilder::retry_on) predicate can inspect it.
pub struct RetryPolicy<E> {
    max_attempts: usize,
    interval_fn: Arc<dyn IntervalFunction>,
    retry_predicate: Option<RetryPredicate<E>>,
}

impl<E> RetryPolicy<E> {
    /// Creates a policy with an explicit attempt cap and backoff strategy.
    pub fn new(max_attempts: usize, interval_fn: Arc<dyn IntervalFunction>) -> Self {
        Self {
            max_attempts,
            interval_fn,
            retry_predicate: None,
        }
    }

    /// Creates a new builder with defaults.
    pub fn builder() -> RetryPolicyBuilder<E> {
        RetryPolicyBuilder::new()
    }

    /// Decides whether the attempt that just failed should be retried.
    ///
    /// `attempt` is 0-indexed: the first failure is attempt 0. With the
    /// default cap of 3, attempts 0, 1, and 2 retry and attempt 3 stops.
    pub fn decide(
        &self,
        attempt: usize,
        last_error: &E,
        connectivity: &ConnectivityState,
    ) -> RetryDecision {
        // Rule 1: the connectivity gate is unconditional.
        if !connectivity.is_online() {
            return RetryDecision::stop();
        }

        if let Some(predicate) = &self.retry_predicate {
            if !predicate(last_error) {
                return RetryDecision::stop();
            }
        }

        if attempt >= self.max_attempts {
            return RetryDecision::stop();
        }

        RetryDecision::retry_after(self.interval_fn.next_interval(attempt))
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl<E> Default for RetryPolicy<E> {
    /// Cap of 3 attempts, exponential backoff `min(1s * 2^attempt, 30s)`.
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Arc::new(
                ExponentialBackoff::new(DEFAULT_INITIAL_BACKOFF)
                    .max_interval(DEFAULT_MAX_BACKOFF),
            ),
        )
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            interval_fn: Arc::clone(&self.interval_fn),
            retry_predicate: self.retry_predicate.clone(),
        }
    }
}

/// Builder for [`RetryPolicy`].
pub struct RetryPolicyBuilder<E> {
    max_attempts: usize,
    interval_fn: Option<Arc<dyn IntervalFunction>>,
    retry_predicate: Option<RetryPredicate<E>>,
}

impl<E> RetryPolicyBuilder<E> {
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval_fn: None,
            retry_predicate: None,
        }
    }

    /// Sets the attempt cap. Attempts `0..max_attempts` retry.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets a fixed backoff interval.
    pub fn fixed_backoff(mut self, interval: Duration) -> Self {
        self.interval_fn = Some(Arc::new(FixedInterval::new(interval)));
        self
    }

    /// Sets exponential backoff from the given initial interval, capped at
    /// the default 30s maximum.
    pub fn exponential_backoff(mut self, initial: Duration) -> Self {
        self.interval_fn = Some(Arc::new(
            ExponentialBackoff::new(initial).max_interval(DEFAULT_MAX_BACKOFF),
        ));
        self
    }

    /// Sets a custom interval function.
    pub fn backoff<I>(mut self, interval_fn: I) -> Self
    where
        I: IntervalFunction + 'static,
    {
        self.interval_fn = Some(Arc::new(interval_fn));
        self
    }

    /// Sets a predicate restricting which errors are retried.
    pub fn retry_on<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.retry_predicate = Some(Arc::new(predicate));
        self
    }

    pub fn build(self) -> RetryPolicy<E> {
        let interval_fn = self.interval_fn.unwrap_or_else(|| {
            Arc::new(ExponentialBackoff::new(DEFAULT_INITIAL_BACKOFF).max_interval(DEFAULT_MAX_BACKOFF))
        });
        RetryPolicy {
            max_attempts: self.max_attempts,
            interval_fn,
            retry_predicate: self.retry_predicate,
        }
    }
}

impl<E> Default for RetryPolicyBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
