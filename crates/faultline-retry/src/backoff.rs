//! Backoff interval strategies.

use std::time::Duration;

/// Computes the delay before a given retry attempt (0-indexed).
pub trait IntervalFunction: Send + Sync {
    /// Returns the delay to wait before retrying after `attempt` failures.
    fn next_interval(&self, attempt: usize) -> Duration;
}

/// The same delay for every attempt.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl IntervalFunction for FixedInterval {
    fn next_interval(&self, _attempt: usize) -> Duration {
        self.interval
    }
}

/// Exponentially growing delay, optionally capped.
///
/// `delay(attempt) = initial * multiplier^attempt`, clamped to
/// `max_interval` when one is set.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial: Duration,
    multiplier: f64,
    max: Option<Duration>,
}

impl ExponentialBackoff {
    /// Creates exponential backoff with multiplier 2.0 and no cap.
    pub fn new(initial: Duration) -> Self {
        Self {
            initial,
            multiplier: 2.0,
            max: None,
        }
    }

    /// Sets the growth multiplier.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Caps the computed interval.
    pub fn max_interval(mut self, max: Duration) -> Self {
        self.max = Some(max);
        self
    }
}

impl IntervalFunction for ExponentialBackoff {
    fn next_interval(&self, attempt: usize) -> Duration {
        // Clamp the exponent so large attempt numbers can't push the f64
        // math to infinity before the cap applies.
        let exponent = attempt.min(63) as i32;
        let mut secs = self.initial.as_secs_f64() * self.multiplier.powi(exponent);
        if let Some(max) = self.max {
            secs = secs.min(max.as_secs_f64());
        }
        if secs.is_finite() {
            Duration::from_secs_f64(secs.max(0.0))
        } else {
            self.max.unwrap_or(Duration::MAX)
        }
    }
}

/// Custom function-based interval.
pub struct FnInterval<F>
where
    F: Fn(usize) -> Duration + Send + Sync,
{
    f: F,
}

impl<F> FnInterval<F>
where
    F: Fn(usize) -> Duration + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> IntervalFunction for FnInterval<F>
where
    F: Fn(usize) -> Duration + Send + Sync,
{
    fn next_interval(&self, attempt: usize) -> Duration {
        (self.f)(attempt)
    }
}
