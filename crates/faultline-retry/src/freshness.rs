//! Freshness policy for read-through caches.
//!
//! While offline, previously fetched data is treated as valid indefinitely:
//! refetching cannot succeed, so serving stale data beats serving nothing.
//! Once back online the finite freshness window applies again.

use faultline_connectivity::ConnectivityState;
use std::time::Duration;

const DEFAULT_ONLINE_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Connectivity-dependent staleness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    online_stale_time: Duration,
}

impl FreshnessPolicy {
    pub fn new(online_stale_time: Duration) -> Self {
        Self { online_stale_time }
    }

    /// Returns the staleness window: `None` means "never stale" (offline).
    pub fn stale_time(&self, connectivity: &ConnectivityState) -> Option<Duration> {
        if connectivity.is_online() {
            Some(self.online_stale_time)
        } else {
            None
        }
    }

    /// Whether data of the given age should be refetched.
    pub fn is_stale(&self, age: Duration, connectivity: &ConnectivityState) -> bool {
        match self.stale_time(connectivity) {
            Some(window) => age > window,
            None => false,
        }
    }
}

impl Default for FreshnessPolicy {
    /// Five-minute window while online.
    fn default() -> Self {
        Self::new(DEFAULT_ONLINE_STALE_TIME)
    }
}
