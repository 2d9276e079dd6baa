//! The platform reachability probe contract.

use crate::state::RawConnectivity;
use futures::future::BoxFuture;
use thiserror::Error;

/// Error returned by a probe whose own machinery failed.
///
/// The monitor never surfaces this to consumers; it degrades to the offline
/// state and logs instead.
#[derive(Debug, Error)]
#[error("connectivity probe failed: {0}")]
pub struct ProbeError(pub String);

/// Callback invoked by the platform on every reachability change.
pub type ProbeCallback = Box<dyn Fn(RawConnectivity) + Send + Sync>;

/// Contract for the platform's network-reachability signal.
///
/// Supplied by the embedding application; faultline only consumes it.
pub trait ConnectivityProbe: Send + Sync {
    /// Registers a callback for reachability changes. The returned
    /// [`Subscription`] unsubscribes when dropped.
    fn subscribe(&self, callback: ProbeCallback) -> Subscription;

    /// One-shot query of the current raw state, independent of any
    /// subscription.
    fn fetch_current(&self) -> BoxFuture<'static, Result<RawConnectivity, ProbeError>>;
}

/// Handle to an active probe subscription; unsubscribes on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps a cancellation closure supplied by the probe.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel, for probes that push nothing.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Cancels the subscription explicitly.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
