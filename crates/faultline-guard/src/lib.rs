//! Lifecycle-safe execution of a single fallible async operation.
//!
//! An [`AsyncGuard`] wraps one operation with:
//! - an optional hard timeout, raced with `tokio::time::timeout`;
//! - retry-on-demand ([`AsyncGuard::retry`]) that re-runs the same operation;
//! - settlement rules that silently discard results arriving after the owner
//!   has been torn down ([`AsyncGuard::unmount`]) or after a newer run has
//!   superseded the in-flight one.
//!
//! The guard is mechanism, not policy: it does not decide *whether* to retry.
//! Pair it with `faultline_retry::RetryPolicy` for that decision.
//!
//! # Example
//!
//! ```
//! use faultline_guard::{AsyncGuard, AsyncGuardConfig, Settlement};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let guard: AsyncGuard<String, String> = AsyncGuard::new(
//!     || async { Ok("profile data".to_string()) },
//!     AsyncGuardConfig::builder()
//!         .timeout(Duration::from_secs(5))
//!         .label("fetch profile")
//!         .build(),
//! );
//!
//! assert_eq!(guard.run().await, Settlement::Applied);
//! assert!(guard.state().is_succeeded());
//!
//! // Tear down the owner: later settlements are dropped silently.
//! guard.unmount();
//! assert_eq!(guard.retry().await, Settlement::Discarded);
//! # }
//! ```

mod config;
mod guard;
mod state;

pub use config::{AsyncGuardConfig, AsyncGuardConfigBuilder, GuardEvent};
pub use guard::{AsyncGuard, Settlement};
pub use state::{AsyncOperationState, GuardError};
