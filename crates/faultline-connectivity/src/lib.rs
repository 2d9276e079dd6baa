//! Network reachability monitoring.
//!
//! A single [`ConnectivityMonitor`] subscribes to the platform's reachability
//! signal (supplied through the [`ConnectivityProbe`] contract), normalizes it
//! into [`ConnectivityState`], and notifies listeners only when something
//! actually changed. Consumers (retry policies, network-aware fallback UI)
//! read immutable snapshots; the subscription handler is the only writer.
//!
//! Connectivity checks must never become a new source of faults: if the probe
//! itself errors, the monitor degrades to the offline state instead of
//! propagating the error.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use faultline_connectivity::{
//!     ConnectivityMonitor, ConnectivityMonitorConfig, ConnectivityProbe, ProbeCallback,
//!     ProbeError, RawConnectivity, Subscription,
//! };
//! use futures::future::BoxFuture;
//!
//! struct StaticProbe;
//!
//! impl ConnectivityProbe for StaticProbe {
//!     fn subscribe(&self, _callback: ProbeCallback) -> Subscription {
//!         Subscription::noop()
//!     }
//!
//!     fn fetch_current(&self) -> BoxFuture<'static, Result<RawConnectivity, ProbeError>> {
//!         Box::pin(async {
//!             Ok(RawConnectivity {
//!                 connected: Some(true),
//!                 reachable: Some(true),
//!                 kind: "wifi".to_string(),
//!             })
//!         })
//!     }
//! }
//!
//! # async fn example() {
//! let config = ConnectivityMonitorConfig::builder()
//!     .name("app-connectivity")
//!     .on_change(|previous, current| {
//!         println!("{:?} -> {:?}", previous, current);
//!     })
//!     .build();
//!
//! let monitor = ConnectivityMonitor::start(Arc::new(StaticProbe), config).await;
//! assert!(monitor.current().is_online());
//! # }
//! ```

mod monitor;
mod probe;
mod state;

pub use monitor::{
    ConnectivityEvent, ConnectivityMonitor, ConnectivityMonitorConfig,
    ConnectivityMonitorConfigBuilder,
};
pub use probe::{ConnectivityProbe, ProbeCallback, ProbeError, Subscription};
pub use state::{ConnectivityState, RawConnectivity};
