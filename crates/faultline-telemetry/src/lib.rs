//! Bounded, persisted error telemetry.
//!
//! [`TelemetryStore`] keeps an in-memory ring buffer of
//! [`ErrorRecord`](faultline_core::ErrorRecord)s (capacity 100 by default,
//! oldest evicted first), persists the buffer through a pluggable
//! [`StorageBackend`], and dispatches each capture either to the console
//! (development) or to one or more remote [`TelemetrySink`]s (production).
//!
//! The capture path is deliberately unbreakable: capture calls never fail,
//! never panic, and never recurse. Persistence and sink failures are logged
//! and swallowed.
//!
//! # Example
//!
//! ```
//! use faultline_core::{Context, Severity};
//! use faultline_telemetry::{MemoryStorage, TelemetryConfig, TelemetryStore};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let store = TelemetryStore::new(
//!     TelemetryConfig::builder()
//!         .capacity(50)
//!         .storage(Arc::new(MemoryStorage::new()))
//!         .name("app-telemetry")
//!         .build(),
//! );
//!
//! store.capture_exception("profile fetch failed", Context::new());
//! store.capture_message("sync skipped", Severity::Info, Context::new());
//! assert_eq!(store.len(), 2);
//! # }
//! ```

mod config;
mod sink;
mod storage;
mod store;

pub use config::{DispatchMode, TelemetryConfig, TelemetryConfigBuilder};
pub use sink::{SinkError, TelemetrySink};
pub use storage::{MemoryStorage, StorageBackend, StorageError};
pub use store::{TelemetryStore, STORAGE_KEY};
