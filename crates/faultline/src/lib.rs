//! Client-side fault containment and resilience.
//!
//! `faultline` keeps an application responsive when parts of it fail:
//! rendering faults are contained structurally, async failures are guarded
//! and retried with awareness of connectivity, and everything that goes wrong
//! is captured in one bounded telemetry log. Each component is available as
//! both an individual crate and as a feature in this meta-crate.
//!
//! # Components
//!
//! - **Boundary** (`boundary` feature): Contains rendering faults to one
//!   subtree and describes the degraded view to show instead
//! - **Telemetry** (`telemetry` feature): Bounded in-memory error log with
//!   persistence and multi-destination dispatch
//! - **Connectivity** (`connectivity` feature): Normalized reachability state
//!   with change notifications
//! - **Retry** (`retry` feature): Connectivity-gated retry decisions with
//!   capped exponential backoff
//! - **Guard** (`guard` feature): Lifecycle-aware async execution with
//!   timeouts and result discarding after unmount
//!
//! # Usage
//!
//! Enable specific components via features:
//!
//! ```toml
//! [dependencies]
//! faultline = { version = "0.1", features = ["boundary", "telemetry"] }
//! ```
//!
//! Or enable all components:
//!
//! ```toml
//! [dependencies]
//! faultline = { version = "0.1", features = ["full"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "boundary", feature = "telemetry"))]
//! # {
//! use std::sync::Arc;
//! use faultline::boundary::{BoundaryConfig, BoundaryLevel, FaultBoundary};
//! use faultline::telemetry::{TelemetryConfig, TelemetryStore};
//!
//! let store = Arc::new(TelemetryStore::new(TelemetryConfig::builder().build()));
//!
//! let mut boundary = FaultBoundary::new(
//!     BoundaryConfig::builder()
//!         .level(BoundaryLevel::Screen)
//!         .name("checkout")
//!         .telemetry(store.clone())
//!         .build(),
//! );
//!
//! let outcome = boundary.render(&[], || panic!("render bug"));
//! assert!(outcome.fallback().is_some());
//! assert_eq!(store.records().len(), 1);
//! # }
//! ```
//!
//! # Individual Crates
//!
//! Each component is also available as a standalone crate for minimal
//! dependencies:
//!
//! - `faultline-boundary`
//! - `faultline-telemetry`
//! - `faultline-connectivity`
//! - `faultline-retry`
//! - `faultline-guard`
//! - `faultline-core` (shared infrastructure)

// Re-export core (always available)
pub use faultline_core as core;

// Re-export components based on features
#[cfg(feature = "boundary")]
pub use faultline_boundary as boundary;

#[cfg(feature = "connectivity")]
pub use faultline_connectivity as connectivity;

#[cfg(feature = "guard")]
pub use faultline_guard as guard;

#[cfg(feature = "retry")]
pub use faultline_retry as retry;

#[cfg(feature = "telemetry")]
pub use faultline_telemetry as telemetry;
