//! Hierarchical fault containment.
//!
//! A [`FaultBoundary`] wraps the rendering of one subtree. A panic raised
//! while rendering is the containment signal: the boundary catches it,
//! transitions `Healthy -> Faulted`, records the failure, and yields a
//! [`FallbackView`] describing the degraded UI instead of the subtree's
//! output. Containment is structural: an inner boundary converts the panic
//! into a value, so the fault can never reach an outer boundary.
//!
//! Recovery is reset-only. A boundary returns to `Healthy` when any of its
//! reset keys changes between renders, or on an explicit [`reset`] call;
//! render faults are never retried automatically.
//!
//! [`reset`]: FaultBoundary::reset
//!
//! # Example
//!
//! ```
//! use faultline_boundary::{BoundaryConfig, BoundaryLevel, BoundaryStatus, FaultBoundary};
//!
//! let mut boundary = FaultBoundary::new(
//!     BoundaryConfig::builder()
//!         .level(BoundaryLevel::Component)
//!         .isolate(true)
//!         .name("profile-card")
//!         .build(),
//! );
//!
//! let keys = [faultline_boundary::ResetKey::from("user-1")];
//! let outcome = boundary.render(&keys, || panic!("render bug"));
//! assert!(outcome.fallback().is_some());
//! assert_eq!(boundary.status(), BoundaryStatus::Faulted);
//!
//! // New reset key: conditions changed, try rendering again.
//! let keys = [faultline_boundary::ResetKey::from("user-2")];
//! let outcome = boundary.render(&keys, || "fine now");
//! assert_eq!(outcome.rendered(), Some("fine now"));
//! assert_eq!(boundary.status(), BoundaryStatus::Healthy);
//! ```

mod boundary;
mod config;
mod fallback;
mod state;

pub use boundary::{BoundaryEvent, FaultBoundary};
pub use config::{BoundaryConfig, BoundaryConfigBuilder};
pub use fallback::{BoundaryLevel, FallbackKind, FallbackView, RenderOutcome};
pub use state::{BoundaryStatus, ResetKey};
