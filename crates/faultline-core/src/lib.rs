//! Core infrastructure shared by the faultline crates.
//!
//! This crate provides the two pieces every other faultline crate builds on:
//! - The [`ErrorRecord`] data model: the immutable unit of error telemetry.
//! - The event system ([`FaultEvent`], [`EventListeners`]) used by boundaries,
//!   guards, and the connectivity monitor for observability callbacks.

pub mod events;
pub mod record;

pub use events::{EventListener, EventListeners, FaultEvent, FnListener};
pub use record::{unique_token, Context, ErrorRecord, Severity};
