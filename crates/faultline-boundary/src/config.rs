//! Boundary configuration.

use crate::boundary::BoundaryEvent;
use crate::fallback::BoundaryLevel;
use faultline_core::events::{EventListeners, FnListener};
use faultline_core::ErrorRecord;
use faultline_telemetry::TelemetryStore;
use std::sync::Arc;

/// Configuration for a [`FaultBoundary`](crate::FaultBoundary).
pub struct BoundaryConfig {
    pub(crate) level: BoundaryLevel,
    pub(crate) isolate: bool,
    pub(crate) show_details: bool,
    pub(crate) name: String,
    pub(crate) telemetry: Option<Arc<TelemetryStore>>,
    pub(crate) event_listeners: EventListeners<BoundaryEvent>,
}

impl BoundaryConfig {
    /// Creates a new builder with defaults.
    pub fn builder() -> BoundaryConfigBuilder {
        BoundaryConfigBuilder::new()
    }
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`BoundaryConfig`].
///
/// Defaults:
/// - level: `Component`
/// - isolate: true (component faults stay inline)
/// - show_details: false
pub struct BoundaryConfigBuilder {
    level: BoundaryLevel,
    isolate: bool,
    show_details: bool,
    name: String,
    telemetry: Option<Arc<TelemetryStore>>,
    event_listeners: EventListeners<BoundaryEvent>,
}

impl BoundaryConfigBuilder {
    pub fn new() -> Self {
        Self {
            level: BoundaryLevel::Component,
            isolate: true,
            show_details: false,
            name: "<unnamed>".to_string(),
            telemetry: None,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn level(mut self, level: BoundaryLevel) -> Self {
        self.level = level;
        self
    }

    /// Confines the visible effect of a component-level fault to the subtree
    /// (inline fallback). With `isolate(false)` or screen/app levels the
    /// fallback replaces the entire subtree at this boundary's position; it
    /// never bypasses outer boundaries.
    pub fn isolate(mut self, isolate: bool) -> Self {
        self.isolate = isolate;
        self
    }

    /// Includes error detail (and diagnostic actions on full fallbacks) in
    /// the fallback description.
    pub fn show_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }

    /// Sets the name for this boundary instance (used in events, logs, and
    /// telemetry context).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Forwards every captured fault to the given store.
    pub fn telemetry(mut self, telemetry: Arc<TelemetryStore>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Registers a callback invoked with the record synthesized for each
    /// fault this boundary intercepts.
    pub fn on_fault<F>(mut self, f: F) -> Self
    where
        F: Fn(&ErrorRecord) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let BoundaryEvent::Faulted { record, .. } = event {
                f(record);
            }
        }));
        self
    }

    /// Registers a callback invoked when the boundary recovers, with `true`
    /// for a manual reset and `false` for a reset-key change.
    pub fn on_reset<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let BoundaryEvent::Reset { manual, .. } = event {
                f(*manual);
            }
        }));
        self
    }

    pub fn build(self) -> BoundaryConfig {
        BoundaryConfig {
            level: self.level,
            isolate: self.isolate,
            show_details: self.show_details,
            name: self.name,
            telemetry: self.telemetry,
            event_listeners: self.event_listeners,
        }
    }
}

impl Default for BoundaryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
