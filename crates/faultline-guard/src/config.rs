//! Guard configuration and events.

use faultline_core::events::{EventListeners, FaultEvent, FnListener};
use faultline_telemetry::TelemetryStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Events emitted by an async guard.
#[derive(Debug, Clone)]
pub enum GuardEvent {
    /// The operation settled successfully while still wanted.
    Succeeded {
        source: String,
        timestamp: Instant,
        duration: Duration,
        retry_count: u32,
    },
    /// The operation itself failed while still wanted.
    Failed {
        source: String,
        timestamp: Instant,
        duration: Duration,
        retry_count: u32,
    },
    /// The timeout timer settled first.
    TimedOut {
        source: String,
        timestamp: Instant,
        timeout: Duration,
    },
}

impl FaultEvent for GuardEvent {
    fn event_type(&self) -> &'static str {
        match self {
            GuardEvent::Succeeded { .. } => "guard_succeeded",
            GuardEvent::Failed { .. } => "guard_failed",
            GuardEvent::TimedOut { .. } => "guard_timed_out",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            GuardEvent::Succeeded { timestamp, .. }
            | GuardEvent::Failed { timestamp, .. }
            | GuardEvent::TimedOut { timestamp, .. } => *timestamp,
        }
    }

    fn source(&self) -> &str {
        match self {
            GuardEvent::Succeeded { source, .. }
            | GuardEvent::Failed { source, .. }
            | GuardEvent::TimedOut { source, .. } => source,
        }
    }
}

/// Configuration for an [`AsyncGuard`](crate::AsyncGuard).
pub struct AsyncGuardConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) label: String,
    pub(crate) name: String,
    pub(crate) telemetry: Option<Arc<TelemetryStore>>,
    pub(crate) event_listeners: EventListeners<GuardEvent>,
}

impl AsyncGuardConfig {
    /// Creates a new builder with defaults.
    pub fn builder() -> AsyncGuardConfigBuilder {
        AsyncGuardConfigBuilder::new()
    }
}

impl Default for AsyncGuardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`AsyncGuardConfig`].
///
/// Defaults: no timeout, no telemetry, label `"<operation>"`.
pub struct AsyncGuardConfigBuilder {
    timeout: Option<Duration>,
    label: String,
    name: String,
    telemetry: Option<Arc<TelemetryStore>>,
    event_listeners: EventListeners<GuardEvent>,
}

impl AsyncGuardConfigBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            label: "<operation>".to_string(),
            name: "<unnamed>".to_string(),
            telemetry: None,
            event_listeners: EventListeners::new(),
        }
    }

    /// Races the operation against this timeout.
    ///
    /// The race is soft: the losing operation is discarded, not aborted, so
    /// an operation with side effects may still complete after the guard has
    /// reported a timeout. Consumers needing hard cancellation must thread
    /// their own abort signal through the operation.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Short human-readable description of the operation.
    ///
    /// Truncated before it enters telemetry context, so it can never leak a
    /// large payload into the error log.
    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the name for this guard instance (used in events and logs).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Captures failures (and recovery signals) into the given store.
    pub fn telemetry(mut self, telemetry: Arc<TelemetryStore>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Registers a callback for successful settlements, with the operation
    /// duration.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let GuardEvent::Succeeded { duration, .. } = event {
                f(*duration);
            }
        }));
        self
    }

    /// Registers a callback for failed settlements, including timeouts.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if matches!(
                event,
                GuardEvent::Failed { .. } | GuardEvent::TimedOut { .. }
            ) {
                f();
            }
        }));
        self
    }

    /// Registers a callback invoked only when the timeout timer wins.
    pub fn on_timeout<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let GuardEvent::TimedOut { timeout, .. } = event {
                f(*timeout);
            }
        }));
        self
    }

    pub fn build(self) -> AsyncGuardConfig {
        AsyncGuardConfig {
            timeout: self.timeout,
            label: self.label,
            name: self.name,
            telemetry: self.telemetry,
            event_listeners: self.event_listeners,
        }
    }
}

impl Default for AsyncGuardConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
