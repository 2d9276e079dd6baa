//! Telemetry store configuration.

use crate::sink::TelemetrySink;
use crate::storage::StorageBackend;
use std::sync::Arc;

const DEFAULT_CAPACITY: usize = 100;

/// Where captured records are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Emit each record through `tracing` (console-style, for development).
    Development,
    /// Forward each record to the registered sinks.
    Production,
}

/// Configuration for a [`TelemetryStore`](crate::TelemetryStore).
pub struct TelemetryConfig {
    pub(crate) capacity: usize,
    pub(crate) mode: DispatchMode,
    pub(crate) storage: Option<Arc<dyn StorageBackend>>,
    pub(crate) sinks: Vec<Arc<dyn TelemetrySink>>,
    pub(crate) name: String,
}

impl TelemetryConfig {
    /// Creates a new builder with defaults.
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`TelemetryConfig`].
///
/// Defaults:
/// - capacity: 100 records
/// - mode: `Development`
/// - no storage backend (buffer is in-memory only)
/// - no sinks
pub struct TelemetryConfigBuilder {
    capacity: usize,
    mode: DispatchMode,
    storage: Option<Arc<dyn StorageBackend>>,
    sinks: Vec<Arc<dyn TelemetrySink>>,
    name: String,
}

impl TelemetryConfigBuilder {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            mode: DispatchMode::Development,
            storage: None,
            sinks: Vec::new(),
            name: "<unnamed>".to_string(),
        }
    }

    /// Sets the ring buffer capacity; the oldest record is evicted first.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the persistence backend for the buffer.
    pub fn storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Registers a remote sink. May be called multiple times; failures are
    /// isolated per sink.
    pub fn sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Sets the name for this store instance (used in logs).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> TelemetryConfig {
        TelemetryConfig {
            capacity: self.capacity,
            mode: self.mode,
            storage: self.storage,
            sinks: self.sinks,
            name: self.name,
        }
    }
}

impl Default for TelemetryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
