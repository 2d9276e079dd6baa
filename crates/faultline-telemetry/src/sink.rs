//! The remote sink contract for production dispatch.

use faultline_core::ErrorRecord;
use futures::future::BoxFuture;
use thiserror::Error;

/// Error from a telemetry sink.
///
/// Sink failures are isolated per sink and swallowed by the store; one
/// rejecting sink cannot break the capture path or starve other sinks.
#[derive(Debug, Error)]
#[error("telemetry sink rejected record: {0}")]
pub struct SinkError(pub String);

/// A remote destination for captured records (crash reporter, backend
/// endpoint, ...). The store knows nothing about the destination beyond this
/// contract; multiple sinks may be registered.
pub trait TelemetrySink: Send + Sync {
    fn send(&self, record: ErrorRecord) -> BoxFuture<'static, Result<(), SinkError>>;
}
