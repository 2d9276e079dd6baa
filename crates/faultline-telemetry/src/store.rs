//! The telemetry store.

use crate::config::{DispatchMode, TelemetryConfig};
use faultline_core::{unique_token, Context, ErrorRecord, Severity};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

#[cfg(feature = "metrics")]
use metrics::counter;

/// Storage key under which the serialized buffer is persisted.
pub const STORAGE_KEY: &str = "faultline/error_log";

/// Durable, bounded record of captured failures.
///
/// Construct one per process at application start and inject it wherever
/// faults are captured (boundaries, guards, arbitrary application code).
/// There is no teardown in a long-running client; tests construct a fresh
/// store per test.
///
/// Buffer mutation is synchronous with respect to the capture call;
/// persistence and sink dispatch are fire-and-forget.
pub struct TelemetryStore {
    config: TelemetryConfig,
    records: Mutex<VecDeque<ErrorRecord>>,
    session_id: String,
    user_id: Mutex<Option<String>>,
}

impl TelemetryStore {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(config.capacity.min(128))),
            config,
            session_id: unique_token("SESSION"),
            user_id: Mutex::new(None),
        }
    }

    /// A store with default configuration: capacity 100, development
    /// dispatch, no persistence.
    pub fn with_defaults() -> Self {
        Self::new(TelemetryConfig::default())
    }

    /// Reloads a previously persisted buffer, typically once at startup.
    ///
    /// Any failure (missing backend, storage error, corrupt payload) is
    /// logged and leaves the buffer as it was.
    pub async fn hydrate(&self) {
        let Some(storage) = &self.config.storage else {
            return;
        };

        let payload = match storage.get(STORAGE_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "failed to load persisted telemetry");
                return;
            }
        };

        match serde_json::from_str::<Vec<ErrorRecord>>(&payload) {
            Ok(persisted) => {
                let mut records = self.lock_records();
                for record in persisted {
                    records.push_back(record);
                }
                let capacity = self.config.capacity;
                while records.len() > capacity {
                    records.pop_front();
                }
            }
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "persisted telemetry is corrupt, discarding");
            }
        }
    }

    /// Captures an exception-like failure as an [`Severity::Error`] record.
    ///
    /// Accepts anything displayable, so non-error values thrown by
    /// application code are captured rather than rejected. Never fails and
    /// never panics.
    pub fn capture_exception(&self, error: impl fmt::Display, context: Context) {
        let record = ErrorRecord::new(error.to_string(), Severity::Error, context);
        self.record(record);
    }

    /// Captures a free-form message at the given severity.
    pub fn capture_message(&self, message: impl Into<String>, severity: Severity, context: Context) {
        let record = ErrorRecord::new(message, severity, context);
        self.record(record);
    }

    /// Captures a transport failure with endpoint/method context.
    pub fn capture_network_error(
        &self,
        endpoint: &str,
        method: &str,
        error: impl fmt::Display,
        mut context: Context,
    ) {
        context.insert("type".into(), "network".into());
        context.insert("endpoint".into(), endpoint.into());
        context.insert("method".into(), method.into());
        self.capture_exception(
            format!("network request failed: {method} {endpoint} - {error}"),
            context,
        );
    }

    /// Appends a prebuilt record: stamps session/user identity into its
    /// context, trims the buffer to capacity, then kicks off persistence and
    /// dispatch.
    pub fn record(&self, mut record: ErrorRecord) {
        self.stamp_identity(&mut record.context);

        {
            let mut records = self.lock_records();
            records.push_back(record.clone());
            let capacity = self.config.capacity;
            while records.len() > capacity {
                records.pop_front();
            }
        }

        #[cfg(feature = "metrics")]
        counter!("telemetry_records_captured_total", "store" => self.config.name.clone())
            .increment(1);

        self.dispatch(record);
        self.flush();
    }

    /// Returns a snapshot of the buffer, oldest first.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.lock_records().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    /// Clears the buffer and the persisted copy.
    pub fn clear(&self) {
        self.lock_records().clear();
        if let Some(storage) = &self.config.storage {
            let name = self.config.name.clone();
            spawn_swallowing(storage.remove(STORAGE_KEY), move |error| {
                tracing::warn!(store = %name, %error, "failed to clear persisted telemetry");
            });
        }
    }

    /// Associates subsequent records with a user identifier.
    pub fn set_user(&self, user_id: impl Into<String>) {
        *self.lock_user() = Some(user_id.into());
    }

    pub fn clear_user(&self) {
        *self.lock_user() = None;
    }

    /// The per-process session identifier stamped into every record.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn stamp_identity(&self, context: &mut Context) {
        context.insert("session_id".into(), self.session_id.clone().into());
        if let Some(user_id) = self.lock_user().as_deref() {
            context.insert("user_id".into(), user_id.into());
        }
    }

    fn dispatch(&self, record: ErrorRecord) {
        match self.config.mode {
            DispatchMode::Development => match record.severity {
                Severity::Error => tracing::error!(
                    store = %self.config.name,
                    id = %record.id,
                    message = %record.message,
                    "captured error"
                ),
                Severity::Warning => tracing::warn!(
                    store = %self.config.name,
                    id = %record.id,
                    message = %record.message,
                    "captured warning"
                ),
                Severity::Info => tracing::info!(
                    store = %self.config.name,
                    id = %record.id,
                    message = %record.message,
                    "captured message"
                ),
            },
            DispatchMode::Production => {
                for sink in &self.config.sinks {
                    let name = self.config.name.clone();
                    let id = record.id.clone();
                    spawn_swallowing(sink.send(record.clone()), move |error| {
                        tracing::warn!(store = %name, record = %id, %error, "telemetry sink failed");
                    });
                }
            }
        }
    }

    /// Persists the full buffer, fire and forget. A failure here is logged
    /// only; it must never re-enter the capture path.
    fn flush(&self) {
        let Some(storage) = &self.config.storage else {
            return;
        };

        let snapshot: Vec<ErrorRecord> = self.records();
        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "failed to serialize telemetry buffer");
                return;
            }
        };

        let name = self.config.name.clone();
        spawn_swallowing(storage.set(STORAGE_KEY, payload), move |error| {
            tracing::warn!(store = %name, %error, "failed to persist telemetry buffer");
        });
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, VecDeque<ErrorRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_user(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.user_id.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Runs a fallible future on the current runtime, logging its error through
/// `on_error`. Outside a runtime the work is skipped; capture must not panic
/// just because no executor is running.
fn spawn_swallowing<E: Send + 'static>(
    future: BoxFuture<'static, Result<(), E>>,
    on_error: impl FnOnce(E) + Send + 'static,
) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(error) = future.await {
                    on_error(error);
                }
            });
        }
        Err(_) => {
            tracing::debug!("no async runtime running, skipping telemetry side effect");
        }
    }
}
