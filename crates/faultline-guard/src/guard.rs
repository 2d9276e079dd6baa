//! The async guard.

use crate::config::{AsyncGuardConfig, GuardEvent};
use crate::state::{AsyncOperationState, GuardError};
use faultline_core::Context;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::counter;

/// Longest slice of the operation label allowed into telemetry context.
const LABEL_TELEMETRY_MAX: usize = 100;

/// Whether a settlement was applied to the guard's state or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result was applied: state transitioned, callbacks ran.
    Applied,
    /// The result arrived after unmount or after a newer run superseded this
    /// one. No state transition, no callbacks, no telemetry.
    Discarded,
}

type Operation<T, E> = Box<dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Executes one fallible async operation on behalf of an owner that may be
/// torn down before the operation settles.
///
/// Each call to [`run`](Self::run) bumps a generation counter; a settlement
/// is applied only if the guard is still mounted *and* its run is still the
/// current generation, which makes "first settler wins, stale settlers are
/// dropped" explicit rather than an implicit mounted-closure convention.
pub struct AsyncGuard<T, E> {
    operation: Operation<T, E>,
    config: AsyncGuardConfig,
    state: Mutex<AsyncOperationState<T, E>>,
    mounted: AtomicBool,
    generation: AtomicU64,
    retry_count: AtomicU32,
    last_settlement_failed: AtomicBool,
}

impl<T, E> AsyncGuard<T, E>
where
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
{
    /// Wraps an operation. The same operation reference is re-run on every
    /// [`retry`](Self::retry).
    pub fn new<F, Fut>(operation: F, config: AsyncGuardConfig) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            operation: Box::new(move || Box::pin(operation())),
            config,
            state: Mutex::new(AsyncOperationState::Pending),
            mounted: AtomicBool::new(true),
            generation: AtomicU64::new(0),
            retry_count: AtomicU32::new(0),
            last_settlement_failed: AtomicBool::new(false),
        }
    }

    /// Runs the operation once: `Pending`, execute (racing the configured
    /// timeout), then settle.
    pub async fn run(&self) -> Settlement {
        if !self.mounted.load(Ordering::Acquire) {
            return Settlement::Discarded;
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *self.lock_state() = AsyncOperationState::Pending;

        let start = Instant::now();
        let result = match self.config.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, (self.operation)()).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(error)) => Err(GuardError::Operation(error)),
                Err(_elapsed) => Err(GuardError::Timeout { timeout }),
            },
            None => (self.operation)().await.map_err(GuardError::Operation),
        };

        self.settle(generation, start.elapsed(), result)
    }

    /// Bumps the retry token and re-runs the same operation.
    ///
    /// Retries are unlimited here; the decision of whether one is worthwhile
    /// belongs to the consumer's retry policy.
    pub async fn retry(&self) -> Settlement {
        self.retry_count.fetch_add(1, Ordering::AcqRel);
        self.run().await
    }

    /// Marks the owner as torn down. Every settlement after this point is
    /// dropped silently.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Number of retries requested so far.
    pub fn retry_count(&self) -> u32 {
        self.retry_count.load(Ordering::Acquire)
    }

    /// Current run generation; bumped by every `run`/`retry`.
    pub fn retry_token(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn settle(
        &self,
        generation: u64,
        duration: std::time::Duration,
        result: Result<T, GuardError<E>>,
    ) -> Settlement {
        let stale = self.generation.load(Ordering::Acquire) != generation;
        if stale || !self.mounted.load(Ordering::Acquire) {
            tracing::debug!(
                guard = %self.config.name,
                stale,
                "settlement discarded"
            );
            #[cfg(feature = "metrics")]
            counter!("guard_settlements_total", "guard" => self.config.name.clone(), "result" => "discarded")
                .increment(1);
            return Settlement::Discarded;
        }

        let retry_count = self.retry_count.load(Ordering::Acquire);
        match result {
            Ok(value) => {
                let recovered = self.last_settlement_failed.swap(false, Ordering::AcqRel);
                *self.lock_state() = AsyncOperationState::Succeeded(value);

                self.config.event_listeners.emit(&GuardEvent::Succeeded {
                    source: self.config.name.clone(),
                    timestamp: Instant::now(),
                    duration,
                    retry_count,
                });

                #[cfg(feature = "metrics")]
                counter!("guard_settlements_total", "guard" => self.config.name.clone(), "result" => "succeeded")
                    .increment(1);

                if recovered {
                    if let Some(telemetry) = &self.config.telemetry {
                        telemetry.capture_message(
                            format!("operation recovered: {}", self.truncated_label()),
                            faultline_core::Severity::Info,
                            self.telemetry_context(retry_count),
                        );
                    }
                }
            }
            Err(error) => {
                self.last_settlement_failed.store(true, Ordering::Release);

                match &error {
                    GuardError::Timeout { timeout } => {
                        self.config.event_listeners.emit(&GuardEvent::TimedOut {
                            source: self.config.name.clone(),
                            timestamp: Instant::now(),
                            timeout: *timeout,
                        });
                    }
                    GuardError::Operation(_) => {
                        self.config.event_listeners.emit(&GuardEvent::Failed {
                            source: self.config.name.clone(),
                            timestamp: Instant::now(),
                            duration,
                            retry_count,
                        });
                    }
                }

                #[cfg(feature = "metrics")]
                counter!("guard_settlements_total", "guard" => self.config.name.clone(), "result" => "failed")
                    .increment(1);

                if let Some(telemetry) = &self.config.telemetry {
                    telemetry.capture_exception(&error, self.telemetry_context(retry_count));
                }

                *self.lock_state() = AsyncOperationState::Failed(error);
            }
        }

        Settlement::Applied
    }

    fn telemetry_context(&self, retry_count: u32) -> Context {
        let mut context = Context::new();
        context.insert("guard".into(), self.config.name.clone().into());
        context.insert("operation".into(), self.truncated_label().into());
        context.insert("retry_count".into(), retry_count.into());
        context
    }

    /// A short descriptive slice of the label, never the full payload.
    fn truncated_label(&self) -> String {
        self.config.label.chars().take(LABEL_TELEMETRY_MAX).collect()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AsyncOperationState<T, E>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T, E> AsyncGuard<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Snapshot of the operation state.
    pub fn state(&self) -> AsyncOperationState<T, E> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
