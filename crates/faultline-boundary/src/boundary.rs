//! The fault boundary.

use crate::config::BoundaryConfig;
use crate::fallback::{
    headline, BoundaryLevel, FallbackKind, FallbackView, RenderOutcome, INLINE_NOTICE,
};
use crate::state::{BoundaryState, BoundaryStatus, CapturedFault, ResetKey};
use faultline_core::events::FaultEvent;
use faultline_core::{Context, ErrorRecord, Severity};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// Events emitted by a fault boundary.
#[derive(Debug, Clone)]
pub enum BoundaryEvent {
    /// A fault was intercepted (render panic or explicit capture).
    Faulted {
        source: String,
        timestamp: Instant,
        record: ErrorRecord,
        occurrence_count: u32,
    },
    /// The boundary recovered, manually or through a reset-key change.
    Reset {
        source: String,
        timestamp: Instant,
        manual: bool,
    },
}

impl FaultEvent for BoundaryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BoundaryEvent::Faulted { .. } => "boundary_faulted",
            BoundaryEvent::Reset { .. } => "boundary_reset",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            BoundaryEvent::Faulted { timestamp, .. } | BoundaryEvent::Reset { timestamp, .. } => {
                *timestamp
            }
        }
    }

    fn source(&self) -> &str {
        match self {
            BoundaryEvent::Faulted { source, .. } | BoundaryEvent::Reset { source, .. } => source,
        }
    }
}

/// Intercepts failures raised while rendering one subtree.
///
/// State machine: `Healthy --(render panic | capture)--> Faulted
/// --(reset keys changed | reset())--> Healthy`. No other transitions; the
/// boundary persists for the lifetime of the subtree it wraps, and a fault
/// arriving while already faulted overwrites the held fault.
pub struct FaultBoundary {
    config: BoundaryConfig,
    state: BoundaryState,
}

impl FaultBoundary {
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config,
            state: BoundaryState::default(),
        }
    }

    /// Renders the wrapped subtree for this pass.
    ///
    /// Order of operations, once per render pass (there is nothing to race:
    /// all boundary mutation happens on the caller's thread):
    /// 1. Compare `reset_keys` positionally against the previous render's
    ///    keys; while faulted, any difference recovers the boundary.
    /// 2. If still faulted, return the fallback without running `render`.
    /// 3. Run `render`, catching a panic as the containment signal.
    pub fn render<R>(
        &mut self,
        reset_keys: &[ResetKey],
        render: impl FnOnce() -> R,
    ) -> RenderOutcome<R> {
        let keys_changed = self.state.update_keys(reset_keys);
        if keys_changed && self.state.status() == BoundaryStatus::Faulted {
            self.clear(false);
        }

        if self.state.status() == BoundaryStatus::Faulted {
            return RenderOutcome::Fallback(self.fallback_view());
        }

        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(value) => RenderOutcome::Rendered(value),
            Err(payload) => {
                self.intercept(panic_message(payload.as_ref()), "render");
                RenderOutcome::Fallback(self.fallback_view())
            }
        }
    }

    /// Explicitly reports a failure into this boundary, faulting it exactly
    /// as a render panic would. Works while already faulted: the new fault
    /// overwrites the held one.
    pub fn capture(&mut self, error: impl fmt::Display) {
        self.intercept(error.to_string(), "capture");
    }

    /// Manual recovery: unconditional `Faulted -> Healthy`.
    pub fn reset(&mut self) {
        if self.state.status() == BoundaryStatus::Faulted {
            self.clear(true);
        }
    }

    pub fn status(&self) -> BoundaryStatus {
        self.state.status()
    }

    /// Identifier of the record that caused the current fault; `None` while
    /// healthy.
    pub fn fault_id(&self) -> Option<&str> {
        self.state.fault().map(|fault| fault.id.as_str())
    }

    /// Cumulative faults intercepted by this boundary instance.
    pub fn occurrence_count(&self) -> u32 {
        self.state.occurrence_count()
    }

    pub fn level(&self) -> BoundaryLevel {
        self.config.level
    }

    fn intercept(&mut self, message: String, origin: &'static str) {
        let mut context = Context::new();
        context.insert("boundary".into(), self.config.name.clone().into());
        context.insert("level".into(), self.config.level.to_string().into());
        context.insert("origin".into(), origin.into());
        context.insert(
            "occurrence_count".into(),
            (self.state.occurrence_count() + 1).into(),
        );

        let record = ErrorRecord::new(message.clone(), Severity::Error, context);
        self.state.record_fault(CapturedFault {
            id: record.id.clone(),
            message,
        });

        tracing::error!(
            boundary = %self.config.name,
            level = %self.config.level,
            fault_id = %record.id,
            origin,
            "fault contained"
        );

        self.config.event_listeners.emit(&BoundaryEvent::Faulted {
            source: self.config.name.clone(),
            timestamp: Instant::now(),
            record: record.clone(),
            occurrence_count: self.state.occurrence_count(),
        });

        if let Some(telemetry) = &self.config.telemetry {
            telemetry.record(record);
        }
    }

    fn clear(&mut self, manual: bool) {
        if self.state.clear_fault().is_some() {
            tracing::debug!(boundary = %self.config.name, manual, "boundary reset");
            self.config.event_listeners.emit(&BoundaryEvent::Reset {
                source: self.config.name.clone(),
                timestamp: Instant::now(),
                manual,
            });
        }
    }

    fn fallback_view(&self) -> FallbackView {
        // render is only called while faulted, so a fault is always held.
        let (fault_id, message) = match self.state.fault() {
            Some(fault) => (fault.id.clone(), fault.message.clone()),
            None => (String::new(), String::new()),
        };

        let inline = self.config.isolate && self.config.level == BoundaryLevel::Component;
        let kind = if inline {
            FallbackKind::Inline
        } else {
            FallbackKind::Full
        };

        FallbackView {
            kind,
            level: self.config.level,
            detail: self
                .config
                .show_details
                .then(|| format!("{fault_id}: {message}")),
            message: if inline {
                INLINE_NOTICE.to_string()
            } else {
                headline(self.config.level).to_string()
            },
            fault_id,
            occurrence_count: self.state.occurrence_count(),
            offers_retry: true,
            offers_diagnostics: kind == FallbackKind::Full && self.config.show_details,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "render panicked with a non-string payload".to_string()
    }
}
