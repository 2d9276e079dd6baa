//! The connectivity monitor: one subscription, change-only notification.

use crate::probe::{ConnectivityProbe, Subscription};
use crate::state::ConnectivityState;
use faultline_core::events::{EventListeners, FaultEvent, FnListener};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Events emitted by the connectivity monitor.
#[derive(Debug, Clone)]
pub enum ConnectivityEvent {
    /// The normalized state actually changed (connected, reachable, or kind).
    Changed {
        source: String,
        timestamp: Instant,
        previous: ConnectivityState,
        current: ConnectivityState,
    },
}

impl FaultEvent for ConnectivityEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ConnectivityEvent::Changed { .. } => "connectivity_changed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            ConnectivityEvent::Changed { timestamp, .. } => *timestamp,
        }
    }

    fn source(&self) -> &str {
        match self {
            ConnectivityEvent::Changed { source, .. } => source,
        }
    }
}

/// Configuration for a [`ConnectivityMonitor`].
pub struct ConnectivityMonitorConfig {
    pub(crate) name: String,
    pub(crate) event_listeners: EventListeners<ConnectivityEvent>,
}

impl ConnectivityMonitorConfig {
    /// Creates a new builder with defaults.
    pub fn builder() -> ConnectivityMonitorConfigBuilder {
        ConnectivityMonitorConfigBuilder::new()
    }
}

/// Builder for [`ConnectivityMonitorConfig`].
pub struct ConnectivityMonitorConfigBuilder {
    name: String,
    event_listeners: EventListeners<ConnectivityEvent>,
}

impl ConnectivityMonitorConfigBuilder {
    pub fn new() -> Self {
        Self {
            name: "<unnamed>".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the name for this monitor instance (used in events and logs).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked on every real state change.
    ///
    /// Called with the previous and current snapshots. Never invoked for
    /// redundant platform signals that decode to an identical state.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&ConnectivityState, &ConnectivityState) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            let ConnectivityEvent::Changed {
                previous, current, ..
            } = event;
            f(previous, current);
        }));
        self
    }

    pub fn build(self) -> ConnectivityMonitorConfig {
        ConnectivityMonitorConfig {
            name: self.name,
            event_listeners: self.event_listeners,
        }
    }
}

impl Default for ConnectivityMonitorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct MonitorInner {
    name: String,
    state: Mutex<ConnectivityState>,
    event_listeners: EventListeners<ConnectivityEvent>,
}

impl MonitorInner {
    /// Applies a normalized snapshot. The single writer path: only the probe
    /// subscription handler calls this.
    fn apply(&self, next: ConnectivityState) {
        let previous = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *state == next {
                return;
            }
            std::mem::replace(&mut *state, next.clone())
        };

        if previous.is_online() && !next.is_online() {
            tracing::warn!(monitor = %self.name, kind = %next.kind, "network connection lost");
        } else if !previous.is_online() && next.is_online() {
            tracing::info!(monitor = %self.name, kind = %next.kind, "network connection restored");
        }

        self.event_listeners.emit(&ConnectivityEvent::Changed {
            source: self.name.clone(),
            timestamp: Instant::now(),
            previous,
            current: next,
        });
    }

    fn snapshot(&self) -> ConnectivityState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Tracks reachability for the whole process.
///
/// Holds the one probe subscription; consumers read snapshots through
/// [`current`](Self::current) or register `on_change` callbacks through the
/// config builder. Lives for the process lifetime in a long-running client;
/// tests construct a fresh monitor per test.
pub struct ConnectivityMonitor {
    inner: Arc<MonitorInner>,
    probe: Arc<dyn ConnectivityProbe>,
    subscription: Option<Subscription>,
}

impl ConnectivityMonitor {
    /// Starts monitoring: queries the initial state, then subscribes.
    ///
    /// A failing probe is not an error; the monitor starts in (or degrades
    /// to) [`ConnectivityState::offline`].
    pub async fn start(
        probe: Arc<dyn ConnectivityProbe>,
        config: ConnectivityMonitorConfig,
    ) -> Self {
        let initial = query(config.name.as_str(), probe.as_ref()).await;
        let inner = Arc::new(MonitorInner {
            name: config.name,
            state: Mutex::new(initial),
            event_listeners: config.event_listeners,
        });

        let handler = Arc::clone(&inner);
        let subscription = probe.subscribe(Box::new(move |raw| {
            handler.apply(raw.normalize());
        }));

        Self {
            inner,
            probe,
            subscription: Some(subscription),
        }
    }

    /// Returns the latest normalized snapshot.
    pub fn current(&self) -> ConnectivityState {
        self.inner.snapshot()
    }

    /// One-shot probe query, independent of the subscription.
    ///
    /// Does not update the monitor's snapshot; degrades to offline if the
    /// probe errors.
    pub async fn fetch_current(&self) -> ConnectivityState {
        query(&self.inner.name, self.probe.as_ref()).await
    }

    /// Stops monitoring and cancels the probe subscription.
    pub fn stop(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

async fn query(name: &str, probe: &dyn ConnectivityProbe) -> ConnectivityState {
    match probe.fetch_current().await {
        Ok(raw) => raw.normalize(),
        Err(error) => {
            tracing::warn!(monitor = %name, %error, "connectivity probe failed, treating as offline");
            ConnectivityState::offline()
        }
    }
}
