//! Normalized connectivity state.

/// Connection kind reported when the platform gives us nothing usable.
pub(crate) const UNKNOWN_KIND: &str = "unknown";

/// Process-wide reachability snapshot.
///
/// Written only by the monitor's subscription handler; every reader gets an
/// owned copy, so a stale read is possible but a torn one is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityState {
    /// Whether the device has an active network interface.
    pub connected: bool,
    /// Whether the wider internet is actually reachable over that interface.
    pub reachable: bool,
    /// Transport kind as reported by the platform ("wifi", "cellular", ...).
    pub kind: String,
}

impl ConnectivityState {
    /// The degraded state: no interface, nothing reachable, unknown transport.
    pub fn offline() -> Self {
        Self {
            connected: false,
            reachable: false,
            kind: UNKNOWN_KIND.to_string(),
        }
    }

    /// True when the network is usable end to end.
    pub fn is_online(&self) -> bool {
        self.connected && self.reachable
    }
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self::offline()
    }
}

/// Raw reachability signal as delivered by the platform probe.
///
/// Platforms frequently report "don't know" for one or both flags; those are
/// normalized to `false` so consumers only ever see definite booleans.
#[derive(Debug, Clone, Default)]
pub struct RawConnectivity {
    pub connected: Option<bool>,
    pub reachable: Option<bool>,
    pub kind: String,
}

impl RawConnectivity {
    /// Collapses unknown flags to `false` and empty kinds to `"unknown"`.
    pub fn normalize(self) -> ConnectivityState {
        ConnectivityState {
            connected: self.connected.unwrap_or(false),
            reachable: self.reachable.unwrap_or(false),
            kind: if self.kind.is_empty() {
                UNKNOWN_KIND.to_string()
            } else {
                self.kind
            },
        }
    }
}
