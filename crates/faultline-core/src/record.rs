//! The error record data model.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key-value context attached to a record: boundary level, component
/// name, retry count, user/session identifiers, network state at the time of
/// failure, and whatever else the capture site finds useful.
pub type Context = BTreeMap<String, Value>;

const ID_SUFFIX_LEN: usize = 9;

/// Severity of a captured record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single captured failure. Immutable once created: records are appended to
/// the telemetry buffer, eventually evicted oldest-first, and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Unique token, `<prefix>_<unix-millis>_<random suffix>`.
    pub id: String,
    /// Creation instant.
    pub timestamp: SystemTime,
    /// Message captured from the originating fault.
    pub message: String,
    /// Stack or panic location text, when one was available.
    pub stack: Option<String>,
    /// Open key-value context.
    pub context: Context,
    pub severity: Severity,
}

impl ErrorRecord {
    /// Creates a record with the `ERR` id prefix.
    pub fn new(message: impl Into<String>, severity: Severity, context: Context) -> Self {
        Self {
            id: unique_token("ERR"),
            timestamp: SystemTime::now(),
            message: message.into(),
            stack: None,
            context,
            severity,
        }
    }

    /// Attaches stack text to the record.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Generates a unique token of the form `<prefix>_<unix-millis>_<suffix>`.
///
/// Also used for session identifiers (`SESSION_...`), matching the record id
/// format so tokens from either source sort and grep the same way.
pub fn unique_token(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_format() {
        let token = unique_token("ERR");
        let parts: Vec<&str> = token.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ERR");
        assert!(parts[1].parse::<u128>().is_ok());
        assert_eq!(parts[2].len(), ID_SUFFIX_LEN);
    }

    #[test]
    fn tokens_are_unique() {
        let a = unique_token("ERR");
        let b = unique_token("ERR");
        assert_ne!(a, b);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut context = Context::new();
        context.insert("retry_count".into(), 2.into());
        let record = ErrorRecord::new("boom", Severity::Error, context).with_stack("at main");

        let json = serde_json::to_string(&record).unwrap();
        let back: ErrorRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.message, "boom");
        assert_eq!(back.stack.as_deref(), Some("at main"));
        assert_eq!(back.severity, Severity::Error);
        assert_eq!(back.context["retry_count"], 2);
    }
}
