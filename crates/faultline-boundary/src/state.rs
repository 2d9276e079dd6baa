//! Boundary state and reset keys.

/// Health of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStatus {
    Healthy,
    Faulted,
}

/// A comparison value whose change signals "conditions changed, try
/// rendering again". Typed primitives compared positionally; no deep or
/// reflective equality.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ResetKey {
    fn from(value: &str) -> Self {
        ResetKey::Str(value.to_string())
    }
}

impl From<String> for ResetKey {
    fn from(value: String) -> Self {
        ResetKey::Str(value)
    }
}

impl From<i64> for ResetKey {
    fn from(value: i64) -> Self {
        ResetKey::Int(value)
    }
}

impl From<i32> for ResetKey {
    fn from(value: i32) -> Self {
        ResetKey::Int(value.into())
    }
}

impl From<u32> for ResetKey {
    fn from(value: u32) -> Self {
        ResetKey::Int(value.into())
    }
}

impl From<bool> for ResetKey {
    fn from(value: bool) -> Self {
        ResetKey::Bool(value)
    }
}

/// True when any position differs; a length change is a change.
pub(crate) fn keys_differ(previous: &[ResetKey], current: &[ResetKey]) -> bool {
    previous.len() != current.len()
        || previous.iter().zip(current).any(|(prev, cur)| prev != cur)
}

/// The fault currently held by a boundary.
#[derive(Debug, Clone)]
pub(crate) struct CapturedFault {
    pub(crate) id: String,
    pub(crate) message: String,
}

/// State owned exclusively by one boundary instance.
///
/// `status == Faulted` iff a fault is held; the invariant is structural
/// because both are the same `Option`.
#[derive(Debug, Default)]
pub(crate) struct BoundaryState {
    fault: Option<CapturedFault>,
    occurrence_count: u32,
    previous_keys: Vec<ResetKey>,
}

impl BoundaryState {
    pub(crate) fn status(&self) -> BoundaryStatus {
        if self.fault.is_some() {
            BoundaryStatus::Faulted
        } else {
            BoundaryStatus::Healthy
        }
    }

    pub(crate) fn fault(&self) -> Option<&CapturedFault> {
        self.fault.as_ref()
    }

    pub(crate) fn occurrence_count(&self) -> u32 {
        self.occurrence_count
    }

    /// Records a fault. A fault arriving while already faulted overwrites
    /// the held one; the count is monotonic either way.
    pub(crate) fn record_fault(&mut self, fault: CapturedFault) {
        self.fault = Some(fault);
        self.occurrence_count += 1;
    }

    /// Clears the fault, keeping the occurrence count.
    pub(crate) fn clear_fault(&mut self) -> Option<CapturedFault> {
        self.fault.take()
    }

    /// Compares this render's keys against the previous render's and stores
    /// them. Returns true when they differ.
    pub(crate) fn update_keys(&mut self, current: &[ResetKey]) -> bool {
        let differ = keys_differ(&self.previous_keys, current);
        if differ {
            self.previous_keys = current.to_vec();
        }
        differ
    }
}
