//! Operation state and error types.

use std::time::Duration;
use thiserror::Error;

/// Why a guarded operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError<E> {
    /// The timeout timer settled first; the operation's own result was
    /// discarded.
    #[error("operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },
    /// The operation itself failed.
    #[error("operation failed: {0}")]
    Operation(E),
}

impl<E> GuardError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::Timeout { .. })
    }
}

/// State of the guarded operation. Exactly one variant is active; every
/// settlement is preceded by `Pending`, and only a retry-token bump moves a
/// settled guard back to `Pending`.
#[derive(Debug, Clone)]
pub enum AsyncOperationState<T, E> {
    Pending,
    Succeeded(T),
    Failed(GuardError<E>),
}

impl<T, E> AsyncOperationState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncOperationState::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, AsyncOperationState::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AsyncOperationState::Failed(_))
    }

    /// The success value, if settled successfully.
    pub fn succeeded(&self) -> Option<&T> {
        match self {
            AsyncOperationState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if settled with one.
    pub fn failed(&self) -> Option<&GuardError<E>> {
        match self {
            AsyncOperationState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_variant_reads_active() {
        let pending: AsyncOperationState<u32, String> = AsyncOperationState::Pending;
        assert!(pending.is_pending());
        assert!(!pending.is_succeeded());
        assert!(!pending.is_failed());

        let done: AsyncOperationState<u32, String> = AsyncOperationState::Succeeded(7);
        assert_eq!(done.succeeded(), Some(&7));
        assert!(done.failed().is_none());

        let failed: AsyncOperationState<u32, String> =
            AsyncOperationState::Failed(GuardError::Timeout {
                timeout: Duration::from_secs(1),
            });
        assert!(failed.failed().is_some_and(GuardError::is_timeout));
    }
}
