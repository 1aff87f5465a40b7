//! Concurrency guard for the turn executor.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AgentError;

/// Guard that clears the `busy` flag on drop, ensuring it is always
/// released even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy lock. Returns
    /// [`AgentError::ChatInProgress`] if a chat is already in flight.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, AgentError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AgentError::ChatInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
