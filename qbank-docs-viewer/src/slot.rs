//! Write-once holder for the viewer handle

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Shared slot that receives the viewer handle exactly once.
///
/// Clones observe the same slot, so any code given a clone can read the
/// handle after initialization without a global.
pub struct HandleSlot<H> {
    cell: Arc<OnceCell<H>>,
}

impl<H> HandleSlot<H> {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// The stored handle, if initialization has happened
    pub fn get(&self) -> Option<&H> {
        self.cell.get()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.get().is_none()
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }

    /// Store `handle` unless one is already present; returns whether it
    /// was stored.
    pub(crate) fn fill(&self, handle: H) -> bool {
        self.cell.set(handle).is_ok()
    }
}

impl<H> Clone for HandleSlot<H> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<H> Default for HandleSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: fmt::Debug> fmt::Debug for HandleSlot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleSlot").field("handle", &self.get()).finish()
    }
}
