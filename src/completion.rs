//! # Completion Handles
//!
//! One-shot synchronization cells used to signal trigger and check outcomes.
//!
//! A [`CompletionHandle`] is resolved at most once, from whichever thread
//! delivers the satisfying event, and awaited by any number of consumers.
//! Waiters park on a watch channel; there is no polling loop.

use std::sync::Arc;

use tokio::sync::watch;

/// Single-assignment, multi-consumer completion cell.
///
/// Cloning is cheap; every clone observes the same cell. The first call to
/// [`resolve`](CompletionHandle::resolve) wins, later calls are no-ops.
#[derive(Debug, Clone)]
pub struct CompletionHandle<T: Clone> {
    cell: Arc<watch::Sender<Option<T>>>,
}

impl<T: Clone> CompletionHandle<T> {
    /// Create an unresolved handle
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { cell: Arc::new(tx) }
    }

    /// Resolve the handle with `value`.
    ///
    /// Returns `true` if this call performed the resolution, `false` if the
    /// handle was already resolved (the stored value is left untouched).
    pub fn resolve(&self, value: T) -> bool {
        let mut value = Some(value);
        self.cell.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = value.take();
                true
            } else {
                false
            }
        })
    }

    /// Resolved value, if any
    pub fn try_get(&self) -> Option<T> {
        self.cell.borrow().clone()
    }

    /// Whether the handle has been resolved
    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// Wait until the handle resolves and return the value.
    ///
    /// Returns immediately if already resolved. Must be awaited off the
    /// thread that delivers the resolving event, or the wait can never end.
    pub async fn wait(&self) -> T {
        let mut rx = self.cell.subscribe();
        loop {
            if let Some(value) = rx.borrow_and_update().clone() {
                return value;
            }
            // The sender lives in `self`, so `changed` cannot fail while we
            // hold a clone of the handle.
            if rx.changed().await.is_err() {
                unreachable!("completion cell dropped while a waiter holds it");
            }
        }
    }
}

impl<T: Clone> Default for CompletionHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}
