//! Scoped listener registrations
//!
//! Window-level listeners (outside click for dropdowns, key handling for
//! modals) are only live while their owner is open. Acquiring one hands out a
//! `ListenerGuard`; dropping the guard releases the registration. Close paths
//! and teardown therefore deregister exactly once each, and the registry keeps
//! the counts so callers can check the bookkeeping stays balanced.

use std::cell::Cell;
use std::rc::Rc;

/// What a scoped listener is listening for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Pointer down anywhere outside the owner's root
    OutsideMouseDown,
    /// Key down while the owner holds the keyboard
    KeyDown,
}

#[derive(Debug, Default)]
struct ListenerCounts {
    added: Cell<usize>,
    removed: Cell<usize>,
}

/// Hands out listener guards and counts registrations
///
/// Cloning is cheap and all clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Rc<ListenerCounts>,
}

impl ListenerRegistry {
    /// Create a registry with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the guard is dropped
    pub fn acquire(&self, kind: ListenerKind) -> ListenerGuard {
        self.counts.added.set(self.counts.added.get() + 1);
        tracing::trace!(?kind, active = self.active(), "listener added");
        ListenerGuard {
            counts: Rc::clone(&self.counts),
            kind,
        }
    }

    /// Total registrations so far
    pub fn added(&self) -> usize {
        self.counts.added.get()
    }

    /// Total deregistrations so far
    pub fn removed(&self) -> usize {
        self.counts.removed.get()
    }

    /// Registrations currently live
    pub fn active(&self) -> usize {
        self.added() - self.removed()
    }
}

/// A live listener registration, released on drop
#[must_use = "dropping the guard removes the listener immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    counts: Rc<ListenerCounts>,
    kind: ListenerKind,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.counts.removed.set(self.counts.removed.get() + 1);
        tracing::trace!(kind = ?self.kind, "listener removed");
    }
}
