//! Scroll Lock
//!
//! Page scrolling is suspended while any modal is open. Each open modal holds
//! a guard; the page scrolls again once the last guard is dropped. A modal
//! holding a guard renders its overlay as an occluding layer, so wheel input
//! over the page never reaches the scroll containers underneath.

use std::cell::Cell;
use std::rc::Rc;

use gpui::Global;

/// Shared lock depth
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    depth: Rc<Cell<usize>>,
}

impl Global for ScrollLock {}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock until the returned guard is dropped
    pub fn acquire(&self) -> ScrollLockGuard {
        self.depth.set(self.depth.get() + 1);
        tracing::trace!(depth = self.depth.get(), "page scroll locked");
        ScrollLockGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.depth.get() > 0
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }
}

/// Keeps the page scroll suspended while alive
#[must_use = "dropping the guard unlocks scrolling immediately"]
#[derive(Debug)]
pub struct ScrollLockGuard {
    depth: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
        tracing::trace!(depth = self.depth.get(), "page scroll lock released");
    }
}
