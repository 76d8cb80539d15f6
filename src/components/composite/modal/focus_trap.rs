//! Focus Trap
//!
//! Keeps Tab / Shift+Tab cycling inside an ordered set of focus targets.

/// Ordered focus targets of a container
#[derive(Debug, Clone)]
pub struct FocusTrap<T> {
    targets: Vec<T>,
}

impl<T: PartialEq> FocusTrap<T> {
    pub fn new(targets: Vec<T>) -> Self {
        Self { targets }
    }

    pub fn set_targets(&mut self, targets: Vec<T>) {
        self.targets = targets;
    }

    pub fn first(&self) -> Option<&T> {
        self.targets.first()
    }

    /// Target that should receive focus after a Tab press
    ///
    /// Tab on the last target wraps to the first and Shift+Tab on the first
    /// wraps to the last. Focus outside the trap (or nowhere) is pulled back
    /// in at the first target, or the last one when moving backwards.
    pub fn next(&self, current: Option<&T>, backwards: bool) -> Option<&T> {
        let len = self.targets.len();
        if len == 0 {
            return None;
        }

        let position = current.and_then(|current| self.targets.iter().position(|t| t == current));
        let index = match (position, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        self.targets.get(index)
    }
}
