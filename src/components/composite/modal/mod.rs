//! Modal Component
//!
//! A dialog with focus trapping, focus restoration and page scroll locking.

pub mod focus_trap;
pub mod modal;
pub mod scroll_lock;
pub mod state;

pub use focus_trap::FocusTrap;
pub use modal::{Modal, ModalCloser, ModalEvent};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use state::{ModalIds, ModalKey, ModalKeyOutcome, ModalOptions, ModalSize, ModalState, ModalVariant};
