//! Composite Components
//!
//! Stateful widgets built from a headless state machine and a GPUI view.

pub mod dropdown;
pub mod modal;

#[cfg(test)]
pub(crate) mod test_support;
