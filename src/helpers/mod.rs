//! Helper Utilities
//!
//! Common utilities used across the widgets.

mod action;
mod listener;

pub use action::*;
pub use listener::*;
