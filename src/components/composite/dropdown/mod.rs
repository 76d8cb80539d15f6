//! Dropdown Component
//!
//! A single-choice select with optional search and keyboard navigation.

pub mod dropdown;
pub mod option;
pub mod state;

pub use dropdown::{Dropdown, DropdownEvent};
pub use option::{DropdownOption, DropdownSize};
pub use state::{DropdownKey, DropdownState, KeyOutcome};
