//! Keyboard Actions
//!
//! Widget actions and their key bindings. Every binding is scoped to the
//! widget's key context, so the innermost focused widget resolves a key
//! first and an enclosing widget only sees it when the inner one propagates.

use gpui::{Action, KeyBinding};
use schemars::JsonSchema;
use serde::Deserialize;

/// Key context of the dropdown control and its menu
pub const DROPDOWN_CONTEXT: &str = "Dropdown";
/// Key context of an open modal overlay
pub const MODAL_CONTEXT: &str = "Modal";

/// Dropdown actions
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum DropdownAction {
    /// Highlight the next enabled option, opening the menu when closed
    SelectNext,
    /// Highlight the previous enabled option, opening the menu when closed
    SelectPrev,
    /// Choose the highlighted option, opening the menu when closed
    Confirm,
    /// Close the menu
    Dismiss,
    /// Focus is leaving the control
    Blur,
}

/// Modal actions
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum ModalAction {
    /// Ask the host to close the modal
    Dismiss,
    /// Move focus forward inside the modal
    FocusNext,
    /// Move focus backward inside the modal
    FocusPrev,
}

/// Create the widget key bindings
pub fn new_key_bindings() -> Vec<KeyBinding> {
    let dropdown = Some(DROPDOWN_CONTEXT);
    let modal = Some(MODAL_CONTEXT);
    vec![
        // Dropdown
        KeyBinding::new("down", DropdownAction::SelectNext, dropdown),
        KeyBinding::new("up", DropdownAction::SelectPrev, dropdown),
        KeyBinding::new("enter", DropdownAction::Confirm, dropdown),
        KeyBinding::new("escape", DropdownAction::Dismiss, dropdown),
        KeyBinding::new("tab", DropdownAction::Blur, dropdown),
        KeyBinding::new("shift-tab", DropdownAction::Blur, dropdown),
        // Modal
        KeyBinding::new("escape", ModalAction::Dismiss, modal),
        KeyBinding::new("tab", ModalAction::FocusNext, modal),
        KeyBinding::new("shift-tab", ModalAction::FocusPrev, modal),
    ]
}
