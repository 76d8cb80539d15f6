//! DFC Widgets Library
//!
//! Form and dialog widgets for GPUI applications: a select-style dropdown
//! with search and keyboard navigation, and a modal dialog with focus
//! trapping and scroll locking. Each widget keeps its behavior in a headless
//! state type so it can be driven and tested without a window.

pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod theme;

/// Register the widget key bindings; call once after `gpui_component::init`
pub fn init(cx: &mut gpui::App) {
    cx.bind_keys(helpers::new_key_bindings());
}
