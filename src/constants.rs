//! UI Constants
//!
//! Centralized widget constants for consistent layout.

/// Default dropdown menu height cap in pixels
pub const DROPDOWN_MAX_HEIGHT: f32 = 250.0;

/// Gap between the dropdown control and its menu
pub const DROPDOWN_MENU_GAP: f32 = 4.0;

/// Modal container widths per size
pub const MODAL_WIDTH_SMALL: f32 = 448.0;
pub const MODAL_WIDTH_MEDIUM: f32 = 512.0;
pub const MODAL_WIDTH_LARGE: f32 = 672.0;

/// Modal content keeps this much vertical room free
pub const MODAL_VERTICAL_MARGIN: f32 = 200.0;

/// Length of the random suffix in generated modal ids
pub const MODAL_ID_SUFFIX_LEN: usize = 9;

/// Modals suspend page scrolling by default
pub const LOCK_SCROLL: bool = true;

/// Default gallery window dimensions
pub const DEFAULT_WINDOW_WIDTH: f32 = 900.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 640.0;
