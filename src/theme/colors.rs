//! Colors - Widget Palette

use gpui::{rgb, rgba, Rgba};

/// Widget color palette - All colors are accessed via associated functions
pub struct WidgetColors;

impl WidgetColors {
    // Text colors
    /// Primary text
    pub fn text_primary() -> Rgba { rgb(0x1f2937) }
    /// Secondary text (descriptions, helper text)
    pub fn text_secondary() -> Rgba { rgb(0x6b7280) }
    /// Muted text (placeholder, disabled)
    pub fn text_muted() -> Rgba { rgb(0x9ca3af) }
    /// Light text (on dark backgrounds)
    pub fn text_light() -> Rgba { rgb(0xffffff) }
    /// Error text
    pub fn text_error() -> Rgba { rgb(0xb91c1c) }

    // Surfaces
    /// Control and menu background
    pub fn surface() -> Rgba { rgb(0xffffff) }
    /// Disabled control background
    pub fn surface_disabled() -> Rgba { rgb(0xf3f4f6) }
    /// Disabled option background
    pub fn option_disabled_bg() -> Rgba { rgb(0xf9fafb) }
    /// Modal overlay
    pub fn overlay() -> Rgba { rgba(0x000000bf) }

    // Borders
    /// Default border
    pub fn border() -> Rgba { rgb(0xd1d5db) }
    /// Menu border
    pub fn border_menu() -> Rgba { rgb(0xe5e7eb) }
    /// Focused border
    pub fn border_focus() -> Rgba { rgb(0x3b82f6) }
    /// Error border
    pub fn border_error() -> Rgba { rgb(0xb91c1c) }

    // Option rows
    /// Row under the pointer
    pub fn option_hover() -> Rgba { rgb(0xdbeafe) }
    /// Keyboard highlight
    pub fn option_highlight() -> Rgba { rgb(0xbfdbfe) }
    /// Currently selected value
    pub fn option_selected() -> Rgba { rgb(0xeff6ff) }

    // Modal headers
    /// Profile variant header gradient start
    pub fn profile_header() -> Rgba { rgb(0x3b82f6) }
    /// Media variant close button background
    pub fn media_close_bg() -> Rgba { rgba(0x00000080) }
}
