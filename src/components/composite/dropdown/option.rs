//! Dropdown options and sizing

use gpui::SharedString;
use serde::{Deserialize, Serialize};

/// A single entry in a dropdown list
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    /// Value reported on selection, unique within one list
    pub value: String,
    /// Display text, may be empty
    pub label: SharedString,
    /// Secondary line shown under the label
    pub description: Option<SharedString>,
    /// Glyph rendered before the label
    pub icon: Option<SharedString>,
    /// Disabled entries render but can never be highlighted or chosen
    pub disabled: bool,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            icon: None,
            disabled: false,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Case-insensitive substring match on the label
    ///
    /// An empty term matches every option, disabled ones included.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Visual density of the dropdown control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownSize {
    #[serde(alias = "sm")]
    Small,
    #[default]
    #[serde(alias = "md")]
    Medium,
    #[serde(alias = "lg")]
    Large,
}

impl DropdownSize {
    /// Horizontal padding, vertical padding and font size in pixels
    pub fn metrics(&self) -> (f32, f32, f32) {
        match self {
            Self::Small => (8.0, 4.0, 12.0),
            Self::Medium => (12.0, 8.0, 14.0),
            Self::Large => (16.0, 10.0, 16.0),
        }
    }
}
