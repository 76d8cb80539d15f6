//! Widget Configuration
//!
//! Defaults shared by every widget instance, loaded from TOML or JSON and
//! installed as a GPUI global. Views fall back to `WidgetsConfig::default()`
//! when no global is set.

use std::fs;
use std::path::Path;

use gpui::Global;
use serde::{Deserialize, Serialize};

use crate::components::composite::dropdown::DropdownSize;
use crate::components::composite::modal::ModalSize;
use crate::constants::{DROPDOWN_MAX_HEIGHT, LOCK_SCROLL};
use crate::error::{Error, Result};
use crate::i18n::Locale;

/// Dropdown defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownDefaults {
    /// Menu height cap in pixels
    pub max_height: f32,
    pub size: DropdownSize,
    pub searchable: bool,
    /// Overrides the localized empty-state text
    pub no_options_message: Option<String>,
    /// Overrides the localized placeholder
    pub placeholder: Option<String>,
}

impl Default for DropdownDefaults {
    fn default() -> Self {
        Self {
            max_height: DROPDOWN_MAX_HEIGHT,
            size: DropdownSize::Medium,
            searchable: false,
            no_options_message: None,
            placeholder: None,
        }
    }
}

/// Modal defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalDefaults {
    pub close_on_esc: bool,
    pub close_on_overlay_click: bool,
    pub show_close_button: bool,
    pub size: ModalSize,
    /// Suspend page scrolling while a modal is open
    pub lock_scroll: bool,
}

impl Default for ModalDefaults {
    fn default() -> Self {
        Self {
            close_on_esc: true,
            close_on_overlay_click: true,
            show_close_button: true,
            size: ModalSize::Medium,
            lock_scroll: LOCK_SCROLL,
        }
    }
}

/// Top-level widget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    pub locale: Locale,
    pub dropdown: DropdownDefaults,
    pub modal: ModalDefaults,
}

impl Global for WidgetsConfig {}

impl WidgetsConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no widget config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(Error::Invalid {
                    message: format!("unsupported config extension: {other:?}"),
                });
            }
        };
        tracing::info!(path = %path.display(), "loaded widget config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.dropdown.max_height.is_finite() && self.dropdown.max_height > 0.0) {
            return Err(Error::Invalid {
                message: format!(
                    "dropdown.max_height must be positive, got {}",
                    self.dropdown.max_height
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = WidgetsConfig::from_toml_str("").expect("parse");
        assert_eq!(config, WidgetsConfig::default());
        assert_eq!(config.dropdown.max_height, 250.0);
        assert!(config.modal.close_on_esc);
    }

    #[test]
    fn test_partial_toml() {
        let config = WidgetsConfig::from_toml_str(
            r#"
            locale = "zh-CN"

            [dropdown]
            size = "sm"
            searchable = true
            no_options_message = "Nothing here"

            [modal]
            close_on_overlay_click = false
            size = "large"
            "#,
        )
        .expect("parse");

        assert_eq!(config.locale, Locale::ZhCN);
        assert_eq!(config.dropdown.size, DropdownSize::Small);
        assert!(config.dropdown.searchable);
        assert_eq!(config.dropdown.no_options_message.as_deref(), Some("Nothing here"));
        assert_eq!(config.dropdown.max_height, 250.0);
        assert!(!config.modal.close_on_overlay_click);
        assert!(config.modal.close_on_esc);
        assert_eq!(config.modal.size, ModalSize::Large);
    }

    #[test]
    fn test_json_config() {
        let config =
            WidgetsConfig::from_json_str(r#"{"dropdown": {"max_height": 120}}"#).expect("parse");
        assert_eq!(config.dropdown.max_height, 120.0);
    }

    #[test]
    fn test_rejects_non_positive_height() {
        let result = WidgetsConfig::from_toml_str("[dropdown]\nmax_height = 0");
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let result = WidgetsConfig::from_toml_str("[dropdown\n");
        assert!(matches!(result, Err(Error::TomlDe { .. })));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = WidgetsConfig::load("/nonexistent/dfc-widgets.toml").expect("load");
        assert_eq!(config, WidgetsConfig::default());
    }
}
