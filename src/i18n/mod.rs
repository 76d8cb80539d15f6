//! i18n - Internationalization Module
//!
//! Default strings for the widgets, resolved with HashMap-based lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

use gpui::SharedString;
use serde::{Deserialize, Serialize};

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English (US)
    #[default]
    #[serde(rename = "en-US", alias = "en")]
    EnUS,
    /// Chinese (Simplified)
    #[serde(rename = "zh-CN", alias = "zh")]
    ZhCN,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnUS => "English",
            Locale::ZhCN => "中文",
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> = OnceLock::new();

/// Initialize translations (key -> (en, zh))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Dropdown
    map.insert("dropdown-placeholder", ("Select an option", "请选择"));
    map.insert("dropdown-search", ("Search...", "搜索..."));
    map.insert("dropdown-no-options", ("No options found", "无匹配选项"));

    // Gallery
    map.insert("gallery-title", ("Widget Gallery", "组件示例"));
    map.insert("gallery-open-modal", ("Open modal", "打开对话框"));
    map.insert("gallery-fruit", ("Fruit", "水果"));
    map.insert("gallery-fruit-help", ("Pick one to continue", "请选择一项"));
    map.insert("gallery-confirm", ("Confirm", "确认"));
    map.insert("gallery-cancel", ("Cancel", "取消"));
    map.insert("gallery-city", ("City", "城市"));
    map.insert("gallery-selected", ("Selected", "已选择"));
    map.insert("gallery-none", ("Nothing selected", "未选择"));
    map.insert("gallery-modal-title", ("Choose a city", "选择城市"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> SharedString {
    if let Some(&(en, zh)) = translations().get(key) {
        match locale {
            Locale::EnUS => SharedString::from(en),
            Locale::ZhCN => SharedString::from(zh),
        }
    } else {
        // Fallback: return the key itself
        SharedString::from(key.to_string())
    }
}
