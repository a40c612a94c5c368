//! Direct style mutations on the rendering container.

use crate::config::SettingKey;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub const HIGHLIGHT_CLASS: &str = "mm-highlight";
pub const HIGHLIGHT_OFF_CLASS: &str = "mm-highlight-off";
pub const THEME_FONT_CLASS: &str = "mm-theme-font";

/// The class list and inline custom properties of an element.
pub trait StyleTarget {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_property(&mut self, name: &str, value: &str);
    fn remove_property(&mut self, name: &str);
}

/// In-memory [`StyleTarget`], for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStyle {
    pub classes: BTreeSet<String>,
    pub properties: BTreeMap<String, String>,
}

impl ContainerStyle {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

impl StyleTarget for ContainerStyle {
    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.properties.remove(name);
    }
}

/// Custom property backing a style-only field, if it has one.
pub fn property_name(key: SettingKey) -> Option<&'static str> {
    match key {
        SettingKey::Depth1Thickness => Some("--mm-depth-1-thickness"),
        SettingKey::Depth2Thickness => Some("--mm-depth-2-thickness"),
        SettingKey::Depth3Thickness => Some("--mm-depth-3-thickness"),
        SettingKey::DefaultThickness => Some("--mm-default-thickness"),
        SettingKey::LineHeight => Some("--mm-line-height"),
        _ => None,
    }
}

/// Applies the style side of `key`. `None` means the field is no longer set and its effect is
/// reset. Returns `false` for fields without a style side.
pub fn apply_style_effect(
    target: &mut impl StyleTarget,
    key: SettingKey,
    value: Option<&Value>,
) -> bool {
    match key {
        SettingKey::Highlight => {
            apply_highlight(target, value);
            true
        }
        SettingKey::UseThemeFont => {
            if value.and_then(Value::as_bool) == Some(true) {
                target.add_class(THEME_FONT_CLASS);
            } else {
                target.remove_class(THEME_FONT_CLASS);
            }
            true
        }
        _ => {
            let Some(name) = property_name(key) else {
                return false;
            };
            match value.and_then(css_value) {
                Some(css) => target.set_property(name, &css),
                None => {
                    if let Some(v) = value {
                        tracing::warn!(%key, value = %v, "ignoring malformed style value");
                    }
                    target.remove_property(name);
                }
            }
            true
        }
    }
}

/// Reflects a tri-state highlight flag as two mutually exclusive classes.
///
/// `true` and `false` select one class each; anything else (absent, `null`, a non-boolean)
/// clears both.
pub fn apply_highlight(target: &mut impl StyleTarget, value: Option<&Value>) {
    match value.and_then(Value::as_bool) {
        Some(true) => {
            target.add_class(HIGHLIGHT_CLASS);
            target.remove_class(HIGHLIGHT_OFF_CLASS);
        }
        Some(false) => {
            target.add_class(HIGHLIGHT_OFF_CLASS);
            target.remove_class(HIGHLIGHT_CLASS);
        }
        None => {
            target.remove_class(HIGHLIGHT_CLASS);
            target.remove_class(HIGHLIGHT_OFF_CLASS);
        }
    }
}

fn css_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
