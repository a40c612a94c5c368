use super::{Settings, SettingsSource};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Process-wide defaults as stored by the host.
///
/// Every pipeline field is populated, so the global layer alone is enough to render. The two
/// trailing flags belong to the host and never enter the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub split_direction: String,
    pub node_min_height: f64,
    pub line_height: String,
    pub spacing_vertical: f64,
    pub spacing_horizontal: f64,
    pub padding_x: f64,
    pub initial_expand_level: i64,
    pub color_freeze_level: i64,
    pub animation_duration: f64,
    pub max_width: f64,
    pub highlight: bool,
    pub coloring: String,
    pub depth1_color: String,
    pub depth1_thickness: String,
    pub depth2_color: String,
    pub depth2_thickness: String,
    pub depth3_color: String,
    pub depth3_thickness: String,
    pub default_color: String,
    pub default_thickness: String,
    pub screenshot_bg_color: String,
    pub screenshot_bg_style: String,
    pub screenshot_text_color: String,
    pub use_theme_font: bool,

    pub title_as_root_node: bool,
    pub screenshot_text_color_enabled: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            split_direction: "horizontal".to_string(),
            node_min_height: 16.0,
            line_height: "1em".to_string(),
            spacing_vertical: 5.0,
            spacing_horizontal: 80.0,
            padding_x: 8.0,
            initial_expand_level: -1,
            color_freeze_level: 0,
            animation_duration: 500.0,
            max_width: 0.0,
            highlight: true,
            coloring: "depth".to_string(),
            depth1_color: "#cb4b16".to_string(),
            depth1_thickness: "3".to_string(),
            depth2_color: "#6c71c4".to_string(),
            depth2_thickness: "1.5".to_string(),
            depth3_color: "#859900".to_string(),
            depth3_thickness: "1".to_string(),
            default_color: "#b58900".to_string(),
            default_thickness: "1".to_string(),
            screenshot_bg_color: "#002b36".to_string(),
            screenshot_bg_style: "color".to_string(),
            screenshot_text_color: "#fdf6e3".to_string(),
            use_theme_font: false,
            title_as_root_node: true,
            screenshot_text_color_enabled: false,
        }
    }
}

impl GlobalSettings {
    /// Builds the global layer, leaving out the host-only flags.
    pub fn to_settings(&self) -> Result<Settings> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("titleAsRootNode");
            map.remove("screenshotTextColorEnabled");
        }
        Settings::from_json(SettingsSource::Global, &value)
    }
}
