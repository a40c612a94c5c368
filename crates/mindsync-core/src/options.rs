//! Visualization options derived from an effective snapshot.
//!
//! Options are always rebuilt from the complete snapshot; nothing here is incremental.

use crate::config::{SettingKey, Settings};
use crate::tree::MindmapNode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// d3 `schemeCategory10`, the palette used when no `color` list is configured.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkmapOptions {
    pub auto_fit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub embed_global_css: bool,
    pub fit_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_horizontal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_vertical: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_expand_level: Option<f64>,
}

impl MarkmapOptions {
    pub fn derive(settings: &Settings, root: &MindmapNode) -> Self {
        Self {
            auto_fit: false,
            color: ColorScheme::select(settings, root),
            duration: number(settings, SettingKey::AnimationDuration),
            embed_global_css: true,
            fit_ratio: 1.0,
            max_width: number(settings, SettingKey::MaxWidth),
            node_min_height: number(settings, SettingKey::NodeMinHeight),
            padding_x: number(settings, SettingKey::PaddingX),
            spacing_horizontal: number(settings, SettingKey::SpacingHorizontal),
            spacing_vertical: number(settings, SettingKey::SpacingVertical),
            initial_expand_level: number(settings, SettingKey::InitialExpandLevel),
        }
    }

    /// Overlays options-only fields.
    pub fn apply_delta(&mut self, delta: &Settings) {
        for (key, value) in delta.iter() {
            match key {
                SettingKey::AnimationDuration => self.duration = value.as_f64(),
                other => tracing::debug!(key = %other, "field has no options-only counterpart"),
            }
        }
    }
}

/// The payload of a visualization call: `{ options, ...delta }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub options: MarkmapOptions,
    pub delta: Settings,
}

impl RenderOptions {
    pub fn new(mut options: MarkmapOptions, delta: Settings) -> Self {
        options.apply_delta(&delta);
        Self { options, delta }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ColorScheme {
    /// Colour by node depth.
    Depth(DepthColors),
    /// Colour by branch, optionally frozen below a level.
    Branch(BranchColors),
    /// One colour everywhere.
    Single { color: Option<String> },
}

impl ColorScheme {
    /// Picks the scheme named by `coloring`. Unknown or missing values leave colouring to the
    /// visualization's defaults.
    pub fn select(settings: &Settings, root: &MindmapNode) -> Option<Self> {
        let palette = string_list(settings.get(SettingKey::Color));
        match settings.get_str(SettingKey::Coloring)? {
            "depth" => Some(ColorScheme::Depth(DepthColors {
                palette,
                levels: [
                    string(settings, SettingKey::Depth1Color),
                    string(settings, SettingKey::Depth2Color),
                    string(settings, SettingKey::Depth3Color),
                ],
                fallback: string(settings, SettingKey::DefaultColor),
            })),
            "branch" => {
                let freeze_level = settings
                    .get_f64(SettingKey::ColorFreezeLevel)
                    .filter(|level| *level >= 1.0)
                    .map(|level| level as usize);
                Some(ColorScheme::Branch(BranchColors::for_tree(
                    palette,
                    freeze_level,
                    root,
                )))
            }
            "single" => Some(ColorScheme::Single {
                color: string(settings, SettingKey::DefaultColor),
            }),
            other => {
                tracing::warn!(coloring = other, "unknown coloring mode");
                None
            }
        }
    }

    pub fn color_for(&self, node: &MindmapNode) -> Option<&str> {
        match self {
            ColorScheme::Depth(colors) => colors.color_for(node.depth),
            ColorScheme::Branch(colors) => colors.color_for(node),
            ColorScheme::Single { color } => color.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthColors {
    /// Explicit per-depth cycle; takes precedence over `levels` when non-empty.
    pub palette: Vec<String>,
    pub levels: [Option<String>; 3],
    pub fallback: Option<String>,
}

impl DepthColors {
    pub fn color_for(&self, depth: usize) -> Option<&str> {
        if !self.palette.is_empty() {
            return Some(self.palette[depth % self.palette.len()].as_str());
        }
        match self.levels.get(depth) {
            Some(level) => level.as_deref(),
            None => self.fallback.as_deref(),
        }
    }
}

/// Ordinal branch colouring.
///
/// Keys are node paths, truncated to `freeze_level` segments when set; they receive palette slots
/// in tree pre-order, which is the order a renderer asks for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchColors {
    pub palette: Vec<String>,
    pub freeze_level: Option<usize>,
    pub assignments: IndexMap<String, usize>,
}

impl BranchColors {
    pub fn for_tree(palette: Vec<String>, freeze_level: Option<usize>, root: &MindmapNode) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };

        let mut colors = Self {
            palette,
            freeze_level,
            assignments: IndexMap::new(),
        };
        for node in root.walk() {
            let key = colors.key_for(&node.path);
            let next = colors.assignments.len();
            colors.assignments.entry(key).or_insert(next);
        }
        colors
    }

    fn key_for(&self, path: &str) -> String {
        match self.freeze_level {
            Some(level) => path.split('.').take(level).collect::<Vec<_>>().join("."),
            None => path.to_string(),
        }
    }

    pub fn color_for(&self, node: &MindmapNode) -> Option<&str> {
        if let [solid] = self.palette.as_slice() {
            return Some(solid.as_str());
        }
        let slot = self.assignments.get(&self.key_for(&node.path))?;
        Some(self.palette[slot % self.palette.len()].as_str())
    }
}

fn number(settings: &Settings, key: SettingKey) -> Option<f64> {
    let value = settings.get(key)?;
    let n = value.as_f64();
    if n.is_none() {
        tracing::warn!(%key, %value, "expected a number");
    }
    n
}

fn string(settings: &Settings, key: SettingKey) -> Option<String> {
    settings.get_str(key).map(str::to_string)
}

/// `color` may be a single colour or a list of them.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
