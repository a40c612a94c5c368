//! Settings vocabulary shared by every configuration layer.
//!
//! A layer is a sparse [`Settings`] map keyed by the closed [`SettingKey`] enumeration. Raw
//! JSON/YAML mappings are converted at the source boundary ([`Settings::from_json`]); values
//! themselves are kept as loose JSON so malformed values travel through the pipeline untouched.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

mod global;

pub use global::GlobalSettings;

/// Every configuration field a layer may carry.
///
/// Declaration order is the order change sets are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    AnimationDuration,
    ColorFreezeLevel,
    InitialExpandLevel,
    SplitDirection,
    NodeMinHeight,
    SpacingVertical,
    SpacingHorizontal,
    PaddingX,
    Coloring,
    DefaultColor,
    Depth1Color,
    Depth2Color,
    Depth3Color,
    MaxWidth,
    ScreenshotBgColor,
    ScreenshotBgStyle,
    ScreenshotTextColor,
    Color,
    Depth1Thickness,
    Depth2Thickness,
    Depth3Thickness,
    DefaultThickness,
    Highlight,
    LineHeight,
    UseThemeFont,
}

impl SettingKey {
    pub const ALL: [SettingKey; 25] = [
        SettingKey::AnimationDuration,
        SettingKey::ColorFreezeLevel,
        SettingKey::InitialExpandLevel,
        SettingKey::SplitDirection,
        SettingKey::NodeMinHeight,
        SettingKey::SpacingVertical,
        SettingKey::SpacingHorizontal,
        SettingKey::PaddingX,
        SettingKey::Coloring,
        SettingKey::DefaultColor,
        SettingKey::Depth1Color,
        SettingKey::Depth2Color,
        SettingKey::Depth3Color,
        SettingKey::MaxWidth,
        SettingKey::ScreenshotBgColor,
        SettingKey::ScreenshotBgStyle,
        SettingKey::ScreenshotTextColor,
        SettingKey::Color,
        SettingKey::Depth1Thickness,
        SettingKey::Depth2Thickness,
        SettingKey::Depth3Thickness,
        SettingKey::DefaultThickness,
        SettingKey::Highlight,
        SettingKey::LineHeight,
        SettingKey::UseThemeFont,
    ];

    /// The wire name used in front-matter and settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::AnimationDuration => "animationDuration",
            SettingKey::ColorFreezeLevel => "colorFreezeLevel",
            SettingKey::InitialExpandLevel => "initialExpandLevel",
            SettingKey::SplitDirection => "splitDirection",
            SettingKey::NodeMinHeight => "nodeMinHeight",
            SettingKey::SpacingVertical => "spacingVertical",
            SettingKey::SpacingHorizontal => "spacingHorizontal",
            SettingKey::PaddingX => "paddingX",
            SettingKey::Coloring => "coloring",
            SettingKey::DefaultColor => "defaultColor",
            SettingKey::Depth1Color => "depth1Color",
            SettingKey::Depth2Color => "depth2Color",
            SettingKey::Depth3Color => "depth3Color",
            SettingKey::MaxWidth => "maxWidth",
            SettingKey::ScreenshotBgColor => "screenshotBgColor",
            SettingKey::ScreenshotBgStyle => "screenshotBgStyle",
            SettingKey::ScreenshotTextColor => "screenshotTextColor",
            SettingKey::Color => "color",
            SettingKey::Depth1Thickness => "depth1Thickness",
            SettingKey::Depth2Thickness => "depth2Thickness",
            SettingKey::Depth3Thickness => "depth3Thickness",
            SettingKey::DefaultThickness => "defaultThickness",
            SettingKey::Highlight => "highlight",
            SettingKey::LineHeight => "lineHeight",
            SettingKey::UseThemeFont => "useThemeFont",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::MissingClassification {
                field: s.to_string(),
            })
    }
}

/// Where a configuration layer comes from. Later sources win on overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsSource {
    Global,
    Document,
    Block,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SettingsSource::Global => "global",
            SettingsSource::Document => "document",
            SettingsSource::Block => "block",
        })
    }
}

/// Compares layers with [`values_equal`], so `80` and `80.0` are the same setting.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<SettingKey, Value>);

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(key, value)| other.0.get(key).is_some_and(|v| values_equal(value, v)))
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a raw mapping into a layer.
    ///
    /// `null` is an empty layer. Any other non-mapping value is rejected, as is a key outside
    /// [`SettingKey`]. Values are not validated.
    pub fn from_json(origin: SettingsSource, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Self::from_map(map),
            other => Err(Error::MalformedSource {
                origin,
                message: format!("expected a mapping, found {}", json_kind(other)),
            }),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut out = Self::new();
        for (raw_key, value) in map {
            let key = raw_key.parse::<SettingKey>()?;
            out.0.insert(key, value.clone());
        }
        Ok(out)
    }

    pub fn get(&self, key: SettingKey) -> Option<&Value> {
        self.0.get(&key)
    }

    pub fn get_f64(&self, key: SettingKey) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    pub fn get_str(&self, key: SettingKey) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_bool(&self, key: SettingKey) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn contains(&self, key: SettingKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn insert(&mut self, key: SettingKey, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key, value.into())
    }

    pub fn remove(&mut self, key: SettingKey) -> Option<Value> {
        self.0.remove(&key)
    }

    pub fn with(mut self, key: SettingKey, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &Value)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = SettingKey> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow rightmost-wins overlay: every field of `other` replaces the field here.
    pub fn overlay(&mut self, other: &Settings) {
        for (key, value) in &other.0 {
            self.0.insert(*key, value.clone());
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(SettingKey, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (SettingKey, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Structural equality on JSON values where numbers compare numerically.
///
/// YAML integers and `f64` defaults meet in the same snapshot; `serde_json::Number` alone would
/// tell `80` from `80.0`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
