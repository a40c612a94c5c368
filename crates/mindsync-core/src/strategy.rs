//! Per-field render policy.
//!
//! [`policy`] is an exhaustive `match`, so adding a [`SettingKey`] without deciding how it renders
//! does not compile. Raw names coming from outside the enumeration fail in [`classify`].

use crate::config::SettingKey;
use crate::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderStrategy {
    /// Direct style mutation on the container; no visualization call.
    Css,
    /// Style mutation plus a full data re-render.
    CssAndMarkmap,
    /// Full data re-render.
    Markmap,
    /// The field value is merged into an options-only update.
    SetOptions,
}

impl RenderStrategy {
    pub fn mutates_style(self) -> bool {
        matches!(self, RenderStrategy::Css | RenderStrategy::CssAndMarkmap)
    }

    pub fn forces_full_render(self) -> bool {
        matches!(self, RenderStrategy::Markmap | RenderStrategy::CssAndMarkmap)
    }
}

/// A field maps either to one strategy or to an ordered list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    One(RenderStrategy),
    Many(&'static [RenderStrategy]),
}

impl Policy {
    pub fn strategies(&self) -> &[RenderStrategy] {
        match self {
            Policy::One(strategy) => std::slice::from_ref(strategy),
            Policy::Many(strategies) => strategies,
        }
    }

    pub fn mutates_style(&self) -> bool {
        self.strategies().iter().any(|s| s.mutates_style())
    }

    pub fn forces_full_render(&self) -> bool {
        self.strategies().iter().any(|s| s.forces_full_render())
    }

    pub fn sets_options(&self) -> bool {
        self.strategies().contains(&RenderStrategy::SetOptions)
    }
}

const STYLE_AND_DATA: &[RenderStrategy] = &[RenderStrategy::Css, RenderStrategy::Markmap];

pub fn policy(key: SettingKey) -> Policy {
    use RenderStrategy::*;
    use SettingKey::*;

    match key {
        AnimationDuration => Policy::One(SetOptions),

        ColorFreezeLevel | InitialExpandLevel => Policy::One(Markmap),

        SplitDirection | NodeMinHeight | SpacingVertical | SpacingHorizontal | PaddingX => {
            Policy::One(Markmap)
        }

        Coloring | DefaultColor | Depth1Color | Depth2Color | Depth3Color => Policy::One(Markmap),

        MaxWidth | ScreenshotBgColor | ScreenshotBgStyle | ScreenshotTextColor | Color => {
            Policy::One(Markmap)
        }

        Depth1Thickness | Depth2Thickness | Depth3Thickness | DefaultThickness => Policy::One(Css),

        // The body-level highlight toggle is driven by document front-matter separately; see
        // `style::apply_highlight`.
        Highlight | LineHeight => Policy::One(Css),

        UseThemeFont => Policy::Many(STYLE_AND_DATA),
    }
}

/// Looks up a raw field name.
pub fn classify(field: &str) -> Result<Policy> {
    Ok(policy(field.parse::<SettingKey>()?))
}
