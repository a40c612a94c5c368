//! Folding a change set into a single render decision.

use crate::config::{SettingKey, Settings};
use crate::pipeline::ChangeSet;
use crate::strategy::policy;
use crate::style::{StyleTarget, apply_style_effect};
use serde::Serialize;

/// What one batch of simultaneous changes requires from the visualization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDecision {
    pub will_full_render: bool,
    /// Current values of the options-only fields that changed.
    pub options_delta: Settings,
    /// Set when an options-only field changed, including when it was removed and therefore has
    /// no entry in `options_delta`.
    pub options_changed: bool,
    /// Fields whose style effect was applied while folding.
    pub restyled: Vec<SettingKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualizationCall {
    SetData,
    SetOptions,
}

impl RenderDecision {
    /// The single visualization call this decision needs, if any.
    pub fn call(&self) -> Option<VisualizationCall> {
        if self.will_full_render {
            Some(VisualizationCall::SetData)
        } else if self.options_changed {
            Some(VisualizationCall::SetOptions)
        } else {
            None
        }
    }
}

/// Classifies every change in the batch and folds the result.
///
/// Style effects are applied to `target` as they are encountered, whether or not a full render
/// follows.
pub fn fold_changes(
    changes: &ChangeSet,
    effective: &Settings,
    target: &mut impl StyleTarget,
) -> RenderDecision {
    let mut decision = RenderDecision::default();

    for key in changes.keys() {
        let policy = policy(key);
        let value = effective.get(key);

        if policy.mutates_style() && apply_style_effect(target, key, value) {
            decision.restyled.push(key);
        }
        if policy.forces_full_render() {
            decision.will_full_render = true;
        }
        if policy.sets_options() {
            decision.options_changed = true;
            if let Some(value) = value {
                decision.options_delta.insert(key, value.clone());
            }
        }
    }

    tracing::debug!(
        changed = changes.len(),
        full_render = decision.will_full_render,
        options_only = decision.options_changed,
        restyled = decision.restyled.len(),
        "folded settings changes"
    );
    decision
}
