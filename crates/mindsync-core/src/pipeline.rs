//! Layer merging and change detection.
//!
//! [`SettingsPipeline`] owns the three layers plus the previously emitted snapshot. Each push
//! recomputes the effective snapshot, drops it when nothing changed, and otherwise reports the
//! [`ChangeSet`] against the previous one. The first snapshot is diffed against an empty one, so
//! every field present on first render shows up as changed.

use crate::config::{SettingKey, Settings, SettingsSource, values_equal};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub key: SettingKey,
    pub kind: ChangeKind,
}

/// Fields that differ between two snapshots.
///
/// Present fields come first in [`SettingKey`] declaration order, followed by removed fields in
/// the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet(Vec<FieldChange>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = SettingKey> + '_ {
        self.0.iter().map(|c| c.key)
    }

    pub fn contains(&self, key: SettingKey) -> bool {
        self.0.iter().any(|c| c.key == key)
    }
}

/// Compares two snapshots by value; numbers compare numerically.
pub fn diff(previous: &Settings, current: &Settings) -> ChangeSet {
    let mut changes = Vec::new();
    for (key, value) in current.iter() {
        match previous.get(key) {
            None => changes.push(FieldChange {
                key,
                kind: ChangeKind::Added,
            }),
            Some(old) if !values_equal(old, value) => changes.push(FieldChange {
                key,
                kind: ChangeKind::Modified,
            }),
            Some(_) => {}
        }
    }
    for key in previous.keys() {
        if !current.contains(key) {
            changes.push(FieldChange {
                key,
                kind: ChangeKind::Removed,
            });
        }
    }
    ChangeSet(changes)
}

/// The three configuration layers. Global and document start out unknown.
#[derive(Debug, Clone, Default)]
pub struct SettingsLayers {
    pub global: Option<Settings>,
    pub document: Option<Settings>,
    pub block: Settings,
}

impl SettingsLayers {
    pub fn new(block: Settings) -> Self {
        Self {
            global: None,
            document: None,
            block,
        }
    }

    /// `{ ...global, ...document, ...block }`, or `None` until both global and document have been
    /// provided.
    pub fn merged(&self) -> Option<Settings> {
        let mut effective = self.global.clone()?;
        effective.overlay(self.document.as_ref()?);
        effective.overlay(&self.block);
        Some(effective)
    }
}

/// A settled transition between two effective snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    pub changes: ChangeSet,
    pub effective: Settings,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPipeline {
    layers: SettingsLayers,
    previous: Settings,
}

impl SettingsPipeline {
    pub fn new(block: Settings) -> Self {
        Self {
            layers: SettingsLayers::new(block),
            previous: Settings::new(),
        }
    }

    pub fn layers(&self) -> &SettingsLayers {
        &self.layers
    }

    /// The last emitted snapshot (empty before the first emission).
    pub fn effective(&self) -> &Settings {
        &self.previous
    }

    pub fn push_global(&mut self, settings: Settings) -> Option<SettingsUpdate> {
        self.layers.global = Some(settings);
        self.settle(SettingsSource::Global)
    }

    pub fn push_document(&mut self, settings: Settings) -> Option<SettingsUpdate> {
        self.layers.document = Some(settings);
        self.settle(SettingsSource::Document)
    }

    fn settle(&mut self, origin: SettingsSource) -> Option<SettingsUpdate> {
        let Some(current) = self.layers.merged() else {
            tracing::trace!(%origin, "waiting for remaining settings layers");
            return None;
        };
        if current == self.previous {
            tracing::trace!(%origin, "effective settings unchanged");
            return None;
        }

        let changes = diff(&self.previous, &current);
        tracing::trace!(%origin, changed = changes.len(), "effective settings changed");
        self.previous = current.clone();
        Some(SettingsUpdate {
            changes,
            effective: current,
        })
    }
}
