//! One rendering session: a tree, its container, and the visualization drawing it.

use crate::config::Settings;
use crate::dispatch::{RenderDecision, VisualizationCall, fold_changes};
use crate::options::{MarkmapOptions, RenderOptions};
use crate::pipeline::{SettingsPipeline, SettingsUpdate};
use crate::style::StyleTarget;
use crate::tree::MindmapNode;
use crate::{Error, Result};
use serde::Serialize;
use std::convert::Infallible;

/// The drawing engine behind a session.
pub trait Visualization {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Full re-render from the tree.
    fn set_data(
        &mut self,
        root: &MindmapNode,
        options: &RenderOptions,
    ) -> std::result::Result<(), Self::Error>;

    /// Options-only update of the existing drawing.
    fn set_options(&mut self, options: &RenderOptions) -> std::result::Result<(), Self::Error>;

    fn fit(&mut self) -> std::result::Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum VisualizationEvent {
    SetData { nodes: usize, options: RenderOptions },
    SetOptions { options: RenderOptions },
    Fit,
}

/// A [`Visualization`] that only records what it was asked to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingVisualization {
    pub events: Vec<VisualizationEvent>,
}

impl RecordingVisualization {
    pub fn set_data_calls(&self) -> usize {
        self.count(|e| matches!(e, VisualizationEvent::SetData { .. }))
    }

    pub fn set_options_calls(&self) -> usize {
        self.count(|e| matches!(e, VisualizationEvent::SetOptions { .. }))
    }

    pub fn fit_calls(&self) -> usize {
        self.count(|e| matches!(e, VisualizationEvent::Fit))
    }

    fn count(&self, f: impl Fn(&VisualizationEvent) -> bool) -> usize {
        self.events.iter().filter(|e| f(e)).count()
    }
}

impl Visualization for RecordingVisualization {
    type Error = Infallible;

    fn set_data(
        &mut self,
        root: &MindmapNode,
        options: &RenderOptions,
    ) -> std::result::Result<(), Infallible> {
        self.events.push(VisualizationEvent::SetData {
            nodes: root.node_count(),
            options: options.clone(),
        });
        Ok(())
    }

    fn set_options(&mut self, options: &RenderOptions) -> std::result::Result<(), Infallible> {
        self.events.push(VisualizationEvent::SetOptions {
            options: options.clone(),
        });
        Ok(())
    }

    fn fit(&mut self) -> std::result::Result<(), Infallible> {
        self.events.push(VisualizationEvent::Fit);
        Ok(())
    }
}

/// Keeps one visualization in sync with the global, document and block settings layers.
///
/// Every push runs merge, diff, classification and dispatch to completion before returning.
#[derive(Debug)]
pub struct RenderSession<V, S> {
    root: MindmapNode,
    pipeline: SettingsPipeline,
    visualization: V,
    container: S,
    has_rendered: bool,
    has_fit: bool,
}

impl<V: Visualization, S: StyleTarget> RenderSession<V, S> {
    /// `block` is the rendered block's own configuration and stays fixed for the session.
    pub fn new(mut root: MindmapNode, block: Settings, visualization: V, container: S) -> Self {
        root.index();
        Self {
            root,
            pipeline: SettingsPipeline::new(block),
            visualization,
            container,
            has_rendered: false,
            has_fit: false,
        }
    }

    /// Pushes the global layer. `Ok(None)` means nothing changed or a layer is still missing.
    ///
    /// An `Err` means the `setData`/`setOptions` call failed. A failed fit after a successful
    /// render does not fail the update.
    pub fn update_global(&mut self, settings: Settings) -> Result<Option<RenderDecision>> {
        match self.pipeline.push_global(settings) {
            Some(update) => self.dispatch(update).map(Some),
            None => Ok(None),
        }
    }

    /// Pushes the document layer; same contract as [`Self::update_global`].
    pub fn update_document(&mut self, settings: Settings) -> Result<Option<RenderDecision>> {
        match self.pipeline.push_document(settings) {
            Some(update) => self.dispatch(update).map(Some),
            None => Ok(None),
        }
    }

    fn dispatch(&mut self, update: SettingsUpdate) -> Result<RenderDecision> {
        let SettingsUpdate { changes, effective } = update;
        let decision = fold_changes(&changes, &effective, &mut self.container);

        let Some(call) = decision.call() else {
            return Ok(decision);
        };

        let options = RenderOptions::new(
            MarkmapOptions::derive(&effective, &self.root),
            decision.options_delta.clone(),
        );
        match call {
            VisualizationCall::SetData => self
                .visualization
                .set_data(&self.root, &options)
                .map_err(|e| render_error("setData", e))?,
            VisualizationCall::SetOptions => self
                .visualization
                .set_options(&options)
                .map_err(|e| render_error("setOptions", e))?,
        }
        self.has_rendered = true;
        // The render went through; a failed fit is logged and retried on the next render.
        if let Err(err) = self.fit() {
            tracing::warn!(error = %err, "fit after render failed");
        }

        Ok(decision)
    }

    /// Fits the drawing to its viewport, at most once per session and only after something has
    /// been rendered. Returns whether the visualization was asked to fit.
    pub fn fit(&mut self) -> Result<bool> {
        if self.has_fit || !self.has_rendered {
            return Ok(false);
        }
        self.visualization.fit().map_err(|e| render_error("fit", e))?;
        self.has_fit = true;
        Ok(true)
    }

    pub fn root(&self) -> &MindmapNode {
        &self.root
    }

    pub fn effective(&self) -> &Settings {
        self.pipeline.effective()
    }

    pub fn visualization(&self) -> &V {
        &self.visualization
    }

    pub fn container(&self) -> &S {
        &self.container
    }

    pub fn has_fit(&self) -> bool {
        self.has_fit
    }

    pub fn into_parts(self) -> (V, S) {
        (self.visualization, self.container)
    }
}

fn render_error<E>(operation: &'static str, err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    tracing::error!(operation, error = %err, "visualization call failed");
    Error::Render {
        operation,
        source: Box::new(err),
    }
}
