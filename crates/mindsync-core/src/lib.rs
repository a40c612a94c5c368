#![forbid(unsafe_code)]

//! Settings reconciliation and render dispatch for markdown mindmaps (headless).
//!
//! A rendered mindmap block is configured by three layers: global defaults, the document's
//! front-matter, and the block's own declaration. [`RenderSession`] keeps a visualization in
//! sync with them:
//!
//! 1. the layers are overlaid (block over document over global),
//! 2. the result is diffed against the previous snapshot,
//! 3. each changed field is classified by [`strategy::policy`],
//! 4. the whole batch is folded into one [`RenderDecision`]; style effects are applied on the
//!    spot and at most one visualization call is made.
//!
//! The markdown parser and the drawing engine are collaborators: the former hands over a
//! [`MindmapNode`] tree, the latter implements [`Visualization`].
//!
//! ```
//! use mindsync_core::{
//!     ContainerStyle, GlobalSettings, MindmapNode, RecordingVisualization, RenderSession,
//!     SettingKey, Settings,
//! };
//!
//! let root = MindmapNode::branch("root", vec![MindmapNode::leaf("child")]);
//! let block = Settings::new().with(SettingKey::SpacingHorizontal, 120);
//! let mut session = RenderSession::new(
//!     root,
//!     block,
//!     RecordingVisualization::default(),
//!     ContainerStyle::default(),
//! );
//!
//! session.update_global(GlobalSettings::default().to_settings()?)?;
//! let decision = session.update_document(Settings::new())?.expect("first render");
//! assert!(decision.will_full_render);
//! assert_eq!(session.visualization().set_data_calls(), 1);
//! # Ok::<(), mindsync_core::Error>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod frontmatter;
pub mod options;
pub mod pipeline;
pub mod session;
pub mod strategy;
pub mod style;
pub mod tree;

pub use config::{GlobalSettings, SettingKey, Settings, SettingsSource};
pub use dispatch::{RenderDecision, VisualizationCall, fold_changes};
pub use error::{Error, Result};
pub use frontmatter::FrontMatter;
pub use options::{ColorScheme, MarkmapOptions, RenderOptions};
pub use pipeline::{ChangeKind, ChangeSet, FieldChange, SettingsPipeline, SettingsUpdate};
pub use session::{RecordingVisualization, RenderSession, Visualization, VisualizationEvent};
pub use strategy::{Policy, RenderStrategy};
pub use style::{ContainerStyle, StyleTarget};
pub use tree::MindmapNode;
