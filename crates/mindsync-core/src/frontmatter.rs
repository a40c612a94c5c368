//! YAML front-matter extraction.
//!
//! Both documents and rendered blocks may start with a `---` fenced YAML block. Mindmap settings
//! live under its `markmap` key.

use crate::config::{Settings, SettingsSource};
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^-{3}[ \t]*\r?\n(?:(.*?)\r?\n)?-{3}[ \t]*(?:\r?\n|$)")
        .expect("front-matter regex is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// The parsed YAML, as JSON. `Null` when there is no front-matter.
    pub data: Value,
    /// Everything after the closing fence.
    pub body: String,
}

impl FrontMatter {
    pub fn parse(markdown: &str) -> Result<Self> {
        let Some(caps) = FRONT_MATTER_RE.captures(markdown) else {
            return Ok(Self {
                data: Value::Null,
                body: markdown.to_string(),
            });
        };

        let yaml_body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let data = if yaml_body.trim().is_empty() {
            Value::Null
        } else {
            let raw_yaml: serde_yaml::Value =
                serde_yaml::from_str(yaml_body).map_err(|e| Error::InvalidFrontMatterYaml {
                    message: e.to_string(),
                })?;
            serde_json::to_value(raw_yaml)?
        };

        let end = caps.get(0).map_or(0, |m| m.end());
        Ok(Self {
            data,
            body: markdown[end..].to_string(),
        })
    }

    /// The `markmap` mapping, or `None` when absent.
    pub fn markmap(&self) -> Option<&Value> {
        self.data.as_object()?.get("markmap")
    }

    /// The `markmap` mapping as a settings layer for `origin`.
    pub fn settings(&self, origin: SettingsSource) -> Result<Settings> {
        match self.markmap() {
            Some(value) => Settings::from_json(origin, value),
            None => Ok(Settings::new()),
        }
    }

    /// `markmap.highlight`, whatever its shape.
    pub fn highlight(&self) -> Option<&Value> {
        self.markmap()?.as_object()?.get("highlight")
    }
}

/// Document layer from a markdown document's front-matter.
pub fn document_settings(markdown: &str) -> Result<Settings> {
    FrontMatter::parse(markdown)?.settings(SettingsSource::Document)
}

/// Block layer from a rendered block's own declaration.
pub fn block_settings(source: &str) -> Result<Settings> {
    FrontMatter::parse(source)?.settings(SettingsSource::Block)
}
