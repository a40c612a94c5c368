use crate::config::SettingsSource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting `{field}` has no render strategy")]
    MissingClassification { field: String },

    #[error("Malformed {origin} settings: {message}")]
    MalformedSource {
        origin: SettingsSource,
        message: String,
    },

    #[error("Invalid YAML front-matter: {message}")]
    InvalidFrontMatterYaml { message: String },

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Visualization {operation} failed: {source}")]
    Render {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
