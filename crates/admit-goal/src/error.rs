// error.rs - Error types for loading goal drafts.

use thiserror::Error;

/// Errors that can occur while reading a goal draft from disk or stdin.
///
/// Classification itself never fails; these only cover the I/O edge.
#[derive(Debug, Error)]
pub enum DraftError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// The draft is not syntactically valid JSON.
    #[error("invalid JSON draft: {0}")]
    Json(#[from] serde_json::Error),

    /// The draft is not syntactically valid YAML.
    #[error("invalid YAML draft: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its top level is not a mapping.
    #[error("draft must be an object at the top level, found {found}")]
    NotAnObject { found: String },
}
