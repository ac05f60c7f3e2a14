use std::path::PathBuf;

/// Errors from loading a specification document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error from a reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The top level of the document is not a mapping of type names.
    #[error("specification must be a mapping of type names, got {0}")]
    NotAMapping(&'static str),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
