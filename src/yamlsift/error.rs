use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A path addressed a location as one container kind after it had
    /// already been built as another.
    #[error("Structural conflict at '{path}': expected {expected}, found {found}")]
    StructuralConflict {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;
