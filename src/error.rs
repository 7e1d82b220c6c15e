use std::path::PathBuf;
use thiserror::Error;

/// Main error type for funcgraph operations
#[derive(Error, Debug)]
pub enum FuncGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write graph to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FuncGraphError>;
