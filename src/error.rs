//! Error types for the image sitemap pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Sitemap serialization errors
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Failed to create sitemap directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write sitemap to {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to replace sitemap at {path:?}: {source}")]
    Replace {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pipeline-level errors
///
/// Entity-level conditions (dangling references, roots that resolve to no
/// media) are not errors; they are recorded in the batch failure list and
/// never interrupt sibling operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Serialization error: {0}")]
    SerializeError(#[from] SerializeError),
}
