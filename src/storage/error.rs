//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the durable store. Malformed stored values are not errors;
/// readers treat them as absent.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access storage file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
