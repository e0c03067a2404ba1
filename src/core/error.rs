//! Error types for terrain generation, instance stores and configuration

use thiserror::Error;

use crate::render::BatchHandle;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Removal or lookup with an index past the end of a dense sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("unknown render batch {0:?}")]
    UnknownBatch(BatchHandle),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
