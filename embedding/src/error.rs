use thiserror::Error;

/// Errors returned by embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("embedding: bad hash encoding: {0}")]
    BadHash(String),
}
