use facegate_registry::RegistryError;
use facegate_store::StoreError;
use thiserror::Error;

/// Errors surfaced by uniqueness checks and registration attempts.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Candidate embedding failed statistical validation. No partial
    /// state was created.
    #[error("verify: invalid embedding: {0}")]
    InvalidEmbedding(String),

    /// Candidate length does not match the configured dimension.
    #[error("verify: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Identity already holds a registry entry. An expected business
    /// outcome, surfaced verbatim.
    #[error("verify: identity {0} is already registered")]
    AlreadyRegistered(String),

    #[error("verify: config: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
