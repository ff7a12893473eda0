use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry: read failed: {0}")]
    Read(String),

    /// The identity already holds an entry. An expected business-rule
    /// rejection, not a bug; the registry is the final race-breaker.
    #[error("registry: identity {0} is already registered")]
    AlreadyRegistered(String),

    #[error("registry: commit failed: {0}")]
    Commit(String),
}
