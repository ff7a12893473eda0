use thiserror::Error;

/// Errors returned by content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The single authoritative write endpoint could not be reached or
    /// rejected the upload. Aborts the current registration attempt.
    #[error("store: write endpoint unavailable: {0}")]
    Unavailable(String),

    /// Every configured read gateway failed for this address. For a prior
    /// entry this is a coverage gap, not a hard failure of the whole
    /// uniqueness check.
    #[error("store: content {address} unavailable after {gateways} gateway(s)")]
    ContentUnavailable { address: String, gateways: usize },

    #[error("store: malformed payload: {0}")]
    Decode(String),

    #[error("store: config: {0}")]
    Config(String),

    #[error("store: storage error: {0}")]
    Storage(String),
}
