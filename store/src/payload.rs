use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blob stored at a content address: the embedding plus upload metadata.
///
/// `created_at` is part of the stored bytes, so re-uploading the same
/// embedding later yields a different content address. Payload-identical
/// records stay distinct in the store on purpose (each upload is an audit
/// record); readers deduplicate by content address, not by payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingPayload {
    pub embedding: Vec<f32>,
    /// Identity the upload was made for (wallet address).
    pub identity: String,
    pub created_at: DateTime<Utc>,
}

impl EmbeddingPayload {
    /// Creates a payload stamped with the current time.
    pub fn new(identity: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            identity: identity.into(),
            created_at: Utc::now(),
        }
    }
}
