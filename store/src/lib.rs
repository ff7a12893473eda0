//! Content-addressed storage for embedding payloads.
//!
//! Writes go through a single authoritative endpoint; reads fall back
//! across an ordered list of redundant gateways, each bounded by a short
//! timeout, so one slow or rate-limited gateway cannot stall a
//! uniqueness check. The fallback matters: the uniqueness guarantee is
//! only as strong as the fraction of prior payloads actually retrievable.

mod error;
mod http;
mod memory;
mod payload;

pub use error::StoreError;
pub use http::{DEFAULT_GATEWAY_TIMEOUT, HttpStore, StoreConfig};
pub use memory::MemoryStore;
pub use payload::EmbeddingPayload;

use async_trait::async_trait;

/// Content-addressed blob store for embedding payloads.
///
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a payload and return its content address.
    async fn put(&self, payload: &EmbeddingPayload) -> Result<String, StoreError>;

    /// Fetch a payload by content address.
    async fn get(&self, address: &str) -> Result<EmbeddingPayload, StoreError>;
}
