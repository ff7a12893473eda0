//! In-memory content store for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::payload::EmbeddingPayload;
use crate::ContentStore;

/// In-memory [`ContentStore`] backed by a HashMap.
///
/// Addresses are the hex SHA-256 of the JSON-serialized payload, so the
/// same payload bytes always map to the same address within a process.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, EmbeddingPayload>>,
}

impl MemoryStore {
    /// Creates a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops a payload, simulating an address that no gateway can serve.
    pub fn remove(&self, address: &str) {
        if let Ok(mut data) = self.data.lock() {
            data.remove(address);
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn put(&self, payload: &EmbeddingPayload) -> Result<String, StoreError> {
        let bytes = serde_json::to_vec(payload).map_err(|e| StoreError::Decode(e.to_string()))?;
        let address = hex::encode(Sha256::digest(&bytes));
        let mut data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        data.insert(address.clone(), payload.clone());
        Ok(address)
    }

    async fn get(&self, address: &str) -> Result<EmbeddingPayload, StoreError> {
        let data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        data.get(address)
            .cloned()
            .ok_or_else(|| StoreError::ContentUnavailable {
                address: address.to_string(),
                gateways: 0,
            })
    }
}
