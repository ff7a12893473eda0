//! In-memory registry implementation for tests and local runs.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::RegistryError;
use crate::registry::{CommitReceipt, NewEntry, Registry, RegistryEntry};

/// In-memory [`Registry`] enforcing one entry per identity.
#[derive(Default)]
pub struct MemoryRegistry {
    entries: RwLock<Vec<RegistryEntry>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn count(&self) -> Result<u64, RegistryError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        Ok(entries.len() as u64)
    }

    async fn entry_at(&self, index: u64) -> Result<RegistryEntry, RegistryError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        entries
            .get(index as usize)
            .cloned()
            .ok_or_else(|| RegistryError::Read(format!("index {index} out of range")))
    }

    async fn entry_for(&self, identity: &str) -> Result<Option<RegistryEntry>, RegistryError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        Ok(entries.iter().find(|e| e.identity == identity).cloned())
    }

    async fn commit(&self, entry: &NewEntry) -> Result<CommitReceipt, RegistryError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RegistryError::Commit(e.to_string()))?;
        if entries.iter().any(|e| e.identity == entry.identity) {
            return Err(RegistryError::AlreadyRegistered(entry.identity.clone()));
        }
        entries.push(RegistryEntry {
            identity: entry.identity.clone(),
            face_hash: entry.face_hash.clone(),
            content_address: entry.content_address.clone(),
            created_at: Utc::now(),
        });
        Ok(CommitReceipt {
            transaction: format!("mem-{:06}", entries.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(identity: &str, address: &str) -> NewEntry {
        NewEntry {
            identity: identity.into(),
            face_hash: "h".into(),
            content_address: address.into(),
            public_key: String::new(),
        }
    }

    #[tokio::test]
    async fn commit_and_read_back() {
        let reg = MemoryRegistry::new();
        assert_eq!(reg.count().await.unwrap(), 0);

        let receipt = reg.commit(&new_entry("0xabc", "QmA")).await.unwrap();
        assert!(!receipt.transaction.is_empty());

        assert_eq!(reg.count().await.unwrap(), 1);
        let entry = reg.entry_at(0).await.unwrap();
        assert_eq!(entry.identity, "0xabc");
        assert_eq!(entry.content_address, "QmA");
    }

    #[tokio::test]
    async fn duplicate_identity_rejected() {
        let reg = MemoryRegistry::new();
        reg.commit(&new_entry("0xabc", "QmA")).await.unwrap();

        let err = reg.commit(&new_entry("0xabc", "QmB")).await.unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered(id) if id == "0xabc"));
        assert_eq!(reg.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn entry_for_unbound_identity_is_none() {
        let reg = MemoryRegistry::new();
        assert!(reg.entry_for("0xabc").await.unwrap().is_none());

        reg.commit(&new_entry("0xabc", "QmA")).await.unwrap();
        let entry = reg.entry_for("0xabc").await.unwrap().unwrap();
        assert_eq!(entry.content_address, "QmA");
        assert!(reg.entry_for("0xother").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entry_at_out_of_range_is_read_error() {
        let reg = MemoryRegistry::new();
        let err = reg.entry_at(5).await.unwrap_err();
        assert!(matches!(err, RegistryError::Read(_)));
    }
}
