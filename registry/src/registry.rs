use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One committed registration: an identity bound to a face.
///
/// Created once, never mutated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Wallet address or other identity binding.
    pub identity: String,
    /// Canonical hex face hash of the registered embedding.
    pub face_hash: String,
    /// Content address of the stored embedding payload.
    pub content_address: String,
    pub created_at: DateTime<Utc>,
}

impl RegistryEntry {
    /// True for the zero/empty sentinel some registries return for
    /// unbound identities or unwritten slots.
    pub fn is_empty(&self) -> bool {
        self.identity.is_empty() || self.content_address.is_empty()
    }
}

/// Payload for a new registration commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub identity: String,
    pub face_hash: String,
    pub content_address: String,
    /// Key material bound alongside the face hash.
    pub public_key: String,
}

/// Receipt returned by the registry for a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub transaction: String,
}

/// Append-only external registry of identity bindings.
///
/// At most one entry per identity, enforced by the registry itself;
/// callers still re-check before committing.
///
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait]
pub trait Registry: Send + Sync {
    /// Number of committed entries at call time. May grow between calls.
    async fn count(&self) -> Result<u64, RegistryError>;

    /// Entry at the given index in commit order.
    async fn entry_at(&self, index: u64) -> Result<RegistryEntry, RegistryError>;

    /// Entry bound to the identity, or None if unbound.
    async fn entry_for(&self, identity: &str) -> Result<Option<RegistryEntry>, RegistryError>;

    /// Append a new entry. Fails with [`RegistryError::AlreadyRegistered`]
    /// if the identity is already bound.
    async fn commit(&self, entry: &NewEntry) -> Result<CommitReceipt, RegistryError>;
}

/// Result of enumerating the registry: the readable entries plus the
/// number of indices that could not be read.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub entries: Vec<RegistryEntry>,
    pub skipped: usize,
}

/// Enumerates all committed entries, index 0..count-1.
///
/// The count is read once; each index is then fetched independently. A
/// failed index read degrades coverage instead of aborting: it is logged,
/// counted in `skipped`, and enumeration continues. Empty sentinel
/// entries are dropped silently. Only a failed count read is an error.
///
/// A registration concurrent with the enumeration may be missed; the
/// caller gets best-effort coverage of the registry as of the count read.
pub async fn list_entries(registry: &dyn Registry) -> Result<Enumeration, RegistryError> {
    let count = registry.count().await?;

    let mut enumeration = Enumeration {
        entries: Vec::with_capacity(count as usize),
        skipped: 0,
    };
    for index in 0..count {
        match registry.entry_at(index).await {
            Ok(entry) if entry.is_empty() => {
                tracing::debug!(index, "empty registry slot, skipping");
            }
            Ok(entry) => enumeration.entries.push(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "registry entry read failed, skipping");
                enumeration.skipped += 1;
            }
        }
    }
    Ok(enumeration)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::memory::MemoryRegistry;

    fn new_entry(identity: &str) -> NewEntry {
        NewEntry {
            identity: identity.into(),
            face_hash: format!("hash-{identity}"),
            content_address: format!("addr-{identity}"),
            public_key: String::new(),
        }
    }

    #[tokio::test]
    async fn list_entries_empty_registry() {
        let reg = MemoryRegistry::new();
        let e = list_entries(&reg).await.unwrap();
        assert!(e.entries.is_empty());
        assert_eq!(e.skipped, 0);
    }

    #[tokio::test]
    async fn list_entries_returns_commit_order() {
        let reg = MemoryRegistry::new();
        reg.commit(&new_entry("0xaaa")).await.unwrap();
        reg.commit(&new_entry("0xbbb")).await.unwrap();

        let e = list_entries(&reg).await.unwrap();
        assert_eq!(e.entries.len(), 2);
        assert_eq!(e.entries[0].identity, "0xaaa");
        assert_eq!(e.entries[1].identity, "0xbbb");
    }

    // Fails every other index read; count and the rest succeed.
    struct FlakyRegistry {
        inner: MemoryRegistry,
        calls: AtomicU64,
    }

    #[async_trait]
    impl Registry for FlakyRegistry {
        async fn count(&self) -> Result<u64, RegistryError> {
            self.inner.count().await
        }

        async fn entry_at(&self, index: u64) -> Result<RegistryEntry, RegistryError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
                return Err(RegistryError::Read("transient".into()));
            }
            self.inner.entry_at(index).await
        }

        async fn entry_for(&self, identity: &str) -> Result<Option<RegistryEntry>, RegistryError> {
            self.inner.entry_for(identity).await
        }

        async fn commit(&self, entry: &NewEntry) -> Result<CommitReceipt, RegistryError> {
            self.inner.commit(entry).await
        }
    }

    #[tokio::test]
    async fn list_entries_skips_failed_reads() {
        let inner = MemoryRegistry::new();
        for i in 0..4 {
            inner.commit(&new_entry(&format!("0x{i}"))).await.unwrap();
        }
        let reg = FlakyRegistry {
            inner,
            calls: AtomicU64::new(0),
        };

        let e = list_entries(&reg).await.unwrap();
        assert_eq!(e.entries.len(), 2);
        assert_eq!(e.skipped, 2);
    }

    #[tokio::test]
    async fn empty_sentinel_detection() {
        let mut entry = RegistryEntry {
            identity: "0xabc".into(),
            face_hash: "h".into(),
            content_address: "a".into(),
            created_at: Utc::now(),
        };
        assert!(!entry.is_empty());
        entry.identity.clear();
        assert!(entry.is_empty());
    }
}
