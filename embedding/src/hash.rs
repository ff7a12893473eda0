use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::EmbeddingError;

/// Canonical fixed-width hash of an embedding.
///
/// The digest is SHA-256 over the little-endian IEEE-754 bytes of each
/// entry in order. One encoding, used everywhere: the hash committed to
/// the registry is the same no matter which component computes it, so
/// there is never a reason to retry a commit with an alternate byte
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceHash([u8; 32]);

impl FaceHash {
    /// Hashes an embedding.
    pub fn of(embedding: &[f32]) -> Self {
        let mut hasher = Sha256::new();
        for v in embedding {
            hasher.update(v.to_le_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Lowercase hex form, 64 chars.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses the hex form produced by [`FaceHash::to_hex`].
    pub fn from_hex(s: &str) -> Result<Self, EmbeddingError> {
        let bytes = hex::decode(s).map_err(|e| EmbeddingError::BadHash(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| EmbeddingError::BadHash("expected 32 bytes".into()))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for FaceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
