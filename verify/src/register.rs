use chrono::Utc;
use facegate_embedding::FaceHash;
use facegate_registry::{NewEntry, RegistryEntry, RegistryError};
use facegate_store::EmbeddingPayload;

use crate::error::VerifyError;
use crate::types::{RegistrationOutcome, Uniqueness};
use crate::verify::Verifier;

impl Verifier {
    /// Runs a full registration attempt: validate, upload, verify
    /// uniqueness, then commit with the binding re-checked immediately
    /// before the write.
    ///
    /// Between the uniqueness check and the commit another client may
    /// register a similar face; no lock spans the two steps, and the
    /// registry's one-entry-per-identity constraint is the final
    /// race-breaker. A duplicate rejection from the registry is an
    /// expected outcome and surfaces as
    /// [`VerifyError::AlreadyRegistered`].
    ///
    /// Nothing is written to the registry unless the locally verified
    /// verdict is [`Uniqueness::Unique`].
    pub async fn register(
        &self,
        identity: &str,
        embedding: &[f32],
        public_key: &str,
    ) -> Result<RegistrationOutcome, VerifyError> {
        self.check_candidate(embedding)?;

        if let Some(existing) = self.registry.entry_for(identity).await? {
            if !existing.is_empty() {
                return Err(VerifyError::AlreadyRegistered(identity.to_string()));
            }
        }

        let payload = EmbeddingPayload::new(identity, embedding.to_vec());
        let content_address = self.store.put(&payload).await?;
        tracing::info!(identity = %identity, address = %content_address, "embedding uploaded");

        let report = self
            .check_uniqueness(embedding, identity, Some(&content_address))
            .await?;
        match report.uniqueness {
            Uniqueness::Duplicate { identity: owner, score } => {
                tracing::info!(identity = %identity, matched = %owner, score,
                    "duplicate face, registration refused");
                return Ok(RegistrationOutcome::Duplicate {
                    identity: owner,
                    score,
                });
            }
            Uniqueness::Indeterminate { reason } => {
                tracing::warn!(identity = %identity, reason = %reason,
                    "uniqueness indeterminate, registration withheld");
                return Ok(RegistrationOutcome::Indeterminate { reason });
            }
            Uniqueness::Unique => {}
        }

        // Re-check just before the write; checked-then-acted is racy.
        if let Some(existing) = self.registry.entry_for(identity).await? {
            if !existing.is_empty() {
                return Err(VerifyError::AlreadyRegistered(identity.to_string()));
            }
        }

        let face_hash = FaceHash::of(embedding).to_hex();
        let new_entry = NewEntry {
            identity: identity.to_string(),
            face_hash: face_hash.clone(),
            content_address: content_address.clone(),
            public_key: public_key.to_string(),
        };
        let receipt = match self.registry.commit(&new_entry).await {
            Ok(r) => r,
            Err(RegistryError::AlreadyRegistered(id)) => {
                return Err(VerifyError::AlreadyRegistered(id));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(identity = %identity, transaction = %receipt.transaction,
            "registration committed");

        Ok(RegistrationOutcome::Committed {
            entry: RegistryEntry {
                identity: identity.to_string(),
                face_hash,
                content_address,
                created_at: Utc::now(),
            },
            receipt,
        })
    }
}
