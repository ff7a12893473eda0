use std::collections::HashSet;
use std::sync::Arc;

use facegate_embedding::{cosine_similarity, is_match, validate};
use facegate_registry::{Registry, list_entries};
use facegate_store::ContentStore;
use futures::stream::{self, StreamExt};

use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::types::{Uniqueness, UniquenessReport};

/// Orchestrates uniqueness verification against the registry and the
/// content-addressed store.
///
/// Holds no mutable state; one long-lived instance serves concurrent
/// checks. Construction is explicit — callers own the lifetime.
pub struct Verifier {
    pub(crate) config: VerifyConfig,
    pub(crate) store: Arc<dyn ContentStore>,
    pub(crate) registry: Arc<dyn Registry>,
}

impl Verifier {
    pub fn new(
        config: VerifyConfig,
        store: Arc<dyn ContentStore>,
        registry: Arc<dyn Registry>,
    ) -> Self {
        Self {
            config,
            store,
            registry,
        }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Decides whether a candidate embedding is sufficiently distinct
    /// from every previously registered embedding.
    ///
    /// `identity` is the caller's own binding: its entries never count
    /// as matches, so a wallet re-checking itself cannot collide with
    /// itself. `exclude_address` additionally skips the caller's own
    /// just-uploaded payload. Entries sharing an already-seen content
    /// address are compared once.
    ///
    /// Prior entries whose payload cannot be fetched are skipped and
    /// counted, degrading coverage rather than failing the check. If the
    /// registry itself cannot be read, or entries exist but none could
    /// be compared, the outcome is [`Uniqueness::Indeterminate`].
    pub async fn check_uniqueness(
        &self,
        candidate: &[f32],
        identity: &str,
        exclude_address: Option<&str>,
    ) -> Result<UniquenessReport, VerifyError> {
        self.check_candidate(candidate)?;

        let enumeration = match list_entries(self.registry.as_ref()).await {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "registry enumeration failed, uniqueness indeterminate");
                return Ok(UniquenessReport {
                    uniqueness: Uniqueness::Indeterminate {
                        reason: format!("registry unreadable: {e}"),
                    },
                    best_score: 0.0,
                    compared: 0,
                    skipped: 0,
                });
            }
        };

        // Nobody registered yet: trivially unique.
        if enumeration.entries.is_empty() && enumeration.skipped == 0 {
            return Ok(UniquenessReport {
                uniqueness: Uniqueness::Unique,
                best_score: 0.0,
                compared: 0,
                skipped: 0,
            });
        }

        let mut seen = HashSet::new();
        let priors: Vec<_> = enumeration
            .entries
            .into_iter()
            .filter(|e| {
                e.identity != identity
                    && exclude_address != Some(e.content_address.as_str())
                    && seen.insert(e.content_address.clone())
            })
            .collect();

        let mut compared = 0usize;
        let mut skipped = enumeration.skipped;
        let mut best_score = 0.0f32;
        let mut best_identity: Option<String> = None;

        let fetches = priors.into_iter().map(|entry| {
            let store = Arc::clone(&self.store);
            let dimension = self.config.dimension;
            async move {
                let payload = match store.get(&entry.content_address).await {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(address = %entry.content_address, error = %e,
                            "prior payload unreachable, coverage degraded");
                        return None;
                    }
                };
                if payload.embedding.len() != dimension {
                    tracing::warn!(address = %entry.content_address,
                        len = payload.embedding.len(),
                        "stored embedding has wrong dimension, skipping");
                    return None;
                }
                Some((entry.identity, payload.embedding))
            }
        });
        let mut results =
            stream::iter(fetches).buffer_unordered(self.config.fetch_concurrency.max(1));

        // Running-maximum fold; commutative, so arrival order is irrelevant.
        while let Some(item) = results.next().await {
            let Some((owner, embedding)) = item else {
                skipped += 1;
                continue;
            };
            let score = match cosine_similarity(candidate, &embedding) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(identity = %owner, error = %e, "comparison failed, skipping");
                    skipped += 1;
                    continue;
                }
            };
            tracing::debug!(identity = %owner, score, "scored candidate against prior entry");
            compared += 1;
            if score > best_score {
                best_score = score;
                best_identity = Some(owner);
            }
        }

        if compared == 0 && skipped > 0 {
            tracing::warn!(skipped, "no prior entry was comparable, uniqueness indeterminate");
            return Ok(UniquenessReport {
                uniqueness: Uniqueness::Indeterminate {
                    reason: format!("no prior entry could be fetched ({skipped} skipped)"),
                },
                best_score: 0.0,
                compared,
                skipped,
            });
        }

        let uniqueness = match best_identity {
            Some(owner) if is_match(best_score, self.config.threshold) => Uniqueness::Duplicate {
                identity: owner,
                score: best_score,
            },
            _ => Uniqueness::Unique,
        };

        Ok(UniquenessReport {
            uniqueness,
            best_score,
            compared,
            skipped,
        })
    }

    /// Dimension check plus statistical validation; every candidate goes
    /// through this before it is uploaded or compared.
    pub(crate) fn check_candidate(&self, candidate: &[f32]) -> Result<(), VerifyError> {
        if candidate.len() != self.config.dimension {
            return Err(VerifyError::DimensionMismatch {
                expected: self.config.dimension,
                got: candidate.len(),
            });
        }
        let verdict = validate(candidate);
        if !verdict.is_valid {
            return Err(VerifyError::InvalidEmbedding(
                verdict.reason.unwrap_or_else(|| "invalid".into()),
            ));
        }
        Ok(())
    }
}
