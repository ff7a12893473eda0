use facegate_registry::{CommitReceipt, RegistryEntry};
use serde::Serialize;

/// Outcome of comparing a candidate against every reachable prior entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Uniqueness {
    /// No prior entry scored above the threshold.
    Unique,
    /// A prior entry scored strictly above the threshold.
    Duplicate { identity: String, score: f32 },
    /// Uniqueness is unknown: the registry could not be read, or no
    /// prior payload could be fetched. Retrying, blocking, or proceeding
    /// is the caller's policy decision, never decided here.
    Indeterminate { reason: String },
}

/// Verdict plus the coverage achieved while computing it.
#[derive(Debug, Clone, Serialize)]
pub struct UniquenessReport {
    pub uniqueness: Uniqueness,
    /// Highest similarity observed across compared entries.
    pub best_score: f32,
    /// Prior entries actually fetched and scored.
    pub compared: usize,
    /// Prior entries skipped: unreadable registry indices, unreachable
    /// payloads, malformed embeddings.
    pub skipped: usize,
}

impl UniquenessReport {
    pub fn is_unique(&self) -> bool {
        matches!(self.uniqueness, Uniqueness::Unique)
    }
}

/// Outcome of a full registration attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Entry committed to the registry.
    Committed {
        entry: RegistryEntry,
        receipt: CommitReceipt,
    },
    /// A similar face is already registered to another identity; nothing
    /// was committed.
    Duplicate { identity: String, score: f32 },
    /// Uniqueness could not be established; nothing was committed.
    Indeterminate { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_tagged_outcome() {
        let report = UniquenessReport {
            uniqueness: Uniqueness::Duplicate {
                identity: "0xabc".into(),
                score: 0.91,
            },
            best_score: 0.91,
            compared: 3,
            skipped: 1,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["uniqueness"]["outcome"], "duplicate");
        assert_eq!(json["uniqueness"]["identity"], "0xabc");
        assert_eq!(json["skipped"], 1);
    }

    #[test]
    fn unique_and_indeterminate_are_distinct() {
        let unique = serde_json::to_value(Uniqueness::Unique).unwrap();
        let indeterminate = serde_json::to_value(Uniqueness::Indeterminate {
            reason: "registry unreachable".into(),
        })
        .unwrap();
        assert_ne!(unique["outcome"], indeterminate["outcome"]);
    }
}
