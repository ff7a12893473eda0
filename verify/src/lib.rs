//! Uniqueness verification and registration commit.
//!
//! # Flow
//!
//! ```text
//! candidate embedding
//!   -> validate (reject degenerate vectors)
//!   -> upload payload (single write endpoint)
//!   -> enumerate registry (log-and-skip per entry)
//!   -> fetch + score priors (bounded concurrency, running-maximum fold)
//!   -> verdict (strict threshold, coverage counts attached)
//!   -> guarded commit (re-check binding, registry breaks ties)
//! ```
//!
//! # Guarantees and limits
//!
//! Uniqueness is best-effort, not linearizable. Between a client's check
//! and its commit another client may register a similar face; no lock
//! spans the two steps. The registry's one-entry-per-identity constraint
//! is the only arbitration that survives that window.
//!
//! Unreachable prior payloads degrade coverage instead of failing the
//! check; every [`UniquenessReport`] carries how many entries were
//! skipped. When nothing could be compared at all the outcome is
//! [`Uniqueness::Indeterminate`] — unknown is never reported as unique.

mod config;
mod error;
mod register;
mod types;
mod verify;


pub use config::{DEFAULT_FETCH_CONCURRENCY, VerifyConfig};
pub use error::VerifyError;
pub use types::{RegistrationOutcome, Uniqueness, UniquenessReport};
pub use verify::Verifier;
