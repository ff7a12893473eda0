//! Face embedding primitives: statistical validation, cosine similarity,
//! and canonical face hashing.
//!
//! # Pipeline
//!
//! An external extractor turns a captured image into a fixed-length float
//! vector. Everything downstream of that vector starts here:
//!
//! 1. [`validate`]: raw extractor output -> [`Verdict`] (reject degenerate,
//!    constant, or numerically collapsed vectors before they are trusted)
//! 2. [`cosine_similarity`]: two embeddings of equal length -> score in
//!    `[0, 1]`
//! 3. [`is_match`]: score + configured threshold -> duplicate decision
//! 4. [`FaceHash::of`]: embedding -> fixed-width SHA-256 digest committed
//!    to the registry
//!
//! Comparing embeddings of unequal length is a
//! [`EmbeddingError::DimensionMismatch`] error, never a score: silent
//! truncation or padding would invisibly weaken the uniqueness guarantee.

mod error;
mod hash;
mod similarity;
mod validate;

pub use error::EmbeddingError;
pub use hash::FaceHash;
pub use similarity::{cosine_similarity, is_match};
pub use validate::{Verdict, validate};
