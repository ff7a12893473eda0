use crate::error::EmbeddingError;

/// Computes the cosine similarity between two embeddings.
///
/// Returns a score in `[0, 1]` where 0 means orthogonal (no relation) and
/// 1 means identical direction. Negative cosine clamps to 0: direction
/// away from the candidate carries no duplicate signal.
///
/// If either vector has zero magnitude the score is 0 (defined, not an
/// error): a zero vector has no direction and must never read as
/// identical to anything.
///
/// Fails with [`EmbeddingError::DimensionMismatch`] when lengths differ.
/// Uses f64 intermediate precision.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for i in 0..a.len() {
        let ai = a[i] as f64;
        let bi = b[i] as f64;
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(0.0, 1.0) as f32)
}

/// Applies the duplicate decision rule: strictly greater than the
/// threshold. A score exactly equal to the threshold is unique; the
/// boundary belongs to the unique side.
pub fn is_match(score: f32, threshold: f32) -> bool {
    score > threshold
}
