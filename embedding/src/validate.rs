/// Minimum fraction of entries that must be non-zero.
const MIN_NONZERO_RATIO: f64 = 0.05;

/// Minimum population standard deviation over non-zero entries.
const MIN_STDDEV: f64 = 0.001;

/// Minimum absolute magnitude over non-zero entries.
const MIN_MAGNITUDE: f64 = 0.01;

/// Result of the statistical sanity check on a raw embedding.
///
/// Stateless and recomputable: derived purely from the vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_valid: bool,
    /// Reason for the first failing check; None when valid.
    pub reason: Option<String>,
}

impl Verdict {
    fn ok() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Checks that an extractor output is statistically plausible before it is
/// uploaded or compared.
///
/// Three checks run in order over the full vector; the first failure wins:
///
/// 1. non-zero ratio: fewer than 5% non-zero entries signals a degenerate
///    extraction (no face found, extractor error)
/// 2. non-zero spread: a population standard deviation at or below 0.001
///    over the non-zero entries signals a constant or synthetic payload
/// 3. non-zero magnitude: a max absolute value at or below 0.01 signals
///    numerically collapsed data that cannot discriminate between faces
///
/// Comparisons against vectors that fail any check are meaningless and
/// must be rejected upstream, not silently scored.
pub fn validate(embedding: &[f32]) -> Verdict {
    if embedding.is_empty() {
        return Verdict::fail("empty embedding");
    }

    let nonzero: Vec<f64> = embedding
        .iter()
        .filter(|&&v| v != 0.0)
        .map(|&v| v as f64)
        .collect();

    let min_count = MIN_NONZERO_RATIO * embedding.len() as f64;
    if (nonzero.len() as f64) < min_count {
        return Verdict::fail(format!(
            "too few non-zero entries: {} of {}",
            nonzero.len(),
            embedding.len()
        ));
    }

    let mean = nonzero.iter().sum::<f64>() / nonzero.len() as f64;
    let variance =
        nonzero.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / nonzero.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev <= MIN_STDDEV {
        return Verdict::fail(format!("near-constant payload: std dev {std_dev:.6}"));
    }

    let max_abs = nonzero.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max_abs <= MIN_MAGNITUDE {
        return Verdict::fail(format!("collapsed magnitudes: max abs {max_abs:.6}"));
    }

    Verdict::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Deterministic pseudo-random values in [-1, 1].
    fn random_vec(dim: usize, seed: u64) -> Vec<f32> {
        let mut state = seed;
        (0..dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 33) as f32) / (u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn rejects_empty() {
        let v = validate(&[]);
        assert!(!v.is_valid);
        assert_eq!(v.reason.as_deref(), Some("empty embedding"));
    }

    #[test]
    fn rejects_all_zeros() {
        let v = validate(&vec![0.0; 512]);
        assert!(!v.is_valid);
        assert!(v.reason.unwrap().contains("non-zero"));
    }

    #[test]
    fn rejects_single_nonzero_among_1000() {
        let mut emb = vec![0.0f32; 1000];
        emb[3] = 0.7;
        let v = validate(&emb);
        assert!(!v.is_valid);
        assert!(v.reason.unwrap().contains("non-zero"));
    }

    #[test]
    fn rejects_constant_payload() {
        let v = validate(&vec![0.5f32; 128]);
        assert!(!v.is_valid);
        assert!(v.reason.unwrap().contains("std dev"));
    }

    #[test]
    fn rejects_collapsed_magnitudes() {
        // Alternating +-0.005: spread passes, magnitude does not.
        let emb: Vec<f32> = (0..128)
            .map(|i| if i % 2 == 0 { 0.005 } else { -0.005 })
            .collect();
        let v = validate(&emb);
        assert!(!v.is_valid);
        assert!(v.reason.unwrap().contains("max abs"));
    }

    #[test]
    fn accepts_uniform_random() {
        let v = validate(&random_vec(512, 42));
        assert!(v.is_valid, "reason: {:?}", v.reason);
        assert!(v.reason.is_none());
    }

    #[test]
    fn accepts_small_plausible_vector() {
        let v = validate(&[0.9, 0.1, -0.3, 0.0, 0.0, 0.2, 0.0, -0.5]);
        assert!(v.is_valid);
    }

    #[test]
    fn check_order_first_failure_wins() {
        // All zeros fails the ratio check, not the spread check.
        let v = validate(&[0.0, 0.0, 0.0, 0.0]);
        assert!(v.reason.unwrap().contains("non-zero"));
    }
}
