use crate::error::VerifyError;

/// Default number of concurrent payload fetches during a check.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Deployment parameters for uniqueness verification.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Embedding dimensionality D. Every vector is checked against it
    /// before comparison.
    pub dimension: usize,
    /// Duplicate decision threshold, strictly inside (0, 1). The right
    /// value depends on the deployed extractor model, so there is no
    /// default: every deployment must choose one explicitly.
    pub threshold: f32,
    /// Max concurrent payload fetches during a uniqueness check.
    pub fetch_concurrency: usize,
}

impl VerifyConfig {
    /// Creates a config, validating bounds.
    pub fn new(dimension: usize, threshold: f32) -> Result<Self, VerifyError> {
        if dimension == 0 {
            return Err(VerifyError::Config("dimension must be positive".into()));
        }
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(VerifyError::Config(format!(
                "threshold must be in (0, 1) exclusive, got {threshold}"
            )));
        }
        Ok(Self {
            dimension,
            threshold,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        })
    }

    pub fn with_fetch_concurrency(mut self, n: usize) -> Self {
        self.fetch_concurrency = if n == 0 { DEFAULT_FETCH_CONCURRENCY } else { n };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_interior_threshold() {
        let cfg = VerifyConfig::new(512, 0.6).unwrap();
        assert_eq!(cfg.dimension, 512);
        assert_eq!(cfg.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
    }

    #[test]
    fn rejects_threshold_bounds() {
        assert!(VerifyConfig::new(512, 0.0).is_err());
        assert!(VerifyConfig::new(512, 1.0).is_err());
        assert!(VerifyConfig::new(512, -0.3).is_err());
        assert!(VerifyConfig::new(512, f32::NAN).is_err());
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(VerifyConfig::new(0, 0.5).is_err());
    }

    #[test]
    fn zero_concurrency_falls_back_to_default() {
        let cfg = VerifyConfig::new(8, 0.5).unwrap().with_fetch_concurrency(0);
        assert_eq!(cfg.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
    }
}
