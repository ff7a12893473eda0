use crate::error::ExtractError;

/// Converts a captured face image into a dense float32 embedding.
///
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Return the embedding for one captured image.
    async fn extract(&self, image: &[u8]) -> Result<Vec<f32>, ExtractError>;

    /// Dimensionality of the returned vectors.
    fn dimension(&self) -> usize;
}
