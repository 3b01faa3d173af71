//! Mock similarity oracle returning a fixed score.

use super::SimilarityOracle;
use super::error::EmbeddingError;

/// Similarity oracle that returns a constant score for every pair.
///
/// Cascade tests use this to pin the local tier to a known band.
#[derive(Debug, Clone, Copy)]
pub struct FixedSimilarity(pub f32);

impl SimilarityOracle for FixedSimilarity {
    fn score(&self, _a: &str, _b: &str) -> Result<f32, EmbeddingError> {
        Ok(self.0)
    }
}
