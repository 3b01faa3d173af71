//! Local similarity oracle.
//!
//! [`TextEncoder`] embeds normalized strings with a MiniLM-style BERT
//! encoder (candle + safetensors) and scores pairs by cosine similarity.
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

pub mod config;
pub mod device;
mod encoder;
mod error;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use config::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, EncoderConfig};
pub use encoder::TextEncoder;
pub use error::EmbeddingError;

#[cfg(any(test, feature = "mock"))]
pub use mock::FixedSimilarity;

/// A capability that maps a pair of strings to a bounded similarity score
/// in `[-1, 1]`.
///
/// Scores are computed fresh per call pair; nothing is cached across calls.
pub trait SimilarityOracle: Send + Sync {
    /// Returns the cosine similarity of `a` and `b`.
    fn score(&self, a: &str, b: &str) -> Result<f32, EmbeddingError>;
}
