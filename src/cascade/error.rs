use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Cascade failures. Oracle unavailability is never an error (the cascade
/// falls back to a cheaper tier); only the local scorer breaking is fatal
/// for a request.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("local scoring failed: {0}")]
    Scoring(#[from] EmbeddingError),
}
