//! # Embedding Module
//!
//! Converts cleaned tweets into fixed-dimension vectors through an external
//! embedding provider, and persists the results per dataset split.
//!
//! The core abstraction is the [`EmbeddingProvider`] capability trait with
//! exactly one production implementation per provider:
//! - [`WordVectorModel`]: local word-vector lookup with mean pooling (300-d
//!   in the shipped models)
//! - [`EncoderClient`]: remote transformer encoding service (768-d)
//!
//! Providers are black boxes: this module owns only the request/response
//! boundary and the caching of results. Provider failure is fatal for the
//! run; there is no retry policy in this offline batch context.

mod cache;
mod encoder;
mod word_vectors;

use async_trait::async_trait;
use thiserror::Error;

pub use cache::{EmbeddingArtifact, EmbeddingCache};
pub use encoder::{EncoderClient, DEFAULT_ENCODER_DIM};
pub use word_vectors::WordVectorModel;

/// Errors that can occur at the embedding boundary
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Encoding service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Provider returned {actual} vectors for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Expected {expected}-dimensional vector, got {actual} (row {row})")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        row: usize,
    },

    #[error("Invalid word-vector model: {0}")]
    InvalidModel(String),

    #[error("Invalid embedding artifact: {0}")]
    InvalidArtifact(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for embedding operations
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Capability trait for embedding providers
///
/// Implementations convert cleaned text into dense vectors of a constant
/// dimension, one output vector per input string, in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of cleaned texts
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>>;

    /// Output dimension of every vector this provider produces
    fn dimension(&self) -> usize;

    /// Provider identifier, used to key cached artifacts
    fn model_name(&self) -> &str;
}

/// Verify the batch contract: one vector per input, constant dimension.
pub(crate) fn check_batch(
    expected_count: usize,
    expected_dim: usize,
    vectors: &[Vec<f32>],
) -> EmbeddingResult<()> {
    if vectors.len() != expected_count {
        return Err(EmbeddingError::CountMismatch {
            expected: expected_count,
            actual: vectors.len(),
        });
    }
    for (row, vector) in vectors.iter().enumerate() {
        if vector.len() != expected_dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: expected_dim,
                actual: vector.len(),
                row,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_batch_accepts_well_formed_output() {
        let vectors = vec![vec![0.0; 4], vec![1.0; 4]];
        assert!(check_batch(2, 4, &vectors).is_ok());
    }

    #[test]
    fn test_check_batch_rejects_count_mismatch() {
        let vectors = vec![vec![0.0; 4]];
        let err = check_batch(2, 4, &vectors).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::CountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_check_batch_rejects_ragged_dimensions() {
        let vectors = vec![vec![0.0; 4], vec![0.0; 3]];
        let err = check_batch(2, 4, &vectors).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 4,
                actual: 3,
                row: 1
            }
        ));
    }
}
