//! # Embedding Cache
//!
//! Durable storage for computed embedding matrices, keyed by provider name
//! and dataset split. Embedding a large split can take hours against a
//! remote service, so repeated runs must be able to skip recomputation and
//! resume from the cached artifact.

use super::{EmbeddingError, EmbeddingResult};
use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::Split;

/// A persisted embedding matrix for one dataset split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingArtifact {
    /// Provider that produced the vectors
    pub model: String,
    /// Vector dimension, constant across all rows
    pub dimension: usize,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// One vector per input record, in record order
    pub vectors: Vec<Vec<f32>>,
}

impl EmbeddingArtifact {
    /// Number of embedded records
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the artifact holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// View the vectors as an (n, dimension) matrix
    pub fn to_matrix(&self) -> Array2<f32> {
        let n = self.vectors.len();
        let flat: Vec<f32> = self.vectors.iter().flatten().copied().collect();
        Array2::from_shape_vec((n, self.dimension), flat)
            .expect("artifact dimensions validated on construction")
    }
}

/// File-backed cache of embedding artifacts
pub struct EmbeddingCache {
    dir: PathBuf,
}

impl EmbeddingCache {
    /// Open a cache rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> EmbeddingResult<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Path of the artifact for a provider/split pair
    pub fn path_for(&self, model: &str, split: Split) -> PathBuf {
        self.dir.join(format!("{}_{}.bin", model, split.as_str()))
    }

    /// Store an embedding matrix for a split
    pub fn store(
        &self,
        model: &str,
        split: Split,
        dimension: usize,
        vectors: Vec<Vec<f32>>,
    ) -> EmbeddingResult<PathBuf> {
        super::check_batch(vectors.len(), dimension, &vectors)?;

        let artifact = EmbeddingArtifact {
            model: model.to_string(),
            dimension,
            created_at: Utc::now(),
            vectors,
        };

        let path = self.path_for(model, split);
        let encoded = bincode::serialize(&artifact)?;
        fs::write(&path, encoded)?;
        Ok(path)
    }

    /// Load the artifact for a provider/split pair, if one exists
    ///
    /// Returns `Ok(None)` on a cache miss. A present but malformed artifact
    /// (unreadable, or rows disagreeing with the recorded dimension) is an
    /// error, not a silent miss.
    pub fn load(&self, model: &str, split: Split) -> EmbeddingResult<Option<EmbeddingArtifact>> {
        let path = self.path_for(model, split);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let artifact: EmbeddingArtifact = bincode::deserialize(&data)?;

        for (row, vector) in artifact.vectors.iter().enumerate() {
            if vector.len() != artifact.dimension {
                return Err(EmbeddingError::InvalidArtifact(format!(
                    "row {row} has {} values, header says {} ({})",
                    vector.len(),
                    artifact.dimension,
                    path.display()
                )));
            }
        }

        Ok(Some(artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path()).unwrap();

        let vectors = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        cache
            .store("word_vectors", Split::Train, 3, vectors.clone())
            .unwrap();

        let artifact = cache.load("word_vectors", Split::Train).unwrap().unwrap();
        assert_eq!(artifact.model, "word_vectors");
        assert_eq!(artifact.dimension, 3);
        assert_eq!(artifact.vectors, vectors);

        let matrix = artifact.to_matrix();
        assert_eq!(matrix.shape(), &[2, 3]);
        assert_eq!(matrix[[1, 0]], 4.0);
    }

    #[test]
    fn test_miss_returns_none() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path()).unwrap();
        assert!(cache.load("encoder", Split::Test).unwrap().is_none());
    }

    #[test]
    fn test_splits_are_cached_separately() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path()).unwrap();

        cache
            .store("encoder", Split::Train, 2, vec![vec![1.0, 1.0]])
            .unwrap();

        assert!(cache.load("encoder", Split::Train).unwrap().is_some());
        assert!(cache.load("encoder", Split::Test).unwrap().is_none());
        assert!(cache.load("word_vectors", Split::Train).unwrap().is_none());
    }

    #[test]
    fn test_store_rejects_ragged_vectors() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path()).unwrap();

        let result = cache.store("encoder", Split::Train, 2, vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { .. })
        ));
    }
}
