//! # Word-Vector Provider
//!
//! Local embedding provider backed by a pretrained word-vector collection
//! in the word2vec text format: a `vocab_size dim` header line followed by
//! one `word v1 .. vd` line per entry.
//!
//! A cleaned tweet embeds as the mean of its in-vocabulary token vectors.
//! An empty tweet, or one whose tokens are all out of vocabulary, embeds as
//! the zero vector.

use super::{check_batch, EmbeddingError, EmbeddingProvider, EmbeddingResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Pretrained word-vector model
pub struct WordVectorModel {
    /// Word to row index mapping
    word2idx: HashMap<String, usize>,
    /// One vector per vocabulary entry
    vectors: Vec<Vec<f32>>,
    /// Vector dimension
    dim: usize,
    /// Provider identifier
    name: String,
}

impl WordVectorModel {
    /// Load a model from a word2vec-format text file
    pub fn load<P: AsRef<Path>>(path: P) -> EmbeddingResult<Self> {
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| EmbeddingError::InvalidModel("empty file".to_string()))??;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(EmbeddingError::InvalidModel(format!(
                "invalid header: {header:?}"
            )));
        }
        let vocab_size: usize = parts[0]
            .parse()
            .map_err(|_| EmbeddingError::InvalidModel("invalid vocab size".to_string()))?;
        let dim: usize = parts[1]
            .parse()
            .map_err(|_| EmbeddingError::InvalidModel("invalid dimension".to_string()))?;
        if dim == 0 {
            return Err(EmbeddingError::InvalidModel("zero dimension".to_string()));
        }

        let mut word2idx = HashMap::with_capacity(vocab_size);
        let mut vectors = Vec::with_capacity(vocab_size);

        for line in lines {
            let line = line?;
            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w.to_string(),
                None => continue,
            };

            let values: Vec<f32> = parts.map(|v| v.parse().unwrap_or(0.0)).collect();
            if values.len() != dim {
                return Err(EmbeddingError::InvalidModel(format!(
                    "entry {word:?} has {} values, expected {dim}",
                    values.len()
                )));
            }

            word2idx.insert(word, vectors.len());
            vectors.push(values);
        }

        if vectors.len() != vocab_size {
            return Err(EmbeddingError::InvalidModel(format!(
                "header promises {vocab_size} entries, file has {}",
                vectors.len()
            )));
        }

        Ok(Self {
            word2idx,
            vectors,
            dim,
            name: "word_vectors".to_string(),
        })
    }

    /// Build a model directly from (word, vector) pairs
    ///
    /// All vectors must share one dimension.
    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> EmbeddingResult<Self> {
        let dim = entries
            .first()
            .map(|(_, v)| v.len())
            .ok_or_else(|| EmbeddingError::InvalidModel("no entries".to_string()))?;

        let mut word2idx = HashMap::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len());
        for (row, (word, vector)) in entries.into_iter().enumerate() {
            if vector.len() != dim {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                    row,
                });
            }
            word2idx.insert(word, vectors.len());
            vectors.push(vector);
        }

        Ok(Self {
            word2idx,
            vectors,
            dim,
            name: "word_vectors".to_string(),
        })
    }

    /// Override the provider identifier used for cache keys
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check whether a word is in vocabulary
    pub fn contains(&self, word: &str) -> bool {
        self.word2idx.contains_key(word)
    }

    /// Get vocabulary size
    pub fn vocab_size(&self) -> usize {
        self.vectors.len()
    }

    /// Embed one cleaned text as the mean of its token vectors
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut sum = vec![0.0f32; self.dim];
        let mut hits = 0usize;

        for token in text.split_whitespace() {
            if let Some(&idx) = self.word2idx.get(token) {
                for (acc, &v) in sum.iter_mut().zip(&self.vectors[idx]) {
                    *acc += v;
                }
                hits += 1;
            }
        }

        if hits > 0 {
            let n = hits as f32;
            for v in &mut sum {
                *v /= n;
            }
        }

        sum
    }
}

#[async_trait]
impl EmbeddingProvider for WordVectorModel {
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        let vectors: Vec<Vec<f32>> = texts.iter().map(|t| self.embed(t)).collect();
        check_batch(texts.len(), self.dim, &vectors)?;
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}
