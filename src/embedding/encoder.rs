//! # Remote Encoder Provider
//!
//! Client for a transformer encoding service that turns cleaned texts into
//! fixed-dimension sentence vectors. The service is a black box behind one
//! endpoint: `POST {base}/encode` with a JSON list of texts, answered with
//! one vector per text in input order.
//!
//! Failures are fatal: a transport error, a non-success status, a row-count
//! mismatch or a ragged dimension aborts the run. Encoding large batches
//! may take unbounded wall-clock time, so no timeout is applied.

use super::{check_batch, EmbeddingError, EmbeddingProvider, EmbeddingResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default output dimension of the shipped encoder models
pub const DEFAULT_ENCODER_DIM: usize = 768;

/// Encoding request payload
#[derive(Debug, Serialize)]
struct EncodeRequest<'a> {
    texts: &'a [String],
}

/// Encoding response payload
#[derive(Debug, Deserialize)]
struct EncodeResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for a remote sentence-encoding service
pub struct EncoderClient {
    client: Client,
    base_url: String,
    dimension: usize,
    name: String,
}

impl EncoderClient {
    /// Create a client for the service at `base_url`
    ///
    /// `dimension` is the vector size the service is known to produce
    /// (768 for the shipped BERT-base models); responses that disagree are
    /// rejected.
    pub fn new(base_url: impl Into<String>, dimension: usize) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            dimension,
            name: "encoder".to_string(),
        }
    }

    /// Override the provider identifier used for cache keys
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Encode a batch of cleaned texts
    pub async fn encode(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        let url = format!("{}/encode", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EncodeRequest { texts })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: EncodeResponse = response.json().await?;
        check_batch(texts.len(), self.dimension, &payload.embeddings)?;
        Ok(payload.embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for EncoderClient {
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        self.encode(texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}
