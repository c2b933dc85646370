//! # Pipeline
//!
//! Per-split orchestration of the three stages: normalize text, embed it
//! through a provider (reusing the durable cache when possible), then
//! assemble the final feature matrix. Stages run strictly left to right and
//! the record order established at load time is preserved throughout.

use crate::data::{label_column, Dataset, Split, TweetRecord};
use crate::embedding::{EmbeddingCache, EmbeddingProvider};
use crate::features::{AuxiliaryFeatures, FeatureAssembler, FittedMinMax, MinMaxScaler};
use crate::preprocessing::{EnglishLemmatizer, TweetCleaner};
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory for cached embedding artifacts
    pub cache_dir: PathBuf,
    /// Number of texts per embedding request
    pub batch_size: usize,
    /// Whether to lemmatize cleaned tweets
    pub lemmatize: bool,
    /// Target range for auxiliary feature scaling
    pub feature_range: (f64, f64),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(crate::defaults::CACHE_DIR),
            batch_size: crate::defaults::BATCH_SIZE,
            lemmatize: false,
            feature_range: (crate::defaults::FEATURE_MIN, crate::defaults::FEATURE_MAX),
        }
    }
}

/// Tweet feature pipeline
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: TweetCleaner,
    lemmatizer: EnglishLemmatizer,
    cache: EmbeddingCache,
}

impl Pipeline {
    /// Create a pipeline, opening the embedding cache
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let cache = EmbeddingCache::new(&config.cache_dir)
            .with_context(|| format!("Failed to open cache at {:?}", config.cache_dir))?;
        Ok(Self {
            config,
            cleaner: TweetCleaner::new(),
            lemmatizer: EnglishLemmatizer::new(),
            cache,
        })
    }

    /// Normalize all records, preserving order
    pub fn clean(&self, records: &[TweetRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| {
                if self.config.lemmatize {
                    self.cleaner.clean_with_lemmas(&r.tweet, &self.lemmatizer)
                } else {
                    self.cleaner.clean(&r.tweet)
                }
            })
            .collect()
    }

    /// Embed cleaned texts, reusing the cached artifact when it matches
    ///
    /// On a cache hit with the expected row count the provider is not
    /// called at all. A stale artifact (row count disagreeing with the
    /// input) is recomputed and overwritten.
    pub async fn embed(
        &self,
        provider: &dyn EmbeddingProvider,
        cleaned: &[String],
        split: Split,
    ) -> Result<Array2<f32>> {
        let model = provider.model_name();

        if let Some(artifact) = self.cache.load(model, split)? {
            if artifact.len() == cleaned.len() && artifact.dimension == provider.dimension() {
                info!(
                    model,
                    split = split.as_str(),
                    rows = artifact.len(),
                    "Reusing cached embeddings"
                );
                return Ok(artifact.to_matrix());
            }
            warn!(
                model,
                split = split.as_str(),
                cached_rows = artifact.len(),
                input_rows = cleaned.len(),
                "Cached embeddings are stale, recomputing"
            );
        }

        let started = Instant::now();
        let pb = ProgressBar::new(cleaned.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(cleaned.len());
        for chunk in cleaned.chunks(self.config.batch_size.max(1)) {
            let batch = provider.embed_batch(chunk).await.with_context(|| {
                format!("Embedding provider {model:?} failed on a {} text batch", chunk.len())
            })?;
            vectors.extend(batch);
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        let dim = provider.dimension();
        crate::embedding::check_batch(cleaned.len(), dim, &vectors)?;

        info!(
            model,
            split = split.as_str(),
            rows = vectors.len(),
            dim,
            elapsed = ?started.elapsed(),
            "Embedded split"
        );

        let flat: Vec<f32> = vectors.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((vectors.len(), dim), flat)?;

        let path = self.cache.store(model, split, dim, vectors)?;
        info!(path = %path.display(), "Stored embedding artifact");

        Ok(matrix)
    }

    /// Run the full pipeline for one split
    ///
    /// Scaling parameters are fitted on this split's own auxiliary columns.
    /// The returned parameters can be passed to
    /// [`FeatureAssembler::assemble_with_params`] to apply one split's fit
    /// to another.
    pub async fn run_split(
        &self,
        provider: &dyn EmbeddingProvider,
        records: &[TweetRecord],
        split: Split,
    ) -> Result<(Dataset, Vec<FittedMinMax>)> {
        if records.is_empty() {
            bail!("No records in {} split", split.as_str());
        }

        info!(split = split.as_str(), records = records.len(), "Cleaning tweets");
        let cleaned = self.clean(records);

        let embeddings = self.embed(provider, &cleaned, split).await?;

        let auxiliary = AuxiliaryFeatures::extract(records);
        let labels = label_column(records)?;

        if let Some(y) = &labels {
            let positives = y.iter().filter(|&&v| v == 1.0).count();
            info!(
                split = split.as_str(),
                negatives = y.len() - positives,
                positives,
                "Label distribution"
            );
        }

        let (min, max) = self.config.feature_range;
        let assembler =
            FeatureAssembler::new().with_scaler(MinMaxScaler::new().with_range(min, max));
        let (dataset, fitted) = assembler.assemble(
            &embeddings,
            &auxiliary,
            &AuxiliaryFeatures::names(),
            labels.as_ref(),
        )?;

        info!(
            split = split.as_str(),
            samples = dataset.n_samples(),
            features = dataset.n_features(),
            "Assembled feature matrix"
        );

        Ok((dataset, fitted))
    }
}
