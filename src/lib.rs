//! # Tweet Sentiment Features
//!
//! Library for preparing tweet sentiment datasets: text normalization,
//! embedding extraction through an external provider, and assembly of the
//! final feature matrix consumed by a downstream classifier.
//!
//! ## Modules
//!
//! - `data` - Tweet records, dataset containers and CSV persistence
//! - `preprocessing` - Tweet normalization and lemmatization
//! - `embedding` - Embedding providers and the per-split vector cache
//! - `features` - Auxiliary features, min-max scaling and assembly
//! - `pipeline` - Per-split orchestration of the three stages
//!
//! ## Example Usage
//!
//! ```no_run
//! use tweet_sentiment::{
//!     DataLoader, Pipeline, PipelineConfig, Split, WordVectorModel,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let records = DataLoader::load_records("train.csv")?;
//!     let provider = WordVectorModel::load("vectors.txt")?;
//!
//!     let pipeline = Pipeline::new(PipelineConfig::default())?;
//!     let (dataset, _scalers) = pipeline
//!         .run_split(&provider, &records, Split::Train)
//!         .await?;
//!
//!     dataset.save("train_features.bin")?;
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod embedding;
pub mod features;
pub mod pipeline;
pub mod preprocessing;

// Re-exports for convenience
pub use data::{CleanedRecord, DataLoader, Dataset, Split, TweetRecord};
pub use embedding::{
    EmbeddingArtifact, EmbeddingCache, EmbeddingError, EmbeddingProvider, EncoderClient,
    WordVectorModel,
};
pub use features::{
    AssemblyError, AuxiliaryFeatures, FeatureAssembler, FittedMinMax, MinMaxScaler,
};
pub use pipeline::{Pipeline, PipelineConfig};
pub use preprocessing::{EnglishLemmatizer, Lemmatizer, TweetCleaner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Directory for cached embedding artifacts
    pub const CACHE_DIR: &str = "cache";

    /// Number of texts per embedding request
    pub const BATCH_SIZE: usize = 256;

    /// Lower bound of the auxiliary feature range
    pub const FEATURE_MIN: f64 = -1.0;

    /// Upper bound of the auxiliary feature range
    pub const FEATURE_MAX: f64 = 1.0;
}
