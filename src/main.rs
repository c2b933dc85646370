//! Tweet Sentiment Features - dataset preparation CLI
//!
//! Runs the preprocessing pipeline stage by stage or end to end:
//!
//! ```bash
//! tweet_sentiment clean --input train.csv --output train_clean.csv
//! tweet_sentiment embed --input train.csv --split train --provider word-vectors --vectors vectors.txt
//! tweet_sentiment assemble --input train.csv --split train --model word_vectors --output train_features.bin
//! tweet_sentiment run --input train.csv --split train --provider encoder --endpoint http://localhost:5555 --output train_features.bin
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tweet_sentiment::data::label_column;
use tweet_sentiment::embedding::DEFAULT_ENCODER_DIM;
use tweet_sentiment::features::{save_params, AuxiliaryFeatures};
use tweet_sentiment::{
    DataLoader, EmbeddingCache, EmbeddingProvider, EncoderClient, EnglishLemmatizer,
    FeatureAssembler, Pipeline, PipelineConfig, Split, TweetCleaner, WordVectorModel,
};

#[derive(Parser)]
#[command(name = "tweet_sentiment")]
#[command(about = "Tweet preprocessing and feature assembly for sentiment classification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize tweets and save the cleaned CSV
    Clean {
        /// Input CSV with id, tweet and optional label columns
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Reduce tokens to lemmas after cleaning
        #[arg(short, long)]
        lemmatize: bool,
    },

    /// Embed a split and store the vectors in the cache
    Embed {
        /// Input CSV with id, tweet and optional label columns
        #[arg(short, long)]
        input: PathBuf,

        /// Dataset split (train or test)
        #[arg(short, long)]
        split: Split,

        /// Embedding provider (word-vectors or encoder)
        #[arg(short, long, default_value = "word-vectors")]
        provider: String,

        /// Word-vector file (word2vec text format)
        #[arg(long)]
        vectors: Option<PathBuf>,

        /// Encoding service base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Encoding service output dimension
        #[arg(long, default_value_t = DEFAULT_ENCODER_DIM)]
        dimension: usize,

        /// Cache directory for embedding artifacts
        #[arg(short, long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Number of texts per embedding request
        #[arg(short, long, default_value = "256")]
        batch_size: usize,

        /// Reduce tokens to lemmas after cleaning
        #[arg(short, long)]
        lemmatize: bool,
    },

    /// Assemble the feature matrix from cached embeddings
    Assemble {
        /// Input CSV with id, tweet and optional label columns
        #[arg(short, long)]
        input: PathBuf,

        /// Dataset split (train or test)
        #[arg(short, long)]
        split: Split,

        /// Provider name the embeddings were cached under
        #[arg(short, long, default_value = "word_vectors")]
        model: String,

        /// Cache directory for embedding artifacts
        #[arg(short, long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Output path for the feature matrix
        #[arg(short, long)]
        output: PathBuf,

        /// Optional path to save the fitted scaler parameters as JSON
        #[arg(long)]
        scaler_out: Option<PathBuf>,
    },

    /// Run the full pipeline for one split
    Run {
        /// Input CSV with id, tweet and optional label columns
        #[arg(short, long)]
        input: PathBuf,

        /// Dataset split (train or test)
        #[arg(short, long)]
        split: Split,

        /// Embedding provider (word-vectors or encoder)
        #[arg(short, long, default_value = "word-vectors")]
        provider: String,

        /// Word-vector file (word2vec text format)
        #[arg(long)]
        vectors: Option<PathBuf>,

        /// Encoding service base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Encoding service output dimension
        #[arg(long, default_value_t = DEFAULT_ENCODER_DIM)]
        dimension: usize,

        /// Cache directory for embedding artifacts
        #[arg(short, long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Number of texts per embedding request
        #[arg(short, long, default_value = "256")]
        batch_size: usize,

        /// Reduce tokens to lemmas after cleaning
        #[arg(short, long)]
        lemmatize: bool,

        /// Output path for the feature matrix
        #[arg(short, long)]
        output: PathBuf,

        /// Optional path to save the fitted scaler parameters as JSON
        #[arg(long)]
        scaler_out: Option<PathBuf>,
    },
}

/// Build the requested embedding provider
fn build_provider(
    provider: &str,
    vectors: Option<PathBuf>,
    endpoint: Option<String>,
    dimension: usize,
) -> Result<Box<dyn EmbeddingProvider>> {
    match provider {
        "word-vectors" => {
            let path =
                vectors.context("--vectors is required for the word-vectors provider")?;
            info!(path = %path.display(), "Loading word vectors");
            let model = WordVectorModel::load(&path)
                .with_context(|| format!("Failed to load word vectors from {:?}", path))?;
            info!(
                vocab = model.vocab_size(),
                dim = model.dimension(),
                "Word vectors loaded"
            );
            Ok(Box::new(model))
        }
        "encoder" => {
            let url = endpoint.context("--endpoint is required for the encoder provider")?;
            Ok(Box::new(EncoderClient::new(url, dimension)))
        }
        other => bail!("Unknown provider: {other} (expected word-vectors or encoder)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            output,
            lemmatize,
        } => {
            let records = DataLoader::load_records(&input)?;
            info!(records = records.len(), "Loaded {:?}", input);

            let cleaner = TweetCleaner::new();
            let lemmatizer = EnglishLemmatizer::new();
            let cleaned: Vec<String> = records
                .iter()
                .map(|r| {
                    if lemmatize {
                        cleaner.clean_with_lemmas(&r.tweet, &lemmatizer)
                    } else {
                        cleaner.clean(&r.tweet)
                    }
                })
                .collect();

            DataLoader::save_cleaned(&records, &cleaned, &output)?;
            info!("Saved cleaned tweets to {:?}", output);
        }

        Commands::Embed {
            input,
            split,
            provider,
            vectors,
            endpoint,
            dimension,
            cache_dir,
            batch_size,
            lemmatize,
        } => {
            let records = DataLoader::load_records(&input)?;
            info!(records = records.len(), split = split.as_str(), "Loaded {:?}", input);

            let provider = build_provider(&provider, vectors, endpoint, dimension)?;
            let config = PipelineConfig {
                cache_dir,
                batch_size,
                lemmatize,
                ..PipelineConfig::default()
            };
            let pipeline = Pipeline::new(config)?;

            let cleaned = pipeline.clean(&records);
            let embeddings = pipeline.embed(provider.as_ref(), &cleaned, split).await?;

            println!("\nEmbedding Summary");
            println!("=================");
            println!("Split:     {}", split.as_str());
            println!("Records:   {}", embeddings.nrows());
            println!("Dimension: {}", embeddings.ncols());
        }

        Commands::Assemble {
            input,
            split,
            model,
            cache_dir,
            output,
            scaler_out,
        } => {
            let records = DataLoader::load_records(&input)?;
            info!(records = records.len(), split = split.as_str(), "Loaded {:?}", input);

            let cache = EmbeddingCache::new(&cache_dir)?;
            let artifact = cache.load(&model, split)?.with_context(|| {
                format!(
                    "No cached embeddings for model {:?}, split {} (run the embed command first)",
                    model,
                    split.as_str()
                )
            })?;
            if artifact.len() != records.len() {
                bail!(
                    "Cached embeddings hold {} rows but {:?} has {} records",
                    artifact.len(),
                    input,
                    records.len()
                );
            }

            let embeddings = artifact.to_matrix();
            let auxiliary = AuxiliaryFeatures::extract(&records);
            let labels = label_column(&records)?;

            let assembler = FeatureAssembler::new();
            let (dataset, fitted) = assembler.assemble(
                &embeddings,
                &auxiliary,
                &AuxiliaryFeatures::names(),
                labels.as_ref(),
            )?;

            dataset.save(&output)?;
            info!("Saved feature matrix to {:?}", output);

            if let Some(path) = scaler_out {
                save_params(&fitted, &path)?;
                info!("Saved scaler parameters to {:?}", path);
            }

            print_summary(&dataset, split);
        }

        Commands::Run {
            input,
            split,
            provider,
            vectors,
            endpoint,
            dimension,
            cache_dir,
            batch_size,
            lemmatize,
            output,
            scaler_out,
        } => {
            let records = DataLoader::load_records(&input)?;
            info!(records = records.len(), split = split.as_str(), "Loaded {:?}", input);

            let provider = build_provider(&provider, vectors, endpoint, dimension)?;
            let config = PipelineConfig {
                cache_dir,
                batch_size,
                lemmatize,
                ..PipelineConfig::default()
            };
            let pipeline = Pipeline::new(config)?;

            let (dataset, fitted) = pipeline
                .run_split(provider.as_ref(), &records, split)
                .await?;

            dataset.save(&output)?;
            info!("Saved feature matrix to {:?}", output);

            if let Some(path) = scaler_out {
                save_params(&fitted, &path)?;
                info!("Saved scaler parameters to {:?}", path);
            }

            print_summary(&dataset, split);
        }
    }

    Ok(())
}

/// Print a short dataset summary
fn print_summary(dataset: &tweet_sentiment::Dataset, split: Split) {
    println!("\nFeature Matrix Summary");
    println!("======================");
    println!("Split:    {}", split.as_str());
    println!("Samples:  {}", dataset.n_samples());
    println!("Features: {}", dataset.n_features());
    if let Some((negatives, positives)) = dataset.label_balance() {
        println!("Labels:   {negatives} negative / {positives} positive");
    }
}
