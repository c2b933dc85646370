//! Core data types for tweet datasets
//!
//! This module defines the fundamental data structures used throughout the
//! library:
//! - TweetRecord: one raw input row (id, optional label, text)
//! - CleanedRecord: durable form of a normalized tweet
//! - Split: dataset partition used to key cached artifacts
//! - Dataset: assembled feature matrix with optional labels

use ndarray::{Array1, Array2, Array3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// One input tweet, as loaded from CSV
///
/// The label is present for training splits only. Records are immutable
/// after loading; cleaned text lives in a parallel, index-aligned column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Unique record identifier
    pub id: u64,
    /// Binary sentiment label (0 = positive, 1 = negative), training only
    #[serde(default)]
    pub label: Option<u8>,
    /// Raw tweet text
    pub tweet: String,
}

impl TweetRecord {
    /// Create a new record
    pub fn new(id: u64, label: Option<u8>, tweet: impl Into<String>) -> Self {
        Self {
            id,
            label,
            tweet: tweet.into(),
        }
    }
}

/// Build the label vector for a split, if it is labeled
///
/// A split must be fully labeled or fully unlabeled; a mixture means the
/// input file is malformed.
pub fn label_column(records: &[TweetRecord]) -> anyhow::Result<Option<Array1<f64>>> {
    let labeled = records.iter().filter(|r| r.label.is_some()).count();
    if labeled == 0 {
        return Ok(None);
    }
    if labeled != records.len() {
        anyhow::bail!(
            "Split is partially labeled: {labeled} of {} records carry a label",
            records.len()
        );
    }
    Ok(Some(Array1::from_iter(
        records.iter().filter_map(|r| r.label.map(f64::from)),
    )))
}

/// A normalized tweet, persisted so later stages can resume from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub id: u64,
    #[serde(default)]
    pub label: Option<u8>,
    pub clean_text: String,
}

/// Dataset partition
///
/// Embedding and feature artifacts are keyed by split so repeated runs
/// skip recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// Stable name used in artifact file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(format!("unknown split: {other} (expected train or test)")),
        }
    }
}

/// Assembled feature matrix for a dataset split
///
/// Row order matches the input record order at all times; row i of `x` is
/// the embedding of record i followed by record i's scaled auxiliary
/// features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub x: Array2<f64>,
    /// Target vector (n_samples), absent for unlabeled splits
    pub y: Option<Array1<f64>>,
    /// Feature names, one per column of `x`
    pub feature_names: Vec<String>,
    /// Target name
    pub target_name: String,
}

impl Dataset {
    /// Create a new dataset
    pub fn new(
        x: Array2<f64>,
        y: Option<Array1<f64>>,
        feature_names: Vec<String>,
        target_name: String,
    ) -> Self {
        if let Some(labels) = &y {
            assert_eq!(x.nrows(), labels.len(), "x rows must match y length");
        }
        assert_eq!(x.ncols(), feature_names.len(), "one name per column");
        Self {
            x,
            y,
            feature_names,
            target_name,
        }
    }

    /// Get number of samples
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Get number of features
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Count of (label 0, label 1) samples, if the split is labeled
    pub fn label_balance(&self) -> Option<(usize, usize)> {
        let y = self.y.as_ref()?;
        let positives = y.iter().filter(|&&v| v == 1.0).count();
        Some((y.len() - positives, positives))
    }

    /// Add a trailing singleton axis for 1-D convolutional consumers
    ///
    /// Reshapes (n, f) into (n, f, 1), preserving row order.
    pub fn to_conv_input(&self) -> Array3<f64> {
        self.x.clone().insert_axis(ndarray::Axis(2))
    }

    /// Save the dataset to a binary file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let encoded = bincode::serialize(self)?;
        std::fs::write(path, encoded)?;
        Ok(())
    }

    /// Load a dataset from a binary file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = std::fs::read(path)?;
        let dataset: Self = bincode::deserialize(&data)?;
        Ok(dataset)
    }
}
