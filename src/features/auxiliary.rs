//! # Auxiliary Features
//!
//! Scalar features derived from the raw tweet text, appended to the
//! embedding vector by the assembler. These are computed before cleaning:
//! after normalization the punctuation count would be identically zero.

use crate::data::TweetRecord;
use crate::preprocessing::PUNCTUATIONS;
use ndarray::Array2;

/// Names of the auxiliary feature columns, in matrix order
pub const AUX_FEATURE_NAMES: [&str; 2] = ["tweet_len", "punct_len"];

/// Auxiliary feature extraction
pub struct AuxiliaryFeatures;

impl AuxiliaryFeatures {
    /// Character count of the raw tweet
    pub fn tweet_len(text: &str) -> f64 {
        text.chars().count() as f64
    }

    /// Count of punctuation marks in the raw tweet
    pub fn punct_len(text: &str) -> f64 {
        text.chars().filter(|c| PUNCTUATIONS.contains(c)).count() as f64
    }

    /// Extract the (n_records, 2) auxiliary matrix, preserving record order
    pub fn extract(records: &[TweetRecord]) -> Array2<f64> {
        let mut matrix = Array2::zeros((records.len(), AUX_FEATURE_NAMES.len()));
        for (i, record) in records.iter().enumerate() {
            matrix[[i, 0]] = Self::tweet_len(&record.tweet);
            matrix[[i, 1]] = Self::punct_len(&record.tweet);
        }
        matrix
    }

    /// Column names matching [`extract`](Self::extract)
    pub fn names() -> Vec<String> {
        AUX_FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_len_counts_chars() {
        assert_eq!(AuxiliaryFeatures::tweet_len("hello"), 5.0);
        assert_eq!(AuxiliaryFeatures::tweet_len(""), 0.0);
        // Multi-byte characters count once.
        assert_eq!(AuxiliaryFeatures::tweet_len("héllo"), 5.0);
    }

    #[test]
    fn test_punct_len_counts_fixed_set_only() {
        assert_eq!(AuxiliaryFeatures::punct_len("wow!! #great."), 4.0);
        assert_eq!(AuxiliaryFeatures::punct_len("no punctuation here"), 0.0);
    }

    #[test]
    fn test_extract_aligns_rows_with_records() {
        let records = vec![
            TweetRecord::new(1, Some(0), "Hi!"),
            TweetRecord::new(2, Some(1), "Okay..."),
        ];
        let matrix = AuxiliaryFeatures::extract(&records);

        assert_eq!(matrix.shape(), &[2, 2]);
        assert_eq!(matrix[[0, 0]], 3.0);
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[1, 0]], 7.0);
        assert_eq!(matrix[[1, 1]], 3.0);
    }
}
