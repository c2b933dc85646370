//! Data loading and saving utilities
//!
//! Provides functions to load tweet datasets from CSV files and to persist
//! the cleaned-text artifact produced by the normalizer.

use super::types::{CleanedRecord, TweetRecord};
use anyhow::{bail, Context, Result};
use csv::{Reader, Writer};
use std::fs::File;
use std::path::Path;

/// Data loader for tweet CSV files
pub struct DataLoader;

impl DataLoader {
    /// Load tweet records from a CSV file
    ///
    /// The file must carry `id` and `tweet` columns; a `label` column is
    /// optional (test splits omit it). Column types are checked while
    /// deserializing, so a malformed file fails here rather than deep in
    /// the pipeline.
    pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<TweetRecord>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = Reader::from_reader(file);

        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .clone();
        for required in ["id", "tweet"] {
            if !headers.iter().any(|h| h == required) {
                bail!(
                    "Missing required column {:?} in {:?}",
                    required,
                    path.as_ref()
                );
            }
        }

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: TweetRecord = result.context("Failed to parse tweet record")?;
            records.push(record);
        }

        Ok(records)
    }

    /// Save normalized tweets to a CSV file
    ///
    /// `cleaned` must be index-aligned with `records`.
    pub fn save_cleaned<P: AsRef<Path>>(
        records: &[TweetRecord],
        cleaned: &[String],
        path: P,
    ) -> Result<()> {
        if records.len() != cleaned.len() {
            bail!(
                "Cleaned column length {} does not match record count {}",
                cleaned.len(),
                records.len()
            );
        }

        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = Writer::from_writer(file);
        for (record, text) in records.iter().zip(cleaned) {
            writer.serialize(CleanedRecord {
                id: record.id,
                label: record.label,
                clean_text: text.clone(),
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Load a previously saved cleaned-text artifact
    pub fn load_cleaned<P: AsRef<Path>>(path: P) -> Result<Vec<CleanedRecord>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = Reader::from_reader(file);
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: CleanedRecord = result.context("Failed to parse cleaned record")?;
            records.push(record);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn test_load_records_with_labels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "id,label,tweet").unwrap();
        writeln!(file, "1,0,hello world").unwrap();
        writeln!(file, "2,1,\"bad, very bad\"").unwrap();

        let records = DataLoader::load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, Some(0));
        assert_eq!(records[1].tweet, "bad, very bad");
    }

    #[test]
    fn test_load_records_without_labels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "id,tweet").unwrap();
        writeln!(file, "7,no label here").unwrap();

        let records = DataLoader::load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, None);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "id,text").unwrap();
        writeln!(file, "1,wrong header").unwrap();

        assert!(DataLoader::load_records(&path).is_err());
    }

    #[test]
    fn test_cleaned_round_trip() {
        let records = vec![
            TweetRecord::new(1, Some(0), "Hello!"),
            TweetRecord::new(2, Some(1), "Bye."),
        ];
        let cleaned = vec!["hello".to_string(), "bye".to_string()];

        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        DataLoader::save_cleaned(&records, &cleaned, &path).unwrap();
        let loaded = DataLoader::load_cleaned(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].clean_text, "hello");
        assert_eq!(loaded[1].label, Some(1));
    }
}
