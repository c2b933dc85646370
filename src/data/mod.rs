//! # Data Module
//!
//! Tweet record types, dataset containers and CSV persistence.

mod loader;
mod types;

pub use loader::DataLoader;
pub use types::{label_column, CleanedRecord, Dataset, Split, TweetRecord};
