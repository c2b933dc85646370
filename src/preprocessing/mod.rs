//! # Preprocessing Module
//!
//! Tweet normalization and lemmatization.

mod cleaner;
mod lemmatizer;

pub use cleaner::{TweetCleaner, PUNCTUATIONS};
pub use lemmatizer::{EnglishLemmatizer, Lemmatizer, PRON_SENTINEL};
