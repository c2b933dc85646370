//! # Tweet Normalization
//!
//! Text cleaning for tweet sentiment pipelines. The cleaner applies a fixed
//! ordered sequence of steps: URL removal, user-handle removal, punctuation
//! stripping, lowercasing, numeral removal and whitespace collapsing.
//! Cleaning is pure and total over any string input; an empty result is
//! valid.

use super::lemmatizer::Lemmatizer;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Punctuation marks replaced by a single space during cleaning.
///
/// This set is fixed; it is never configured at runtime.
pub const PUNCTUATIONS: &[char] = &[
    ',', '.', '"', ':', ')', '(', '-', '!', '?', '|', ';', '\'', '$', '&', '/', '[', ']', '>',
    '%', '=', '#', '*', '+', '\\', '•', '~', '@', '£', '·', '_', '{', '}', '©', '^', '®', '`',
    '<', '→', '°', '€', '™', '›', '♥', '←', '×', '§', '″', '′', 'Â', '█', '½', 'à', '…', '“',
    '★', '”', '–', '●', 'â', '►', '−', '¢', '²', '¬', '░', '¶', '↑', '±', '¿', '▾', '═', '¦',
    '║', '―', '¥', '▓', '—', '‹', '─', '▒', '：', '¼', '⊕', '▼', '▪', '†', '■', '’', '▀', '¨',
    '▄', '♫', '☆', 'é', '¯', '♦', '¤', '▲', 'è', '¸', '¾', 'Ã', '⋅', '‘', '∞', '∙', '）', '↓',
    '、', '│', '（', '»', '，', '♪', '╩', '╚', '³', '・', '╦', '╣', '╔', '╗', '▬', '❤', 'ï',
    'Ø', '¹', '≤', '‡', '√',
];

/// Tweet text cleaner
pub struct TweetCleaner {
    /// Regex for URL removal
    url_regex: Regex,
    /// Regex for user-handle removal
    handle_regex: Regex,
    /// Regex for multiple whitespace
    whitespace_regex: Regex,
    /// Punctuation marks to replace with spaces
    punctuation: HashSet<char>,
}

impl Default for TweetCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetCleaner {
    /// Create a new cleaner
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"http\S+").unwrap(),
            handle_regex: Regex::new(r"@\w*").unwrap(),
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            punctuation: PUNCTUATIONS.iter().copied().collect(),
        }
    }

    /// Normalize a tweet
    ///
    /// Steps, in order:
    /// 1. Unicode normalization (NFC)
    /// 2. Remove URLs
    /// 3. Remove user handles
    /// 4. Replace punctuation marks with spaces
    /// 5. Convert to lowercase
    /// 6. Replace numerals with spaces
    /// 7. Collapse whitespace runs and trim
    ///
    /// The result of cleaning is a fixed point: cleaning it again returns
    /// it unchanged.
    pub fn clean(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();

        let no_urls = self.url_regex.replace_all(&normalized, "");
        let no_handles = self.handle_regex.replace_all(&no_urls, "");

        let no_punct: String = no_handles
            .chars()
            .map(|c| if self.punctuation.contains(&c) { ' ' } else { c })
            .collect();

        let lowercase = no_punct.to_lowercase();

        let no_digits: String = lowercase
            .chars()
            .map(|c| if c.is_ascii_digit() { ' ' } else { c })
            .collect();

        let collapsed = self.whitespace_regex.replace_all(&no_digits, " ");
        collapsed.trim().to_string()
    }

    /// Normalize a tweet and reduce its tokens to lemmas
    ///
    /// Runs [`clean`](Self::clean) first, then replaces each token with its
    /// lemma. Tokens that lemmatize to the pronoun sentinel are dropped.
    pub fn clean_with_lemmas(&self, text: &str, lemmatizer: &dyn Lemmatizer) -> String {
        lemmatizer.lemmatize(&self.clean(text))
    }

    /// Normalize a whole column of tweets, preserving order
    pub fn clean_all(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|t| self.clean(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::EnglishLemmatizer;

    #[test]
    fn test_clean_reference_example() {
        let cleaner = TweetCleaner::new();
        let cleaned = cleaner.clean("Check this out http://x.co @john!! AMAZING");
        assert_eq!(cleaned, "check this out amazing");
    }

    #[test]
    fn test_urls_are_removed() {
        let cleaner = TweetCleaner::new();
        let cleaned = cleaner.clean("so cool https://example.com/page?q=1 right");
        assert!(!cleaned.contains("http"));
        assert!(!cleaned.contains("example"));
        assert_eq!(cleaned, "so cool right");
    }

    #[test]
    fn test_handles_are_removed() {
        let cleaner = TweetCleaner::new();
        let cleaned = cleaner.clean("hey @some_user and @Other99 how are you");
        assert!(!cleaned.contains('@'));
        assert!(!cleaned.contains("some_user"));
        assert_eq!(cleaned, "hey and how are you");
    }

    #[test]
    fn test_punctuation_is_absent() {
        let cleaner = TweetCleaner::new();
        let cleaned = cleaner.clean("wow... this is #great! (really) [no] {kidding} 100%");
        for c in PUNCTUATIONS {
            assert!(!cleaned.contains(*c), "found {c:?} in {cleaned:?}");
        }
    }

    #[test]
    fn test_numerals_are_removed() {
        let cleaner = TweetCleaner::new();
        let cleaned = cleaner.clean("top 10 reasons in 2019");
        assert!(!cleaned.chars().any(|c| c.is_ascii_digit()));
        assert_eq!(cleaned, "top reasons in");
    }

    #[test]
    fn test_idempotence() {
        let cleaner = TweetCleaner::new();
        let inputs = [
            "Check this out http://x.co @john!! AMAZING",
            "  lots   of\tspace  ",
            "plain words",
            "#tags & $symbols © everywhere…",
        ];
        for input in inputs {
            let once = cleaner.clean(input);
            let twice = cleaner.clean(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_result_is_valid() {
        let cleaner = TweetCleaner::new();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("@user http://x.co !!!"), "");
    }

    #[test]
    fn test_clean_with_lemmas_drops_pronouns() {
        let cleaner = TweetCleaner::new();
        let lemmatizer = EnglishLemmatizer::new();
        let cleaned = cleaner.clean_with_lemmas("He loves these cats!", &lemmatizer);
        assert!(!cleaned.contains("-PRON-"));
        assert_eq!(cleaned, "love this cat");
    }

    #[test]
    fn test_clean_all_preserves_order() {
        let cleaner = TweetCleaner::new();
        let texts = vec!["First!".to_string(), "Second?".to_string()];
        let cleaned = cleaner.clean_all(&texts);
        assert_eq!(cleaned, vec!["first", "second"]);
    }
}
