//! # Lemmatization
//!
//! Reduces tokens to their base dictionary form. Lemmatization is modeled
//! as a capability trait with one production implementation, so tests can
//! substitute their own.
//!
//! Pronouns have no meaningful base form; they lemmatize to a sentinel
//! token which [`Lemmatizer::lemmatize`] drops from the output.

use std::collections::{HashMap, HashSet};

/// Sentinel lemma produced for pronouns and removed from lemmatized text
pub const PRON_SENTINEL: &str = "-PRON-";

/// Capability trait for lemmatizers
pub trait Lemmatizer: Send + Sync {
    /// Return the lemma of a single token
    fn lemma(&self, token: &str) -> String;

    /// Lemmatize whitespace-separated text, dropping pronoun sentinels
    fn lemmatize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.lemma(token))
            .filter(|lemma| lemma != PRON_SENTINEL)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Rule and dictionary based English lemmatizer
///
/// Irregular forms come from a fixed dictionary; regular inflections are
/// reduced with suffix rules. Rule-based lemmatization is approximate and
/// leaves unknown irregular forms unchanged.
pub struct EnglishLemmatizer {
    pronouns: HashSet<&'static str>,
    irregular: HashMap<&'static str, &'static str>,
}

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishLemmatizer {
    /// Create a lemmatizer with the built-in dictionary
    pub fn new() -> Self {
        let pronouns: HashSet<&'static str> = [
            "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you",
            "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
            "her", "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
            "themselves",
        ]
        .into_iter()
        .collect();

        let irregular: HashMap<&'static str, &'static str> = [
            ("am", "be"),
            ("is", "be"),
            ("are", "be"),
            ("was", "be"),
            ("were", "be"),
            ("been", "be"),
            ("being", "be"),
            ("has", "have"),
            ("had", "have"),
            ("having", "have"),
            ("does", "do"),
            ("did", "do"),
            ("done", "do"),
            ("doing", "do"),
            ("goes", "go"),
            ("went", "go"),
            ("gone", "go"),
            ("going", "go"),
            ("says", "say"),
            ("said", "say"),
            ("made", "make"),
            ("making", "make"),
            ("got", "get"),
            ("gotten", "get"),
            ("getting", "get"),
            ("took", "take"),
            ("taken", "take"),
            ("taking", "take"),
            ("came", "come"),
            ("coming", "come"),
            ("saw", "see"),
            ("seen", "see"),
            ("knew", "know"),
            ("known", "know"),
            ("thought", "think"),
            ("better", "good"),
            ("best", "good"),
            ("worse", "bad"),
            ("worst", "bad"),
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("these", "this"),
            ("those", "that"),
        ]
        .into_iter()
        .collect();

        Self {
            pronouns,
            irregular,
        }
    }

    /// Undouble a trailing consonant left by suffix stripping
    /// ("stopp" -> "stop"), keeping legitimate doubles like "ll" and "ss".
    fn undouble(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n >= 3 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'l' | 's' | 'z') {
            chars[..n - 1].iter().collect()
        } else {
            stem.to_string()
        }
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemma(&self, token: &str) -> String {
        if self.pronouns.contains(token) {
            return PRON_SENTINEL.to_string();
        }
        if let Some(base) = self.irregular.get(token) {
            return (*base).to_string();
        }

        if let Some(stem) = token.strip_suffix("ies") {
            if token.len() > 4 {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = token.strip_suffix("sses") {
            return format!("{stem}ss");
        }
        if let Some(stem) = token.strip_suffix("ing") {
            if stem.len() >= 3 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = token.strip_suffix("ed") {
            if stem.len() >= 3 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = token.strip_suffix('s') {
            if token.len() > 3
                && !token.ends_with("ss")
                && !token.ends_with("us")
                && !token.ends_with("is")
            {
                return stem.to_string();
            }
        }

        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronouns_map_to_sentinel() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("he"), PRON_SENTINEL);
        assert_eq!(lemmatizer.lemma("themselves"), PRON_SENTINEL);
    }

    #[test]
    fn test_irregular_forms() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("was"), "be");
        assert_eq!(lemmatizer.lemma("went"), "go");
        assert_eq!(lemmatizer.lemma("children"), "child");
    }

    #[test]
    fn test_suffix_rules() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("cats"), "cat");
        assert_eq!(lemmatizer.lemma("studies"), "study");
        assert_eq!(lemmatizer.lemma("classes"), "class");
        assert_eq!(lemmatizer.lemma("running"), "run");
        assert_eq!(lemmatizer.lemma("falling"), "fall");
        assert_eq!(lemmatizer.lemma("stopped"), "stop");
        assert_eq!(lemmatizer.lemma("walked"), "walk");
    }

    #[test]
    fn test_short_and_protected_tokens_unchanged() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("gas"), "gas");
        assert_eq!(lemmatizer.lemma("class"), "class");
        assert_eq!(lemmatizer.lemma("virus"), "virus");
        assert_eq!(lemmatizer.lemma("analysis"), "analysis");
    }

    #[test]
    fn test_lemmatize_drops_sentinel() {
        let lemmatizer = EnglishLemmatizer::new();
        let output = lemmatizer.lemmatize("he walked his dogs");
        assert!(!output.contains(PRON_SENTINEL));
        assert_eq!(output, "walk dog");
    }
}
