//! Word normalization and frequency counting over translated headlines.
//!
//! Only translated titles are ever fed through here. The pipeline normalizes
//! each title into tokens with [`WordNormalizer`] and accumulates them in a
//! [`WordCounter`] that lives for one run.

use std::collections::{HashMap, HashSet};

/// Stop words dropped from headlines before counting.
pub const DEFAULT_STOP_WORDS: [&str; 6] = ["the", "and", "for", "that", "with", "this"];

/// Tokens must be strictly longer than this many characters to be kept.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// Lower-cases text, splits it on whitespace and keeps the tokens worth counting.
#[derive(Debug, Clone)]
pub struct WordNormalizer {
    stop_words: HashSet<String>,
    min_len: usize,
}

impl Default for WordNormalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()),
            DEFAULT_MIN_WORD_LEN,
        )
    }
}

impl WordNormalizer {
    /// Build a normalizer from a stop-word list and a minimum length.
    ///
    /// Stop words are lower-cased so that matching happens after case folding.
    pub fn new<I, S>(stop_words: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            min_len,
        }
    }

    /// Split `text` into lower-case tokens, preserving order and duplicates.
    ///
    /// A token survives when it has more than `min_len` characters and is not
    /// a stop word. Empty input yields an empty vector.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|token| token.chars().count() > self.min_len)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

/// Running word counts for a single analysis run.
#[derive(Debug, Default)]
pub struct WordCounter {
    counts: HashMap<String, usize>,
}

impl WordCounter {
    /// An empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count of every token, creating entries on first sight.
    pub fn add<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            *self.counts.entry(token.into()).or_insert(0) += 1;
        }
    }

    /// Words seen more than once, with their total counts. Unordered.
    pub fn repeated(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(word, count)| (word.clone(), *count))
            .collect()
    }

    /// Number of distinct words seen so far, repeated or not.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}
