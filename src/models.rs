//! Data models for extracted listing entries and the results of a run.
//!
//! - [`ExtractedArticle`]: one article block pulled off the listing page
//! - [`ArticleRecord`]: an article that made it through translation
//! - [`Analysis`]: the result pair of a run (records plus repeated words)
//! - [`RunReport`]: the JSON document written when a JSON output dir is set

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// An article preview found on the listing page.
///
/// Only produced when both a title and a link were present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// 1-based position of the article block among the blocks considered.
    pub position: usize,
    /// Heading text as shown on the listing page.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// Absolute URL of the lead image, if the block had one.
    pub image_url: Option<String>,
}

/// A fully processed article.
///
/// The translated title is mandatory: articles whose translation failed are
/// never turned into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The headline in the source language.
    pub original_title: String,
    /// The headline in the target language.
    pub translated_title: String,
    /// Body text of the article, if it could be fetched.
    pub content: Option<String>,
    /// Absolute article URL.
    pub url: String,
    /// Where the lead image was saved, if it was downloaded.
    pub image_path: Option<PathBuf>,
}

/// Output of one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub articles: Vec<ArticleRecord>,
    /// Normalized words that appeared more than once across translated titles.
    pub repeated_words: HashMap<String, usize>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty() && self.repeated_words.is_empty()
    }
}

/// JSON document describing a finished run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339 UTC timestamp of when the report was produced.
    pub generated_at: String,
    pub listing_url: String,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(flatten)]
    pub analysis: Analysis,
}
