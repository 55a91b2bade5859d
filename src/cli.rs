//! Command-line interface definitions.
//!
//! All options have defaults except the translation API key, which can also
//! come from the `RAPIDAPI_KEY` environment variable.

use crate::config::{DEFAULT_BASE_URL, DEFAULT_TRANSLATE_URL, DEFAULT_USER_AGENT};
use clap::Parser;

/// Fetch opinion headlines, translate them and report repeated words.
///
/// # Examples
///
/// ```sh
/// # Five articles from the default listing, key from the environment
/// RAPIDAPI_KEY=... opinion_headers
///
/// # Ten articles, no pacing, JSON report alongside the text output
/// opinion_headers --api-key KEY -n 10 --delay-ms 0 --json-output-dir ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// API key for the translation service
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Origin that relative article and image links are resolved against
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Listing page to scrape (defaults to <base-url>/opinion/)
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Maximum number of article blocks to consider
    #[arg(short = 'n', long, default_value_t = 5)]
    pub articles: usize,

    /// Language of the original headlines
    #[arg(long, default_value = "es")]
    pub source_lang: String,

    /// Language to translate headlines into
    #[arg(long, default_value = "en")]
    pub target_lang: String,

    /// Stop word to ignore when counting (repeatable; replaces the built-in list)
    #[arg(long = "stop-word")]
    pub stop_words: Vec<String>,

    /// Words must be longer than this many characters to be counted
    #[arg(long, default_value_t = 3)]
    pub min_word_len: usize,

    /// Delay between articles in milliseconds (0 disables pacing)
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Directory lead images are saved to
    #[arg(short, long, default_value = "article_images")]
    pub image_dir: String,

    /// Translation endpoint
    #[arg(long, default_value = DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Optional directory for a JSON report of the run
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
