//! Runtime configuration for a single analysis run.
//!
//! Everything the pipeline needs is carried in [`AnalyzerConfig`], built once
//! from the command line and handed to the collaborators and the
//! [`crate::pipeline::HeaderAnalyzer`]. There is no configuration file.

use crate::cli::Cli;
use crate::words::{DEFAULT_MIN_WORD_LEN, DEFAULT_STOP_WORDS, WordNormalizer};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://elpais.com";
pub const DEFAULT_LISTING_PATH: &str = "/opinion/";
pub const DEFAULT_TRANSLATE_URL: &str = "https://rapid-translate-multi-traduction.p.rapidapi.com/t";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Delay inserted between two consecutive articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Fixed(Duration),
    Disabled,
}

impl Pacing {
    pub async fn pause(&self) {
        if let Pacing::Fixed(delay) = self {
            if !delay.is_zero() {
                sleep(*delay).await;
            }
        }
    }
}

impl From<Duration> for Pacing {
    fn from(delay: Duration) -> Self {
        if delay.is_zero() {
            Pacing::Disabled
        } else {
            Pacing::Fixed(delay)
        }
    }
}

/// Settings for the remote translation endpoint.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub endpoint: Url,
    /// Opaque API key, sent as-is.
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Origin that relative article and image links are resolved against.
    pub base_url: Url,
    pub listing_url: Url,
    pub max_articles: usize,
    pub source_lang: String,
    pub target_lang: String,
    pub stop_words: Vec<String>,
    pub min_word_len: usize,
    pub pacing: Pacing,
    pub image_dir: PathBuf,
    pub user_agent: String,
    pub translator: TranslatorConfig,
}

impl AnalyzerConfig {
    /// Defaults matching the El País opinion section.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        let listing_url = base_url.join(DEFAULT_LISTING_PATH)?;
        Ok(Self {
            base_url,
            listing_url,
            max_articles: 5,
            source_lang: "es".to_string(),
            target_lang: "en".to_string(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            min_word_len: DEFAULT_MIN_WORD_LEN,
            pacing: Pacing::Fixed(Duration::from_secs(1)),
            image_dir: PathBuf::from("article_images"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            translator: TranslatorConfig {
                endpoint: Url::parse(DEFAULT_TRANSLATE_URL)?,
                api_key: api_key.into(),
            },
        })
    }

    /// Apply command-line overrides on top of the defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let mut config = Self::new(cli.api_key.clone())?;

        config.base_url = Url::parse(&cli.base_url)?;
        config.listing_url = match &cli.listing_url {
            Some(listing) => Url::parse(listing)?,
            None => config.base_url.join(DEFAULT_LISTING_PATH)?,
        };
        config.max_articles = cli.articles;
        config.source_lang = cli.source_lang.clone();
        config.target_lang = cli.target_lang.clone();
        if !cli.stop_words.is_empty() {
            config.stop_words = cli.stop_words.clone();
        }
        config.min_word_len = cli.min_word_len;
        config.pacing = Pacing::from(Duration::from_millis(cli.delay_ms));
        config.image_dir = PathBuf::from(&cli.image_dir);
        config.user_agent = cli.user_agent.clone();
        config.translator.endpoint = Url::parse(&cli.translate_url)?;

        Ok(config)
    }

    pub fn normalizer(&self) -> WordNormalizer {
        WordNormalizer::new(&self.stop_words, self.min_word_len)
    }
}
