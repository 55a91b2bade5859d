//! The header analysis pipeline.
//!
//! For every article block on the listing page, in order:
//!
//! 1. fetch the body text (optional)
//! 2. translate the title (mandatory; untranslated articles are dropped)
//! 3. download the lead image (optional)
//! 4. feed the normalized translated title into the word counter
//!
//! with a fixed pause between consecutive articles. A listing page that
//! cannot be fetched produces an empty [`Analysis`]; nothing in here fails.

use crate::api::Translate;
use crate::config::AnalyzerConfig;
use crate::models::{Analysis, ArticleRecord, ExtractedArticle};
use crate::scrapers::listing::extract_articles;
use crate::scrapers::{ContentSource, ImageSink, ListingSource};
use crate::words::{WordCounter, WordNormalizer};
use tracing::{debug, error, info, instrument, warn};

/// Drives one analysis run over its collaborators.
///
/// The analyzer owns the word counter and the result list for the duration
/// of [`HeaderAnalyzer::run`]; collaborators are only ever called one at a
/// time.
///
/// # Type Parameters
///
/// * `L` - source of the listing page markup
/// * `C` - body text fetcher
/// * `T` - headline translator
/// * `I` - lead image store
pub struct HeaderAnalyzer<L, C, T, I> {
    config: AnalyzerConfig,
    normalizer: WordNormalizer,
    listing: L,
    content: C,
    translator: T,
    images: I,
}

impl<L, C, T, I> HeaderAnalyzer<L, C, T, I>
where
    L: ListingSource,
    C: ContentSource,
    T: Translate,
    I: ImageSink,
{
    pub fn new(config: AnalyzerConfig, listing: L, content: C, translator: T, images: I) -> Self {
        Self {
            normalizer: config.normalizer(),
            config,
            listing,
            content,
            translator,
            images,
        }
    }

    /// Run the whole pipeline once.
    ///
    /// # Returns
    ///
    /// The kept [`ArticleRecord`]s in listing order and the words repeated
    /// across their translated titles. A listing page that cannot be fetched
    /// yields an empty [`Analysis`].
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let analyzer = HeaderAnalyzer::new(config, listing, content, translator, images);
    /// let analysis = analyzer.run().await;
    /// print!("{}", report::render(&analysis));
    /// ```
    #[instrument(level = "info", skip_all, fields(max = self.config.max_articles))]
    pub async fn run(&self) -> Analysis {
        let markup = match self.listing.fetch_listing().await {
            Ok(markup) => markup,
            Err(e) => {
                error!(
                    url = %self.config.listing_url,
                    error = %e,
                    "Could not retrieve listing page; nothing to analyze"
                );
                return Analysis::default();
            }
        };

        let extracted = extract_articles(&markup, self.config.max_articles, &self.config.base_url);
        info!(count = extracted.len(), "Extracted article blocks");

        let mut counter = WordCounter::new();
        let mut articles = Vec::with_capacity(extracted.len());

        for (i, article) in extracted.iter().enumerate() {
            if i > 0 {
                self.config.pacing.pause().await;
            }

            if let Some(record) = self.process_article(article).await {
                counter.add(self.normalizer.normalize(&record.translated_title));
                articles.push(record);
            }
        }

        let repeated_words = counter.repeated();
        info!(
            considered = extracted.len(),
            kept = articles.len(),
            distinct_words = counter.distinct(),
            repeated = repeated_words.len(),
            "Analysis complete"
        );

        Analysis {
            articles,
            repeated_words,
        }
    }

    #[instrument(level = "info", skip_all, fields(position = article.position, url = %article.url))]
    async fn process_article(&self, article: &ExtractedArticle) -> Option<ArticleRecord> {
        let content = self.content.fetch_content(&article.url).await;

        let Some(translated_title) = self
            .translator
            .translate(
                &article.title,
                &self.config.source_lang,
                &self.config.target_lang,
            )
            .await
        else {
            warn!(title = %article.title, "No translation; dropping article");
            return None;
        };

        let image_path = match &article.image_url {
            Some(image_url) => {
                info!("Downloading article image");
                self.images.store_image(image_url, article.position).await
            }
            None => {
                debug!("Article has no image");
                None
            }
        };

        Some(ArticleRecord {
            original_title: article.title.clone(),
            translated_title,
            content,
            url: article.url.clone(),
            image_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use std::collections::HashMap;
    use std::error::Error;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeListing(Option<String>);

    impl ListingSource for FakeListing {
        async fn fetch_listing(&self) -> Result<String, Box<dyn Error>> {
            self.0.clone().ok_or_else(|| "connection refused".into())
        }
    }

    #[derive(Default)]
    struct FakeContent {
        bodies: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl ContentSource for FakeContent {
        async fn fetch_content(&self, url: &str) -> Option<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.bodies.get(url).cloned()
        }
    }

    #[derive(Default)]
    struct FakeTranslator {
        translations: HashMap<String, String>,
        requests: Mutex<Vec<(String, String, String)>>,
    }

    impl FakeTranslator {
        fn with(pairs: &[(&str, &str)]) -> Self {
            Self {
                translations: pairs
                    .iter()
                    .map(|(from, to)| (from.to_string(), to.to_string()))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl Translate for FakeTranslator {
        async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String> {
            self.requests.lock().unwrap().push((
                text.to_string(),
                source_lang.to_string(),
                target_lang.to_string(),
            ));
            self.translations.get(text).cloned()
        }
    }

    #[derive(Default)]
    struct FakeImages {
        fail: bool,
        stored: Mutex<Vec<(String, usize)>>,
    }

    impl ImageSink for FakeImages {
        async fn store_image(&self, image_url: &str, position: usize) -> Option<PathBuf> {
            self.stored
                .lock()
                .unwrap()
                .push((image_url.to_string(), position));
            if self.fail {
                return None;
            }
            Some(PathBuf::from(format!("article_images/article_{position}_photo.jpg")))
        }
    }

    fn config(pacing: Pacing) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::new("test-key").unwrap();
        config.pacing = pacing;
        config
    }

    const TWO_ARTICLES: &str = r#"
        <html><body>
          <article>
            <img src="/img/1.jpg">
            <h2><a href="/opinion/uno.html">Crisis política se agrava política</a></h2>
          </article>
          <article>
            <h2><a href="/opinion/dos.html">Se avecina crisis económica</a></h2>
          </article>
        </body></html>
    "#;

    fn two_article_translator() -> FakeTranslator {
        FakeTranslator::with(&[
            (
                "Crisis política se agrava política",
                "Political Crisis Deepens Political",
            ),
            ("Se avecina crisis económica", "Economic Crisis Looms"),
        ])
    }

    fn analyzer<T: Translate>(
        markup: Option<&str>,
        translator: T,
        pacing: Pacing,
    ) -> HeaderAnalyzer<FakeListing, FakeContent, T, FakeImages> {
        let mut content = FakeContent::default();
        content.bodies.insert(
            "https://elpais.com/opinion/uno.html".to_string(),
            "Cuerpo del artículo".to_string(),
        );
        HeaderAnalyzer::new(
            config(pacing),
            FakeListing(markup.map(str::to_string)),
            content,
            translator,
            FakeImages::default(),
        )
    }

    #[tokio::test]
    async fn test_repeated_words_across_titles() {
        let analyzer = analyzer(Some(TWO_ARTICLES), two_article_translator(), Pacing::Disabled);
        let analysis = analyzer.run().await;

        assert_eq!(analysis.articles.len(), 2);
        let mut expected = HashMap::new();
        expected.insert("political".to_string(), 2);
        expected.insert("crisis".to_string(), 2);
        assert_eq!(analysis.repeated_words, expected);
    }

    #[tokio::test]
    async fn test_records_carry_all_fields() {
        let analyzer = analyzer(Some(TWO_ARTICLES), two_article_translator(), Pacing::Disabled);
        let analysis = analyzer.run().await;

        assert_eq!(
            analysis.articles[0],
            ArticleRecord {
                original_title: "Crisis política se agrava política".to_string(),
                translated_title: "Political Crisis Deepens Political".to_string(),
                content: Some("Cuerpo del artículo".to_string()),
                url: "https://elpais.com/opinion/uno.html".to_string(),
                image_path: Some(PathBuf::from("article_images/article_1_photo.jpg")),
            }
        );
        assert!(analysis.articles[1].content.is_none());
        assert!(analysis.articles[1].image_path.is_none());

        let stored = analyzer.images.stored.lock().unwrap();
        assert_eq!(*stored, vec![("https://elpais.com/img/1.jpg".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_translator_receives_language_pair() {
        let analyzer = analyzer(Some(TWO_ARTICLES), two_article_translator(), Pacing::Disabled);
        analyzer.run().await;

        let requests = analyzer.translator.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|(_, from, to)| from == "es" && to == "en"));
    }

    #[tokio::test]
    async fn test_untranslated_article_is_dropped() {
        let translator = FakeTranslator::with(&[("Se avecina crisis económica", "Economic Crisis Looms")]);
        let analyzer = analyzer(Some(TWO_ARTICLES), translator, Pacing::Disabled);
        let analysis = analyzer.run().await;

        assert_eq!(analysis.articles.len(), 1);
        assert_eq!(analysis.articles[0].translated_title, "Economic Crisis Looms");
        assert!(analysis.repeated_words.is_empty());
        // Its content was fetched but never surfaced, and its image was not kept.
        assert_eq!(analyzer.content.requested.lock().unwrap().len(), 2);
        assert!(analyzer.images.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_image_keeps_article() {
        let mut analyzer = analyzer(Some(TWO_ARTICLES), two_article_translator(), Pacing::Disabled);
        analyzer.images.fail = true;
        let analysis = analyzer.run().await;

        assert_eq!(analysis.articles.len(), 2);
        assert_eq!(analysis.articles[0].url, "https://elpais.com/opinion/uno.html");
        assert!(analysis.articles[0].image_path.is_none());
        assert_eq!(analysis.articles[0].content.as_deref(), Some("Cuerpo del artículo"));
        assert_eq!(analysis.repeated_words.get("political"), Some(&2));

        let stored = analyzer.images.stored.lock().unwrap();
        assert_eq!(*stored, vec![("https://elpais.com/img/1.jpg".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_original_titles_never_counted() {
        let translator = FakeTranslator::with(&[
            ("Crisis política se agrava política", "Unrelated headline"),
            ("Se avecina crisis económica", "Another topic"),
        ]);
        let analysis = analyzer(Some(TWO_ARTICLES), translator, Pacing::Disabled)
            .run()
            .await;

        assert_eq!(analysis.articles.len(), 2);
        assert!(analysis.repeated_words.is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_yields_empty_analysis() {
        let analyzer = analyzer(None, two_article_translator(), Pacing::Disabled);
        let analysis = analyzer.run().await;

        assert!(analysis.is_empty());
        assert!(analyzer.translator.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_block_without_link_is_not_processed() {
        let markup = r#"
            <article><h2><a href="/opinion/uno.html">Crisis política se agrava política</a></h2></article>
            <article><h2>Sin enlace</h2></article>
            <article><h2><a href="/opinion/dos.html">Se avecina crisis económica</a></h2></article>
        "#;
        let analyzer = analyzer(Some(markup), two_article_translator(), Pacing::Disabled);
        let analysis = analyzer.run().await;

        assert_eq!(analysis.articles.len(), 2);
        let requests = analyzer.translator.requests.lock().unwrap();
        assert!(requests.iter().all(|(title, _, _)| title != "Sin enlace"));
    }

    #[tokio::test]
    async fn test_respects_article_limit() {
        let block = r#"<article><h2><a href="/opinion/x.html">Titular</a></h2></article>"#;
        let markup = block.repeat(9);
        let translator = FakeTranslator::with(&[("Titular", "Headline Headline")]);
        let mut analyzer = analyzer(Some(&markup), translator, Pacing::Disabled);
        analyzer.config.max_articles = 4;

        let analysis = analyzer.run().await;
        assert_eq!(analysis.articles.len(), 4);
        assert_eq!(analysis.repeated_words.get("headline"), Some(&8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_between_articles() {
        let translator = FakeTranslator::with(&[("Se avecina crisis económica", "Economic Crisis Looms")]);
        let markup = r#"
            <article><h2><a href="/opinion/uno.html">Crisis política se agrava política</a></h2></article>
            <article><h2><a href="/opinion/dos.html">Se avecina crisis económica</a></h2></article>
            <article><h2><a href="/opinion/tres.html">Tres</a></h2></article>
        "#;
        let analyzer = analyzer(Some(markup), translator, Pacing::Fixed(Duration::from_secs(1)));

        let start = tokio::time::Instant::now();
        let analysis = analyzer.run().await;
        let elapsed = start.elapsed();

        // Two pauses for three articles, including around the dropped ones.
        assert_eq!(analysis.articles.len(), 1);
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }
}
