//! Article body extraction.
//!
//! Body text is taken from the first `<div>` matching one of the known body
//! markers, tried in order. If none yields text, the paragraphs of the first
//! `<article>` are joined with newlines. No match at any stage means no
//! content.

use crate::document::{AttrMatch, Document, ElementQuery, NodeQuery};
use crate::scrapers::{ContentSource, get_text};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Body containers in priority order.
static BODY_SELECTORS: Lazy<Vec<ElementQuery>> = Lazy::new(|| {
    vec![
        ElementQuery::tag("div")
            .attr("class", AttrMatch::HasClass("a_c clearfix"))
            .attr("data-dtm-region", AttrMatch::Equals("articulo_cuerpo")),
        ElementQuery::tag("div").attr("class", AttrMatch::HasClass("articulo-cuerpo")),
        ElementQuery::tag("div").attr("class", AttrMatch::HasClass("article_body")),
        ElementQuery::tag("div").attr("itemprop", AttrMatch::Equals("articleBody")),
        ElementQuery::tag("div").attr("class", AttrMatch::HasClass("article__body")),
    ]
});

static ARTICLE: Lazy<ElementQuery> = Lazy::new(|| ElementQuery::tag("article"));
static PARAGRAPH: Lazy<ElementQuery> = Lazy::new(|| ElementQuery::tag("p"));

/// Pick the body text out of an article page.
pub fn extract_body(markup: &str) -> Option<String> {
    let document = Document::parse(markup);

    if let Some(container) =
        document.first_match(&BODY_SELECTORS, |el| !el.normalized_text().is_empty())
    {
        return Some(container.normalized_text());
    }

    let article = document.find_first(&ARTICLE)?;
    let body = article
        .find_all(&PARAGRAPH)
        .map(|p| p.normalized_text())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    (!body.is_empty()).then_some(body)
}

/// Fetches article pages over HTTP and extracts their body text.
#[derive(Debug, Clone)]
pub struct HttpContent {
    client: Client,
}

impl HttpContent {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ContentSource for HttpContent {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_content(&self, url: &str) -> Option<String> {
        let html = match get_text(&self.client, url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Article fetch failed; continuing without content");
                return None;
            }
        };

        let body = extract_body(&html);
        match &body {
            Some(text) => debug!(
                chars = text.chars().count(),
                preview = %truncate_for_log(text, 80),
                "Extracted article body"
            ),
            None => warn!("No article body found"),
        }
        body
    }
}
