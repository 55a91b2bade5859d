//! Listing page retrieval and article block extraction.
//!
//! An article block is an `<article>` element. For each of the first N blocks
//! the title comes from its first `<h2>`, the link from its first `<a>` with a
//! non-empty `href` and the image from its first `<img>` with a non-empty
//! `src`. Relative links are resolved against the base origin.

use crate::document::{AttrMatch, Document, ElementQuery, NodeQuery};
use crate::models::ExtractedArticle;
use crate::scrapers::{ListingSource, get_text};
use once_cell::sync::Lazy;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

static ARTICLE: Lazy<ElementQuery> = Lazy::new(|| ElementQuery::tag("article"));
static TITLE: Lazy<ElementQuery> = Lazy::new(|| ElementQuery::tag("h2"));
static LINK: Lazy<ElementQuery> =
    Lazy::new(|| ElementQuery::tag("a").attr("href", AttrMatch::NonEmpty));
static IMAGE: Lazy<ElementQuery> =
    Lazy::new(|| ElementQuery::tag("img").attr("src", AttrMatch::NonEmpty));

/// Extract up to `max` articles from listing markup, in document order.
///
/// # Arguments
///
/// * `markup` - Raw HTML of the listing page
/// * `max` - Number of article blocks to consider
/// * `base` - Origin that relative links and image sources are resolved against
///
/// # Returns
///
/// One [`ExtractedArticle`] per block that had both a title and a link. Only
/// the first `max` blocks are considered and incomplete blocks are skipped,
/// so the result can be shorter than `max`.
pub fn extract_articles(markup: &str, max: usize, base: &Url) -> Vec<ExtractedArticle> {
    let document = Document::parse(markup);

    document
        .find_all(&ARTICLE)
        .take(max)
        .enumerate()
        .filter_map(|(idx, block)| {
            let title = block
                .find_first(&TITLE)
                .map(|h| h.normalized_text())
                .filter(|t| !t.is_empty());
            let url = block
                .find_first(&LINK)
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve(base, href));

            let (Some(title), Some(url)) = (title, url) else {
                debug!(position = idx + 1, "Article block without title or link; skipping");
                return None;
            };

            let image_url = block
                .find_first(&IMAGE)
                .and_then(|img| img.value().attr("src"))
                .and_then(|src| resolve(base, src));

            Some(ExtractedArticle {
                position: idx + 1,
                title,
                url,
                image_url,
            })
        })
        .collect()
}

/// Resolve a possibly relative reference against `base`.
pub fn resolve(base: &Url, reference: &str) -> Option<String> {
    base.join(reference.trim()).ok().map(|u| u.to_string())
}

/// Fetches the listing page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpListing {
    client: Client,
    listing_url: Url,
}

impl HttpListing {
    pub fn new(client: Client, listing_url: Url) -> Self {
        Self {
            client,
            listing_url,
        }
    }
}

impl ListingSource for HttpListing {
    #[instrument(level = "info", skip_all, fields(url = %self.listing_url))]
    async fn fetch_listing(&self) -> Result<String, Box<dyn Error>> {
        let html = get_text(&self.client, self.listing_url.as_str()).await?;
        info!(bytes = html.len(), "Fetched listing page");
        Ok(html)
    }
}
