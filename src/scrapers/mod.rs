//! Page retrieval and HTML extraction for the opinion listing and its articles.
//!
//! Retrieval happens in two phases:
//!
//! 1. **Listing**: fetch the section page and extract article blocks
//!    ([`listing`])
//! 2. **Per article**: fetch the body text ([`content`]) and the lead image
//!    ([`images`])
//!
//! Each phase sits behind a trait so the pipeline can be driven by in-memory
//! fakes. The HTTP implementations share one [`reqwest::Client`].
//!
//! | Trait | HTTP implementation | Failure handling |
//! |-------|---------------------|------------------|
//! | [`ListingSource`] | [`listing::HttpListing`] | error returned, run yields nothing |
//! | [`ContentSource`] | [`content::HttpContent`] | logged, becomes `None` |
//! | [`ImageSink`] | [`images::ImageDownloader`] | logged, becomes `None` |

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error;
use std::path::PathBuf;

pub mod content;
pub mod images;
pub mod listing;

/// Supplies the raw markup of the listing page.
pub trait ListingSource {
    async fn fetch_listing(&self) -> Result<String, Box<dyn Error>>;
}

/// Best-effort body text for an article URL.
pub trait ContentSource {
    async fn fetch_content(&self, url: &str) -> Option<String>;
}

/// Best-effort persistence of an article's lead image.
pub trait ImageSink {
    /// Store the image at `image_url` for the article at 1-based `position`.
    async fn store_image(&self, image_url: &str, position: usize) -> Option<PathBuf>;
}

/// HTTP client sending the browser user agent on every request.
pub fn build_client(user_agent: &str) -> Result<Client, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
    Ok(Client::builder().default_headers(headers).build()?)
}

/// GET `url` and return the body as text, failing on non-success statuses.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
