//! Lead image downloads.
//!
//! Images are written to `<image_dir>/article_<position>_photo.jpg`. The
//! directory is created on first use. Bodies are streamed into a `.part`
//! file that is renamed once complete, so a broken transfer leaves nothing
//! behind.

use crate::scrapers::ImageSink;
use futures::StreamExt;
use reqwest::{Client, Response};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};
use url::Url;

/// File name used for an article's image.
pub fn image_file_name(position: usize) -> String {
    format!("article_{position}_photo.jpg")
}

#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
    base_url: Url,
    image_dir: PathBuf,
}

impl ImageDownloader {
    pub fn new(client: Client, base_url: Url, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_url,
            image_dir: image_dir.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    async fn download(&self, image_url: &str, position: usize) -> Result<PathBuf, Box<dyn Error>> {
        let url = self.base_url.join(image_url)?;
        let response = self.client.get(url).send().await?.error_for_status()?;

        fs::create_dir_all(&self.image_dir).await?;
        let path = self.image_dir.join(image_file_name(position));
        let partial = self.image_dir.join(format!("{}.part", image_file_name(position)));

        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };
        fs::rename(&partial, &path).await?;

        info!(path = %path.display(), bytes = written, "Saved article image");
        Ok(path)
    }
}

/// Stream a response body into `path`, returning the number of bytes written.
async fn write_body(response: Response, path: &Path) -> Result<usize, Box<dyn Error>> {
    let mut file = fs::File::create(path).await?;
    let mut written = 0usize;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        written += chunk.len();
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(written)
}

impl ImageSink for ImageDownloader {
    #[instrument(level = "info", skip_all, fields(%image_url, position = position))]
    async fn store_image(&self, image_url: &str, position: usize) -> Option<PathBuf> {
        match self.download(image_url, position).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Image download failed; continuing without image");
                None
            }
        }
    }
}
