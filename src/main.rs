//! # Opinion Headers
//!
//! Scrapes a newspaper's opinion section, translates the headlines and
//! reports which words the translated headlines repeat.
//!
//! ## Usage
//!
//! ```sh
//! RAPIDAPI_KEY=... opinion_headers -n 5 --json-output-dir ./reports
//! ```
//!
//! ## Architecture
//!
//! The application is one sequential pipeline:
//! 1. **Listing**: fetch the opinion page and extract the first N article blocks
//! 2. **Per article**: fetch the body, translate the title, download the lead image
//! 3. **Counting**: tally normalized words across translated titles
//! 4. **Output**: print the text report and optionally write a JSON report

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod document;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;
mod words;

use api::RapidTranslator;
use cli::Cli;
use config::AnalyzerConfig;
use outputs::{json, report};
use pipeline::HeaderAnalyzer;
use scrapers::content::HttpContent;
use scrapers::images::ImageDownloader;
use scrapers::listing::HttpListing;
use utils::ensure_writable_dir;

/// Logs go to stderr so that stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("opinion_headers=info,warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let start_time = std::time::Instant::now();
    let started_at = Utc::now();
    info!("opinion_headers starting up");

    let args = Cli::parse();
    debug!(?args.listing_url, articles = args.articles, "Parsed CLI arguments");

    let config = AnalyzerConfig::from_cli(&args)?;
    info!(
        listing = %config.listing_url,
        max_articles = config.max_articles,
        pacing = ?config.pacing,
        "Configuration loaded"
    );

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(Path::new(dir)).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    // ---- Collaborators ----
    let client = scrapers::build_client(&config.user_agent)?;
    let listing = HttpListing::new(client.clone(), config.listing_url.clone());
    let content = HttpContent::new(client.clone());
    let translator = RapidTranslator::new(client.clone(), config.translator.clone());
    let images = ImageDownloader::new(client, config.base_url.clone(), &config.image_dir);
    debug!(image_dir = %images.image_dir().display(), "Image downloader ready");

    // ---- Run ----
    let analyzer = HeaderAnalyzer::new(config.clone(), listing, content, translator, images);
    let analysis = analyzer.run().await;
    if analysis.is_empty() {
        warn!("No articles were analyzed");
    }

    print!("{}", report::render(&analysis));

    if let Some(dir) = &args.json_output_dir {
        let run_report = json::build_report(&config, analysis, started_at);
        if let Err(e) = json::write_report(&run_report, Path::new(dir), started_at).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
