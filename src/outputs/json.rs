//! JSON report of a run.
//!
//! Each run writes a new file named after its UTC start time:
//! `{json_output_dir}/{YYYY-MM-DDTHHMMSSZ}.json`.

use crate::config::AnalyzerConfig;
use crate::models::{Analysis, RunReport};
use chrono::{DateTime, SecondsFormat, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub fn build_report(config: &AnalyzerConfig, analysis: Analysis, at: DateTime<Utc>) -> RunReport {
    RunReport {
        generated_at: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        listing_url: config.listing_url.to_string(),
        source_lang: config.source_lang.clone(),
        target_lang: config.target_lang.clone(),
        analysis,
    }
}

pub fn report_file_name(at: DateTime<Utc>) -> String {
    format!("{}.json", at.format("%Y-%m-%dT%H%M%SZ"))
}

/// Serialize `report` into `json_output_dir`, creating the directory if needed.
///
/// # Arguments
///
/// * `report` - The finished run to serialize
/// * `json_output_dir` - Directory the report file is written to
/// * `at` - Run start time, used for the file name
///
/// # Returns
///
/// The path of the written file, or an error if the directory cannot be
/// created or the file cannot be written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_report(
    report: &RunReport,
    json_output_dir: &Path,
    at: DateTime<Utc>,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(report_file_name(at));
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = report.analysis.articles.len(), "Wrote JSON report");

    Ok(path)
}
