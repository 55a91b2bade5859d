//! Utility functions for string shortening and output directory checks.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

const WRITE_CHECK_FILE: &str = ".opinion_headers_write_check";

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters and a byte count indicator is
/// appended. Cuts always land on a character boundary.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// At most the first `max` characters of `s`.
pub fn char_prefix(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        None => s,
        Some((cut, _)) => &s[..cut],
    }
}

/// Create `dir` if missing and check that files can be written into it.
///
/// Called before the run starts so that an unusable report directory fails
/// fast instead of after every article has been fetched.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub async fn ensure_writable_dir(dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir).await?;
    let check = dir.join(WRITE_CHECK_FILE);
    fs::write(&check, b"").await?;
    fs::remove_file(&check).await?;
    debug!("Report directory is writable");
    Ok(())
}
