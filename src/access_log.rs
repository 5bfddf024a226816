use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

// Expected line shape: IP ... "GET /url HTTP/1.1" status bytes
const METHOD_MARKER: &str = "GET ";

/// Extracts the request URL from a raw log line: the substring between
/// the method marker and the next space. Lines without the marker, the
/// trailing space, or a non-empty URL yield nothing.
pub fn extract_url(line: &str) -> Option<&str> {
    let start = line.find(METHOD_MARKER)? + METHOD_MARKER.len();
    let rest = &line[start..];
    let end = rest.find(' ')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

/// Reads the whole access log into memory as an ordered query stream,
/// one URL per parseable line. All I/O happens here, before the
/// counting phase begins.
pub fn load_queries(path: &Path) -> Result<Vec<String>> {
    let start_time = Instant::now();
    info!(action = "start", component = "access_log", path = ?path, "Reading access log");

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read access log {:?}", path))?;

    let mut queries = Vec::new();
    let mut skipped: u64 = 0;
    for line in content.lines() {
        match extract_url(line) {
            Some(url) => queries.push(url.to_string()),
            None => skipped += 1,
        }
    }

    info!(
        action = "complete",
        component = "access_log",
        query_count = queries.len(),
        skipped,
        duration_ms = start_time.elapsed().as_millis(),
        "Access log loaded"
    );
    Ok(queries)
}
