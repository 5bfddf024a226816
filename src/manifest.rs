use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::table::{CountingTable, TableBuilder};

/// Builds a frozen counting table from raw manifest lines. Lines are
/// trimmed, blanks discarded, and duplicates collapse onto the first
/// occurrence.
pub fn build_table<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    bucket_count: usize,
) -> Result<CountingTable> {
    let mut builder = TableBuilder::with_buckets(bucket_count)?;
    let mut duplicates: u64 = 0;

    for line in lines {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        if !builder.insert(url) {
            duplicates += 1;
        }
    }

    let table = builder.freeze();
    info!(
        action = "build",
        component = "manifest",
        url_count = table.len(),
        duplicates,
        bucket_count = table.bucket_count(),
        "Counting table built"
    );
    Ok(table)
}

pub fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read manifest file {:?}", path))
}

pub fn load_manifest(path: &Path, bucket_count: usize) -> Result<CountingTable> {
    let start_time = Instant::now();
    info!(action = "start", component = "manifest", path = ?path, "Loading manifest");

    let content = read_manifest(path)?;
    let table = build_table(content.lines(), bucket_count)?;

    info!(
        action = "complete",
        component = "manifest",
        url_count = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Manifest loaded"
    );
    Ok(table)
}
