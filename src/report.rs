use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::table::CountingTable;

/// Drains the table into (url, hits) pairs sorted ascending by URL.
/// Must only run after the counting phase has fully joined; the caller
/// owns that barrier.
pub fn snapshot(table: &CountingTable) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = table
        .entries()
        .map(|entry| (entry.url(), entry.hits()))
        .collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
    rows
}

/// Writes one `url,hit_count` line per row. Same rows in, same bytes
/// out, regardless of mode or worker count.
pub fn write_results(rows: &[(&str, u64)], path: &Path) -> Result<()> {
    let start_time = Instant::now();

    let file =
        File::create(path).with_context(|| format!("Failed to create result file {:?}", path))?;
    let mut out = BufWriter::new(file);

    for (url, hits) in rows {
        writeln!(out, "{},{}", url, hits)
            .with_context(|| format!("Failed to write result file {:?}", path))?;
    }
    out.flush()
        .with_context(|| format!("Failed to flush result file {:?}", path))?;

    info!(
        action = "complete",
        component = "report",
        row_count = rows.len(),
        path = ?path,
        duration_ms = start_time.elapsed().as_millis(),
        "Results written"
    );
    Ok(())
}
