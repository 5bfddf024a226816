use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

use crate::table::CountingTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Parallel,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sequential => "sequential",
            Mode::Parallel => "parallel",
        }
    }
}

pub fn default_workers() -> usize {
    std::cmp::min(num_cpus::get(), 8)
}

/// Applies the query stream to the table: one lookup and, on a hit, one
/// atomic increment per query. Misses are ignored. Both modes leave the
/// table with identical counts for identical input.
pub fn count(table: &CountingTable, queries: &[String], mode: Mode, workers: usize) -> Result<()> {
    match mode {
        Mode::Sequential => {
            for query in queries {
                if let Some(entry) = table.get(query) {
                    entry.record_hit();
                }
            }
            Ok(())
        }
        Mode::Parallel => count_parallel(table, queries, workers),
    }
}

/// Fork-join over a dedicated pool: the stream is split into contiguous
/// chunks, one per worker, and `install` does not return until every
/// worker has finished its chunk. That implicit join is the barrier the
/// reporter relies on.
fn count_parallel(table: &CountingTable, queries: &[String], workers: usize) -> Result<()> {
    let workers = workers.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to build worker thread pool")?;

    let chunk_size = std::cmp::max(queries.len().div_ceil(workers), 1);
    info!(
        action = "configure",
        component = "engine",
        worker_count = workers,
        chunk_size,
        "Partitioned query stream across workers"
    );

    pool.install(|| {
        queries.par_chunks(chunk_size).for_each(|chunk| {
            for query in chunk {
                if let Some(entry) = table.get(query) {
                    entry.record_hit();
                }
            }
        });
    });

    Ok(())
}
