use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::table::DEFAULT_BUCKET_COUNT;

#[derive(Parser, Debug)]
#[command(
    name = "logcount",
    about = "Count manifest URL hits in an access log, sequentially or in parallel",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the manifest file (one URL per line)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Path to the access log file
    #[arg(short, long)]
    pub log: PathBuf,

    /// Path for the result file
    #[arg(short, long, default_value = "results.csv")]
    pub output: PathBuf,

    /// Execution mode
    #[arg(long, value_enum, default_value = "compare")]
    pub mode: RunMode,

    /// Number of worker threads for parallel counting
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of hash table buckets
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_COUNT)]
    pub buckets: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Single-threaded counting
    Sequential,
    /// Fork-join counting with atomic increments
    Parallel,
    /// Run both and verify they agree
    Compare,
}
