use std::path::PathBuf;
use std::time::Duration;

use crate::engine::Mode;

#[derive(Debug)]
pub struct CountRun {
    pub mode: Mode,
    pub workers: usize,
    pub duration: Duration,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub manifest_urls: usize,
    pub total_queries: usize,
    pub matched_queries: u64,
    pub runs: Vec<CountRun>,
    pub output_path: PathBuf,
}
