pub mod access_log;
pub mod analyzer;
pub mod args;
pub mod engine;
pub mod manifest;
pub mod report;
pub mod stats;
pub mod table;
pub mod utils;

pub use analyzer::analyze_access_log;
pub use args::{Args, RunMode};
pub use engine::Mode;
pub use stats::{AnalysisResult, CountRun};
pub use table::{CounterEntry, CountingTable, TableBuilder};
