use anyhow::Result;
use clap::Parser;
use tracing::error;

use logcount::{analyzer, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    match analyzer::analyze_access_log(&args) {
        Ok(result) => {
            analyzer::print_analysis_results(&result, &args);
            Ok(())
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
