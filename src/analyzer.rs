use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::args::{Args, RunMode};
use crate::engine::{self, Mode};
use crate::stats::{AnalysisResult, CountRun};
use crate::table::CountingTable;
use crate::{access_log, manifest, report, utils};

pub fn analyze_access_log(args: &Args) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", mode = ?args.mode, "Starting access log analysis");

    let queries = access_log::load_queries(&args.log)?;
    let workers = args.workers.unwrap_or_else(engine::default_workers);

    let mut runs = Vec::new();
    let table = match args.mode {
        RunMode::Sequential => {
            let table = manifest::load_manifest(&args.manifest, args.buckets)?;
            runs.push(run_engine(&table, &queries, Mode::Sequential, 1)?);
            table
        }
        RunMode::Parallel => {
            let table = manifest::load_manifest(&args.manifest, args.buckets)?;
            runs.push(run_engine(&table, &queries, Mode::Parallel, workers)?);
            table
        }
        RunMode::Compare => {
            // Two tables from the same manifest, so each engine starts
            // from zeroed counters.
            let manifest_content = manifest::read_manifest(&args.manifest)?;
            let seq_table = manifest::build_table(manifest_content.lines(), args.buckets)?;
            let par_table = manifest::build_table(manifest_content.lines(), args.buckets)?;

            runs.push(run_engine(&seq_table, &queries, Mode::Sequential, 1)?);
            runs.push(run_engine(&par_table, &queries, Mode::Parallel, workers)?);

            if report::snapshot(&seq_table) != report::snapshot(&par_table) {
                anyhow::bail!(
                    "Sequential and parallel counts diverged for {:?}",
                    args.manifest
                );
            }
            info!(
                action = "verify",
                component = "analysis",
                "Sequential and parallel counts match"
            );
            seq_table
        }
    };

    let rows = report::snapshot(&table);
    report::write_results(&rows, &args.output)?;

    let matched_queries: u64 = rows.iter().map(|(_, hits)| hits).sum();
    let result = AnalysisResult {
        manifest_urls: table.len(),
        total_queries: queries.len(),
        matched_queries,
        runs,
        output_path: args.output.clone(),
    };

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(result)
}

fn run_engine(
    table: &CountingTable,
    queries: &[String],
    mode: Mode,
    workers: usize,
) -> Result<CountRun> {
    info!(
        action = "start",
        component = "counting",
        mode = mode.as_str(),
        worker_count = workers,
        query_count = queries.len(),
        "Starting counting phase"
    );

    let start_time = Instant::now();
    engine::count(table, queries, mode, workers)?;
    let duration = start_time.elapsed();

    info!(
        action = "complete",
        component = "counting",
        mode = mode.as_str(),
        duration_ms = duration.as_millis(),
        "Counting phase completed"
    );
    Ok(CountRun {
        mode,
        workers,
        duration,
    })
}

pub fn print_analysis_results(result: &AnalysisResult, args: &Args) {
    println!("\n--- Access Log Analysis ---");
    println!(
        "Manifest URLs: {}",
        utils::format_number(result.manifest_urls as u64)
    );
    println!(
        "Log queries: {}",
        utils::format_number(result.total_queries as u64)
    );
    println!(
        "Matched queries: {}",
        utils::format_number(result.matched_queries)
    );

    for run in &result.runs {
        match run.mode {
            Mode::Sequential => println!(
                "Sequential time: {:.4}s",
                run.duration.as_secs_f64()
            ),
            Mode::Parallel => println!(
                "Parallel time: {:.4}s ({} workers)",
                run.duration.as_secs_f64(),
                run.workers
            ),
        }
    }

    if args.mode == RunMode::Compare && result.runs.len() == 2 {
        let sequential = result.runs[0].duration.as_secs_f64();
        let parallel = result.runs[1].duration.as_secs_f64();
        if parallel > 0.0 {
            println!("Speedup: {:.2}x", sequential / parallel);
        }
        println!("Counts verified identical across modes");
    }

    println!("Results written to {:?}", result.output_path);
}
