use std::fs;
use std::path::PathBuf;

use logcount::{analyzer, Args, RunMode};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("logcount-test-{}-{}", std::process::id(), name))
}

fn write_fixture(name: &str, content: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

fn log_line(url: &str) -> String {
    format!(
        "127.0.0.1 - - [01/Nov/2025:10:00:00 -0300] \"GET {} HTTP/1.1\" 200 1500\n",
        url
    )
}

fn make_args(manifest: PathBuf, log: PathBuf, output: PathBuf, mode: RunMode) -> Args {
    Args {
        manifest,
        log,
        output,
        mode,
        workers: Some(4),
        buckets: 64,
        verbose: false,
    }
}

#[test]
fn compare_mode_end_to_end() {
    let manifest = write_fixture("cmp-manifest.txt", "/a\n/b\n");
    let log_content: String = ["/a", "/b", "/a", "/c", "/a"]
        .iter()
        .map(|u| log_line(u))
        .collect();
    let log = write_fixture("cmp-access.log", &log_content);
    let output = temp_path("cmp-results.csv");

    let args = make_args(manifest.clone(), log.clone(), output.clone(), RunMode::Compare);
    let result = analyzer::analyze_access_log(&args).expect("analysis should succeed");

    assert_eq!(result.manifest_urls, 2);
    assert_eq!(result.total_queries, 5);
    assert_eq!(result.matched_queries, 4);
    assert_eq!(result.runs.len(), 2);

    let bytes = fs::read_to_string(&output).expect("result file should exist");
    assert_eq!(bytes, "/a,3\n/b,1\n");

    for path in [manifest, log, output] {
        let _ = fs::remove_file(path);
    }
}

#[test]
fn output_is_byte_identical_across_modes_and_runs() {
    let manifest = write_fixture("det-manifest.txt", "/x\n/y\n/z\n");
    let mut log_content = String::new();
    for i in 0..500 {
        log_content.push_str(&log_line(["/x", "/y", "/z", "/miss"][i % 4]));
    }
    let log = write_fixture("det-access.log", &log_content);

    let mut outputs = Vec::new();
    for (name, mode) in [
        ("det-seq.csv", RunMode::Sequential),
        ("det-par1.csv", RunMode::Parallel),
        ("det-par2.csv", RunMode::Parallel),
    ] {
        let output = temp_path(name);
        let args = make_args(manifest.clone(), log.clone(), output.clone(), mode);
        analyzer::analyze_access_log(&args).expect("analysis should succeed");
        outputs.push(fs::read(&output).expect("result file should exist"));
        let _ = fs::remove_file(output);
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);

    let _ = fs::remove_file(manifest);
    let _ = fs::remove_file(log);
}

#[test]
fn empty_manifest_produces_empty_output() {
    let manifest = write_fixture("empty-manifest.txt", "");
    let log = write_fixture("empty-access.log", &log_line("/x"));
    let output = temp_path("empty-results.csv");

    let args = make_args(manifest.clone(), log.clone(), output.clone(), RunMode::Compare);
    let result = analyzer::analyze_access_log(&args).expect("analysis should succeed");

    assert_eq!(result.manifest_urls, 0);
    assert_eq!(result.matched_queries, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");

    for path in [manifest, log, output] {
        let _ = fs::remove_file(path);
    }
}

#[test]
fn missing_log_file_is_an_error() {
    let manifest = write_fixture("err-manifest.txt", "/a\n");
    let args = make_args(
        manifest.clone(),
        temp_path("err-no-such.log"),
        temp_path("err-results.csv"),
        RunMode::Sequential,
    );

    assert!(analyzer::analyze_access_log(&args).is_err());
    let _ = fs::remove_file(manifest);
}
