//! Behavioural tests for the `graphdelta` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

const CHAIN_MTX: &str = "\
%%MatrixMarket matrix coordinate pattern general
4 4 3
1 2
2 3
3 4
";

fn write_graph(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("graph.mtx");
    if let Err(error) = fs::write(&path, contents) {
        panic!("failed to write graph fixture: {error}");
    }
    path
}

fn run(args: &[&str], graph: &Path) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_graphdelta"));
    command
        .arg(args[0])
        .arg(graph)
        .args(&args[1..])
        .env("RUST_LOG", "warn")
        .env_remove("GRAPHDELTA_LOG_FORMAT");
    match command.output() {
        Ok(output) => output,
        Err(error) => panic!("failed to run graphdelta: {error}"),
    }
}

fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("expected success, got failure: {stderr}");
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[rstest]
fn stats_prints_shape() {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, CHAIN_MTX);
    assert_eq!(stdout_of(&run(&["stats"], &graph)), "order: 4\nsize: 3\n");
}

#[rstest]
#[case::head("0", "start: 0\nvisited: 4\norder: 0 1 2 3\n")]
#[case::tail("3", "start: 3\nvisited: 1\norder: 3\n")]
fn bfs_prints_order(#[case] start: &str, #[case] expected: &str) {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, CHAIN_MTX);
    assert_eq!(stdout_of(&run(&["bfs", "--start", start], &graph)), expected);
}

#[rstest]
fn delta_prints_changes_and_final_shape() {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, CHAIN_MTX);
    let stdout = stdout_of(&run(
        &[
            "delta", "--model", "uniform", "--count", "4", "--ratio", "0.5", "--seed", "11",
            "--print",
        ],
        &graph,
    ));
    assert!(stdout.starts_with("round 0: sampled +2/2 -2/2, applied +2 -2\n"));
    assert_eq!(stdout.matches("+ (").count(), 2);
    assert_eq!(stdout.matches("- (").count(), 2);
    assert!(stdout.ends_with("order: 4\nsize: 3\n"));
}

#[rstest]
fn json_logging_is_selectable() {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, CHAIN_MTX);
    let output = Command::new(env!("CARGO_BIN_EXE_graphdelta"))
        .arg("stats")
        .arg(&graph)
        .env("RUST_LOG", "info")
        .env("GRAPHDELTA_LOG_FORMAT", "json")
        .output()
        .unwrap_or_else(|error| panic!("failed to run graphdelta: {error}"));
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().any(|line| line.starts_with('{')));
}

#[rstest]
#[case::unknown_vertex(&["bfs", "--start", "9"], CHAIN_MTX)]
#[case::malformed_file(&["stats"], "4 4 1\n1\n")]
#[case::degenerate_weights(&["delta", "--model", "attachment", "--count", "1", "--lambda", "10"], CHAIN_MTX)]
fn failures_exit_non_zero(#[case] args: &[&str], #[case] contents: &str) {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, contents);
    let output = run(args, &graph);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command execution failed"));
}

#[rstest]
fn invalid_log_format_fails_fast() {
    let dir = TempDir::new().unwrap_or_else(|error| panic!("temp dir: {error}"));
    let graph = write_graph(&dir, CHAIN_MTX);
    let output = Command::new(env!("CARGO_BIN_EXE_graphdelta"))
        .arg("stats")
        .arg(&graph)
        .env("GRAPHDELTA_LOG_FORMAT", "xml")
        .output()
        .unwrap_or_else(|error| panic!("failed to run graphdelta: {error}"));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported log format `xml`"));
}
