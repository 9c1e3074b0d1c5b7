//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests write temporary Matrix-Market files and build delta
//! commands with sensible defaults.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, CommandOutput, DeltaCommand, DeltaModel, render_output, run_cli};

pub(super) const SCENARIO_MTX: &str = "\
%%MatrixMarket matrix coordinate pattern general
6 6 6
1 2
1 3
2 3
3 1
3 4
4 4
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_mtx_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn delta_command(path: PathBuf, model: DeltaModel, count: usize) -> DeltaCommand {
    DeltaCommand {
        path,
        model,
        count,
        ratio: 0.5,
        alpha: 0.0,
        beta: 1.0,
        lambda: 0.0,
        loose: false,
        strict_preferential: false,
        seed: Some(7),
        rounds: 1,
        print: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render_to_string(output: &CommandOutput) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_output(output, &mut buffer) {
        panic!("rendering into memory failed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output is not UTF-8: {err}"),
    }
}
