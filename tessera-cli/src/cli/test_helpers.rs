//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{AnalyzeCommand, CliError, commands::run_analyze};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn analyze_expecting_error(command: AnalyzeCommand, panic_msg: &str) -> CliError {
    match run_analyze(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
