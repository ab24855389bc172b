use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for scoresplit, isolated from the user's config
pub fn scoresplit() -> Command {
    let mut cmd = cargo_bin_cmd!("scoresplit");
    cmd.env("SCORESPLIT_CONFIG_DIR", std::env::temp_dir().join("scoresplit-tests-no-config"));
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("SCORESPLIT_LOG");
    cmd
}

/// Weighted roster: three subjects with header weights
pub const WEIGHTED_ROSTER: &str = "\
姓名,语文(40%),数学(40%),英语(20%),总分
Alice,,,,250
Bob,,,,180
Carol,,,,90
";

/// Capped roster: absolute per-subject maximums
pub const CAPPED_ROSTER: &str = "\
Name,Chinese[150],Math[150],English[100],Total
Dave,,,,300
Erin,,,,420
";

/// Write `content` into `dir/name` and return the full path
pub fn write_roster(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Parse stdout as JSON
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

/// Read an exported CSV into rows of cells (no quoting in test fixtures)
pub fn read_csv_rows(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split(',').map(|c| c.to_string()).collect())
        .collect()
}
