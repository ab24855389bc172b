use crate::cli::support::{scoresplit, stdout_json};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let dir = tempdir().unwrap();

    let output = scoresplit()
        .current_dir(dir.path())
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["source"], "defaults");
    assert_eq!(json["config"]["min_each"], 1);
    assert_eq!(json["config"]["max_each_fraction"], 0.6);
    assert_eq!(json["config"]["randomness"], 0.25);
    assert_eq!(json["config"]["use_weights"], true);
    assert_eq!(json["config"]["seed"], "random");
}

#[test]
fn test_config_init_then_show() {
    let dir = tempdir().unwrap();

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scoresplit.toml"));

    let content = fs::read_to_string(dir.path().join("scoresplit.toml")).unwrap();
    assert!(content.contains("min_each = 1"));

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# source:"))
        .stdout(predicate::str::contains("scoresplit.toml"))
        .stdout(predicate::str::contains("max_each_fraction = 0.6"));
}

#[test]
fn test_config_init_refuses_existing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scoresplit.toml"), "min_each = 3\n").unwrap();

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("scoresplit.toml")).unwrap();
    assert!(content.contains("min_each = 1"));
}

#[test]
fn test_local_config_applies_to_allocate() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("scoresplit.toml"),
        "min_each = 5\nrandomness = 0.0\n",
    )
    .unwrap();

    let output = scoresplit()
        .current_dir(dir.path())
        .args(["--format", "json", "allocate", "--total", "15", "--subjects", "A,B,C"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    for score in json["scores"].as_array().unwrap() {
        assert_eq!(score["score"], 5);
    }
}

#[test]
fn test_flags_override_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scoresplit.toml"), "min_each = 10\n").unwrap();

    // min_each = 10 would need 30 for three subjects
    scoresplit()
        .current_dir(dir.path())
        .args(["allocate", "--total", "15", "--subjects", "A,B,C"])
        .assert()
        .code(3);

    scoresplit()
        .current_dir(dir.path())
        .args([
            "allocate", "--total", "15", "--subjects", "A,B,C", "--min-each", "1",
        ])
        .assert()
        .success();
}

#[test]
fn test_explicit_config_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strict.toml");
    fs::write(&path, "min_each = 10\n").unwrap();

    let output = scoresplit()
        .arg("--config")
        .arg(&path)
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["config"]["min_each"], 10);
    assert_eq!(json["source"], path.display().to_string());
}

#[test]
fn test_invalid_config_values_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scoresplit.toml"), "max_each_fraction = 2.0\n").unwrap();

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_each_fraction"));
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scoresplit.toml"), "min_each = [\n").unwrap();

    scoresplit()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .code(1);
}
