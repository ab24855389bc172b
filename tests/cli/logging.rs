use crate::cli::support::scoresplit;
use predicates::prelude::*;

// ============================================================================
// Logging flag tests
// ============================================================================

#[test]
fn test_default_logging_is_quiet() {
    scoresplit()
        .args(["allocate", "--total", "100", "--subjects", "A,B"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_verbose_emits_debug_to_stderr() {
    scoresplit()
        .args(["-v", "allocate", "--total", "100", "--subjects", "A,B"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("allocate"));
}

#[test]
fn test_log_level_flag() {
    scoresplit()
        .args(["--log-level", "debug", "allocate", "--total", "100", "--subjects", "A,B"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_log_json_format() {
    scoresplit()
        .args([
            "--log-json", "-v", "allocate", "--total", "100", "--subjects", "A,B",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"DEBUG\""));
}

#[test]
fn test_env_filter_override() {
    scoresplit()
        .env("SCORESPLIT_LOG", "scoresplit_core=debug")
        .args(["allocate", "--total", "100", "--subjects", "A,B"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = scoresplit()
        .args([
            "-v", "--format", "json", "allocate", "--total", "100", "--subjects", "A,B",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["checksum"], 100);
}

#[test]
fn test_verbose_preview_reports_seed_policy() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("class.csv");
    std::fs::write(&roster, "Name,Math,Art,Total\nAda,,,90\n").unwrap();

    scoresplit()
        .args(["-v", "preview"])
        .arg(&roster)
        .args(["--seed-policy", "row"])
        .assert()
        .success()
        .stderr(predicate::str::contains("allocate_roster"))
        .stderr(predicate::str::contains("reproducible=true"));
}
