use crate::cli::support::{
    scoresplit, stdout_json, write_roster, CAPPED_ROSTER, WEIGHTED_ROSTER,
};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Preview command tests
// ============================================================================

#[test]
fn test_preview_human_table() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .arg("preview")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("语文"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Carol"));
}

#[test]
fn test_preview_json_totals_match() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    let output = scoresplit()
        .args(["--format", "json", "preview"])
        .arg(&roster)
        .args(["--seed-policy", "row"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["subjects"], serde_json::json!(["语文", "数学", "英语"]));
    let students = json["students"].as_array().unwrap();
    assert_eq!(students.len(), 3);
    for (student, total) in students.iter().zip([250, 180, 90]) {
        assert_eq!(student["total"], total);
        assert_eq!(student["checksum"], total);
        let sum: i64 = student["scores"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["score"].as_i64().unwrap())
            .sum();
        assert_eq!(sum, total);
    }
    assert_eq!(students[0]["seed"], 1);
    assert_eq!(students[2]["seed"], 3);
}

#[test]
fn test_preview_deterministic_seed_policy() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    let run = || {
        scoresplit()
            .args(["--format", "json", "preview"])
            .arg(&roster)
            .args(["--seed-policy", "42"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_preview_does_not_modify_input() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit().arg("preview").arg(&roster).assert().success();

    assert_eq!(fs::read_to_string(&roster).unwrap(), WEIGHTED_ROSTER);
    assert!(!dir.path().join("class_allocated.csv").exists());
}

#[test]
fn test_preview_capped_roster() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "capped.csv", CAPPED_ROSTER);

    let output = scoresplit()
        .args(["--format", "json", "preview"])
        .arg(&roster)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    for student in json["students"].as_array().unwrap() {
        let scores = student["scores"].as_array().unwrap();
        for (score, cap) in scores.iter().zip([150, 150, 100]) {
            let v = score["score"].as_i64().unwrap();
            assert!((1..=cap).contains(&v));
        }
    }
}

#[test]
fn test_preview_records_format() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .args(["--format", "records", "preview"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H scoresplit=1 mode=batch subjects=3 students=3",
        ))
        .stdout(predicate::str::contains("S \"Alice\" total=250 effective=250 checksum=250"))
        .stdout(predicate::str::contains("A \"数学\" score="));
}

#[test]
fn test_preview_relative_path_uses_root() {
    let dir = tempdir().unwrap();
    write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .arg("--root")
        .arg(dir.path())
        .args(["preview", "class.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn test_preview_missing_total_column() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "bad.csv", "Name,Math,English\nAlice,,\n");

    scoresplit()
        .arg("preview")
        .arg(&roster)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no total column"));
}

#[test]
fn test_preview_invalid_total() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "bad.csv", "Name,Math,English,Total\nAlice,,,abc\n");

    let output = scoresplit()
        .args(["--format", "json", "preview"])
        .arg(&roster)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["type"], "invalid_total");
}

#[test]
fn test_preview_infeasible_student_named() {
    let dir = tempdir().unwrap();
    let roster = write_roster(
        &dir,
        "tight.csv",
        "Name,A,B,C,Total\nAlice,,,,30\nBob,,,,2\n",
    );

    scoresplit()
        .arg("preview")
        .arg(&roster)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Bob"));
}

#[test]
fn test_preview_missing_file() {
    let dir = tempdir().unwrap();

    scoresplit()
        .arg("preview")
        .arg(dir.path().join("nope.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn test_preview_records_escape_multiline_names() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "names.csv", "Name,Math,Art,Total\n\"Ann\nLee\",,,50\n");

    let output = scoresplit()
        .args(["--format", "records", "preview"])
        .arg(&roster)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"S "Ann\nLee" total=50"#));
    // header, one student line, two score lines
    assert_eq!(stdout.lines().count(), 4);
}
