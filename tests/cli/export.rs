use crate::cli::support::{
    read_csv_rows, scoresplit, stdout_json, write_roster, CAPPED_ROSTER, WEIGHTED_ROSTER,
};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Export command tests
// ============================================================================

#[test]
fn test_export_default_path() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .arg("export")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 students"))
        .stdout(predicate::str::contains("class_allocated.csv"));

    let rows = read_csv_rows(&dir.path().join("class_allocated.csv"));
    assert_eq!(rows[0], vec!["Name", "语文", "数学", "英语", "Total"]);
    assert_eq!(rows.len(), 4);

    for (row, total) in rows[1..].iter().zip([250, 180, 90]) {
        let scores: Vec<i64> = row[1..4].iter().map(|c| c.parse().unwrap()).collect();
        assert_eq!(scores.iter().sum::<i64>(), total);
        assert_eq!(row[4], total.to_string());
    }
}

#[test]
fn test_export_explicit_output() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "capped.csv", CAPPED_ROSTER);
    let out = dir.path().join("out").with_extension("csv");

    let output = scoresplit()
        .args(["--format", "json", "export"])
        .arg(&roster)
        .arg("--output")
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["students"], 2);
    assert_eq!(json["output"], out.display().to_string());

    let rows = read_csv_rows(&out);
    assert_eq!(rows[1][0], "Dave");
    assert_eq!(rows[2][0], "Erin");
    assert_eq!(rows[2][4], "420");
}

#[test]
fn test_export_quiet_suppresses_message() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .arg("--quiet")
        .arg("export")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("class_allocated.csv").exists());
}

#[test]
fn test_export_refuses_to_overwrite_input() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .arg("export")
        .arg(&roster)
        .arg("--output")
        .arg(&roster)
        .assert()
        .code(2);
}

#[test]
fn test_export_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "tight.csv", "Name,A,B,C,Total\nAlice,,,,30\nBob,,,,2\n");

    scoresplit().arg("export").arg(&roster).assert().code(3);

    assert!(!dir.path().join("tight_allocated.csv").exists());
}

#[test]
fn test_export_records_header() {
    let dir = tempdir().unwrap();
    let roster = write_roster(&dir, "class.csv", WEIGHTED_ROSTER);

    scoresplit()
        .args(["--format", "records", "export"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H scoresplit=1 mode=export students=3 output=",
        ));
}

#[test]
fn test_export_keeps_quoted_names() {
    let dir = tempdir().unwrap();
    let roster = write_roster(
        &dir,
        "quoted.csv",
        "\u{feff}Name,Math(60%),Art(40%),Total\r\n\"Li, Wei\",,,80\r\n\"Jo \"\"JJ\"\"\",,,60\r\n",
    );

    scoresplit().arg("export").arg(&roster).assert().success();

    let written = std::fs::read_to_string(dir.path().join("quoted_allocated.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Name,Math,Art,Total");
    assert!(lines[1].starts_with("\"Li, Wei\","));
    assert!(lines[1].ends_with(",80"));
    assert!(lines[2].starts_with("\"Jo \"\"JJ\"\"\","));
}
