//! Rendering allocations for output and export
//!
//! Renderers only read allocations; they never recompute or adjust scores.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::allocator::{Allocation, AllocationMode};
use crate::batch::StudentAllocation;
use crate::error::{Result, ScoreSplitError};
use crate::format::OutputFormat;
use crate::records::{
    format_header, format_score_record, format_student_record, format_warning_record,
};

/// Suffix added to the input file stem for exports
pub const EXPORT_SUFFIX: &str = "_allocated";

/// Render a batch of student allocations
pub fn render_batch(
    format: OutputFormat,
    subjects: &[String],
    results: &[StudentAllocation],
) -> String {
    match format {
        OutputFormat::Human => render_table(subjects, results),
        OutputFormat::Json => {
            let mut out = batch_to_json(subjects, results).to_string();
            out.push('\n');
            out
        }
        OutputFormat::Records => render_batch_records(subjects, results),
    }
}

/// Render a single allocation
pub fn render_allocation(
    format: OutputFormat,
    total: i64,
    mode: &AllocationMode,
    seed: Option<u64>,
    allocation: &Allocation,
) -> String {
    match format {
        OutputFormat::Human => {
            let width = allocation
                .scores()
                .iter()
                .map(|s| display_width(&s.subject))
                .chain(std::iter::once("Total".len()))
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for score in allocation.scores() {
                out.push_str(&format!(
                    "{}  {:>6}\n",
                    pad_right(&score.subject, width),
                    score.score
                ));
            }
            out.push_str(&format!("{}  {:>6}\n", pad_right("Total", width), allocation.sum()));
            if allocation.effective_total() != total {
                out.push_str(&format!(
                    "note: total {} adjusted to {}\n",
                    total,
                    allocation.effective_total()
                ));
            }
            out
        }
        OutputFormat::Json => {
            let mut out = json!({
                "total": total,
                "effective_total": allocation.effective_total(),
                "mode": mode.name(),
                "seed": seed,
                "scores": scores_json(allocation),
                "checksum": allocation.sum(),
                "repair": allocation.repair(),
            })
            .to_string();
            out.push('\n');
            out
        }
        OutputFormat::Records => {
            let mut lines = vec![format_header(
                "allocate",
                &[
                    ("subjects", allocation.len().to_string()),
                    ("total", total.to_string()),
                    ("effective", allocation.effective_total().to_string()),
                    ("checksum", allocation.sum().to_string()),
                ],
            )];
            lines.extend(
                allocation
                    .scores()
                    .iter()
                    .map(|s| format_score_record(&s.subject, s.score)),
            );
            if !allocation.is_exact() {
                lines.push(format_warning_record("scores do not sum to the effective total"));
            }
            lines.join("\n") + "\n"
        }
    }
}

fn scores_json(allocation: &Allocation) -> Value {
    Value::Array(
        allocation
            .scores()
            .iter()
            .map(|s| json!({ "subject": s.subject, "score": s.score }))
            .collect(),
    )
}

/// JSON document for a batch
pub fn batch_to_json(subjects: &[String], results: &[StudentAllocation]) -> Value {
    let students: Vec<Value> = results
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "total": r.total,
                "effective_total": r.allocation.effective_total(),
                "seed": r.seed,
                "scores": scores_json(&r.allocation),
                "checksum": r.checksum,
            })
        })
        .collect();

    json!({
        "subjects": subjects,
        "students": students,
    })
}

fn render_batch_records(subjects: &[String], results: &[StudentAllocation]) -> String {
    let mut lines = vec![format_header(
        "batch",
        &[
            ("subjects", subjects.len().to_string()),
            ("students", results.len().to_string()),
        ],
    )];
    for r in results {
        lines.push(format_student_record(
            &r.name,
            r.total,
            r.allocation.effective_total(),
            r.checksum,
        ));
        lines.extend(
            r.allocation
                .scores()
                .iter()
                .map(|s| format_score_record(&s.subject, s.score)),
        );
    }
    lines.join("\n") + "\n"
}

/// Table rows: header then one row per student, checksum last
fn table_rows(subjects: &[String], results: &[StudentAllocation]) -> Vec<Vec<String>> {
    let mut header = vec!["Name".to_string()];
    header.extend(subjects.iter().cloned());
    header.push("Total".to_string());

    let mut rows = vec![header];
    for r in results {
        let mut row = vec![r.name.clone()];
        row.extend(r.allocation.values().iter().map(|v| v.to_string()));
        row.push(r.checksum.to_string());
        rows.push(row);
    }
    rows
}

fn render_table(subjects: &[String], results: &[StudentAllocation]) -> String {
    if results.is_empty() {
        return "No students found\n".to_string();
    }

    let rows = table_rows(subjects, results);
    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| {
            rows.iter()
                .map(|row| display_width(&row[col]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &width))| {
                if col == 0 || i == 0 {
                    pad_right(cell, width)
                } else {
                    pad_left(cell, width)
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Width in terminal columns, counting CJK characters as two
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F | 0x2E80..=0x303E | 0x3041..=0x33FF | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF | 0xA000..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(display_width(s))))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(display_width(s))), s)
}

/// Write a batch as CSV: `Name,<subjects...>,Total`
pub fn write_csv(path: &Path, subjects: &[String], results: &[StudentAllocation]) -> Result<()> {
    let write_error =
        |e: csv::Error| ScoreSplitError::io_operation("write export", path.display(), e);

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;
    for row in table_rows(subjects, results) {
        writer.write_record(&row).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|e| ScoreSplitError::io_operation("write export", path.display(), e))
}

/// `<dir>/<stem>_allocated.csv` next to the roster
pub fn default_export_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "roster".to_string());
    input.with_file_name(format!("{}{}.csv", stem, EXPORT_SUFFIX))
}
