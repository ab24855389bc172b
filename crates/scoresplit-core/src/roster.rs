//! Roster input: subjects and per-student totals from a CSV sheet
//!
//! Layout:
//! - Row 1 is the header; column 1 holds student names.
//! - One header cell names the total column (see [`DEFAULT_TOTAL_COLUMNS`]).
//! - Every other non-empty header cell is a subject:
//!   `Math(50%)` weighs 50, `Math[150]` caps at 150, plain `Math` weighs 1.
//!
//! Cells under subject columns are ignored; they are what gets generated.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use serde::Serialize;

use crate::allocator::AllocationMode;
use crate::bail_roster;
use crate::error::{Result, ScoreSplitError};

/// Header names recognised as the per-student total column
pub const DEFAULT_TOTAL_COLUMNS: &[&str] = &["Total", "Sum", "总分", "合计"];

/// How a subject column constrains its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectLimit {
    Weight(f64),
    MaxScore(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectColumn {
    pub name: String,
    pub limit: SubjectLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub name: String,
    pub total: i64,
    /// 1-based line in the source file
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub source: PathBuf,
    pub subjects: Vec<SubjectColumn>,
    pub students: Vec<Student>,
}

fn weight_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.+?)\s*\((\d+(?:\.\d+)?)%\)$").expect("weight pattern is valid")
    })
}

fn max_score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.+?)\s*\[(\d+)\]$").expect("max score pattern is valid"))
}

/// Interpret one subject header cell
pub fn parse_subject_header(cell: &str) -> Result<SubjectColumn> {
    let cell = cell.trim();

    if let Some(caps) = weight_pattern().captures(cell) {
        let weight = caps[2]
            .parse::<f64>()
            .map_err(|e| ScoreSplitError::invalid_roster(format!("bad weight in {:?}: {}", cell, e)))?;
        return Ok(SubjectColumn {
            name: caps[1].trim().to_string(),
            limit: SubjectLimit::Weight(weight),
        });
    }

    if let Some(caps) = max_score_pattern().captures(cell) {
        let max = caps[2].parse::<i64>().map_err(|e| {
            ScoreSplitError::invalid_roster(format!("bad max score in {:?}: {}", cell, e))
        })?;
        return Ok(SubjectColumn {
            name: caps[1].trim().to_string(),
            limit: SubjectLimit::MaxScore(max),
        });
    }

    Ok(SubjectColumn {
        name: cell.to_string(),
        limit: SubjectLimit::Weight(1.0),
    })
}

impl Roster {
    /// Read and parse a roster file
    pub fn load(path: &Path, total_columns: &[String]) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScoreSplitError::io_operation("read roster", path.display(), e))?;
        Self::parse(&content, path, total_columns)
    }

    /// Parse roster text; `source` is used for messages and export naming
    pub fn parse(content: &str, source: &Path, total_columns: &[String]) -> Result<Self> {
        let records = read_records(content, source)?;
        let Some((header, rows)) = records.split_first() else {
            bail_roster!("{} is empty", source.display());
        };

        let total_index = header
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, cell)| is_total_column(cell, total_columns))
            .map(|(i, _)| i)
            .ok_or_else(|| ScoreSplitError::MissingTotalColumn {
                path: source.to_path_buf(),
                searched: total_columns.join(", "),
            })?;

        let mut subjects: Vec<SubjectColumn> = Vec::new();
        for (i, cell) in header.iter().enumerate().skip(1) {
            if i == total_index || cell.trim().is_empty() {
                continue;
            }
            let subject = parse_subject_header(cell)?;
            if subject.name.is_empty() {
                bail_roster!("subject header {:?} has no name", cell);
            }
            if subjects.iter().any(|s| s.name == subject.name) {
                bail_roster!("duplicate subject {:?}", subject.name);
            }
            subjects.push(subject);
        }

        if subjects.is_empty() {
            bail_roster!("no subject columns in {}", source.display());
        }
        let capped = subjects
            .iter()
            .filter(|s| matches!(s.limit, SubjectLimit::MaxScore(_)))
            .count();
        if capped != 0 && capped != subjects.len() {
            bail_roster!("subjects mix max scores ([N]) with weights; use one kind for all subjects");
        }

        let mut students = Vec::new();
        for row in rows {
            let name = row.get(0).map(str::trim).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let raw_total = row.get(total_index).map(str::trim).unwrap_or_default();
            let total = match raw_total.parse::<i64>() {
                Ok(total) if total > 0 => total,
                _ => {
                    return Err(ScoreSplitError::InvalidTotal {
                        student: name.to_string(),
                        value: raw_total.to_string(),
                    })
                }
            };
            students.push(Student {
                name: name.to_string(),
                total,
                line: row.position().map_or(0, |p| p.line() as usize),
            });
        }

        tracing::debug!(
            source = %source.display(),
            subjects = subjects.len(),
            students = students.len(),
            "roster_loaded"
        );

        Ok(Self {
            source: source.to_path_buf(),
            subjects,
            students,
        })
    }

    pub fn subject_names(&self) -> Vec<String> {
        self.subjects.iter().map(|s| s.name.clone()).collect()
    }

    /// Whether subjects carry absolute max scores rather than weights
    pub fn is_capped(&self) -> bool {
        self.subjects
            .iter()
            .all(|s| matches!(s.limit, SubjectLimit::MaxScore(_)))
    }

    /// Allocation mode for this roster.
    ///
    /// `use_weights = false` treats every weighted subject equally; it has
    /// no effect on capped rosters.
    pub fn mode(&self, use_weights: bool, max_each_fraction: f64) -> AllocationMode {
        if self.is_capped() {
            let max_scores = self
                .subjects
                .iter()
                .map(|s| match s.limit {
                    SubjectLimit::MaxScore(max) => max,
                    SubjectLimit::Weight(_) => 0,
                })
                .collect();
            return AllocationMode::AbsoluteCap { max_scores };
        }

        let weights = self
            .subjects
            .iter()
            .map(|s| match (use_weights, s.limit) {
                (true, SubjectLimit::Weight(w)) => w,
                _ => 1.0,
            })
            .collect();
        AllocationMode::WeightedFraction {
            weights,
            max_each_fraction,
        }
    }
}

/// Parse CSV text into records, dropping rows whose cells are all blank.
/// Rows may have differing lengths.
fn read_records(content: &str, source: &Path) -> Result<Vec<StringRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            ScoreSplitError::invalid_roster(format!("{}: {}", source.display(), e))
        })?;
        if record.iter().any(|cell| !cell.trim().is_empty()) {
            records.push(record);
        }
    }
    Ok(records)
}

fn is_total_column(cell: &str, total_columns: &[String]) -> bool {
    let cell = cell.trim();
    total_columns
        .iter()
        .any(|name| name.trim().eq_ignore_ascii_case(cell))
}

/// Default total column names as owned strings
pub fn default_total_columns() -> Vec<String> {
    DEFAULT_TOTAL_COLUMNS.iter().map(|s| s.to_string()).collect()
}
