//! Utilities for records output format
//!
//! Every line starts with a one-letter tag:
//! - `H` header with counts
//! - `S` one student
//! - `A` one subject score for the preceding student (or the single allocation)
//! - `W` warning, e.g. a total that could not be met exactly

/// Records format version written in every header line
pub const RECORDS_VERSION: u32 = 1;

/// Escape a string for a quoted records field.
///
/// Backslashes, double quotes and line breaks are backslash-escaped so every
/// record stays on one line.
pub fn escape_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Format the header line
pub fn format_header(mode: &str, fields: &[(&str, String)]) -> String {
    let mut line = format!("H scoresplit={} mode={}", RECORDS_VERSION, mode);
    for (key, value) in fields {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

/// Format a student line
pub fn format_student_record(name: &str, total: i64, effective: i64, checksum: i64) -> String {
    format!(
        "S \"{}\" total={} effective={} checksum={}",
        escape_quotes(name),
        total,
        effective,
        checksum
    )
}

/// Format a subject score line
pub fn format_score_record(subject: &str, score: i64) -> String {
    format!("A \"{}\" score={}", escape_quotes(subject), score)
}

/// Format a warning line
pub fn format_warning_record(message: &str) -> String {
    format!("W \"{}\"", escape_quotes(message))
}
