//! Error types and exit codes for scoresplit
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including internal invariant violations)
//! - 2: Usage error (bad flags/args, invalid allocation arguments)
//! - 3: Data error (unreadable roster, infeasible totals)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the scoresplit binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad roster, infeasible totals (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during scoresplit operations
#[derive(Error, Debug)]
pub enum ScoreSplitError {
    // Usage errors (exit code 2)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("total {total} is too small: at least {required} is needed to give every subject its minimum")]
    InfeasibleRequest { total: i64, required: i64 },

    #[error("no total column found in {path:?} (looked for: {searched})")]
    MissingTotalColumn { path: PathBuf, searched: String },

    #[error("invalid total for student {student}: {value:?} (expected a positive integer)")]
    InvalidTotal { student: String, value: String },

    #[error("invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("student {student}: {source}")]
    StudentFailed {
        student: String,
        #[source]
        source: Box<ScoreSplitError>,
    },

    // Generic failures (exit code 1)
    #[error("allocation failed: scores sum to {actual}, expected {expected}")]
    AllocationInvariantViolated { expected: i64, actual: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl ScoreSplitError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl std::fmt::Display) -> Self {
        ScoreSplitError::InvalidArgument(message.to_string())
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        ScoreSplitError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an invalid-roster error
    pub fn invalid_roster(reason: impl Into<String>) -> Self {
        ScoreSplitError::InvalidRoster {
            reason: reason.into(),
        }
    }

    /// Attach the student this error happened for
    pub fn for_student(self, student: impl Into<String>) -> Self {
        ScoreSplitError::StudentFailed {
            student: student.into(),
            source: Box::new(self),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ScoreSplitError::InvalidArgument(_)
            | ScoreSplitError::UnknownFormat(_)
            | ScoreSplitError::UsageError(_) => ExitCode::Usage,

            ScoreSplitError::InfeasibleRequest { .. }
            | ScoreSplitError::MissingTotalColumn { .. }
            | ScoreSplitError::InvalidTotal { .. }
            | ScoreSplitError::InvalidRoster { .. } => ExitCode::Data,

            ScoreSplitError::StudentFailed { source, .. } => source.exit_code(),

            ScoreSplitError::AllocationInvariantViolated { .. }
            | ScoreSplitError::Io(_)
            | ScoreSplitError::Json(_)
            | ScoreSplitError::Toml(_)
            | ScoreSplitError::FailedOperationWithTarget { .. }
            | ScoreSplitError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ScoreSplitError::InvalidArgument(_) => "invalid_argument",
            ScoreSplitError::UnknownFormat(_) => "unknown_format",
            ScoreSplitError::UsageError(_) => "usage_error",
            ScoreSplitError::InfeasibleRequest { .. } => "infeasible_request",
            ScoreSplitError::MissingTotalColumn { .. } => "missing_total_column",
            ScoreSplitError::InvalidTotal { .. } => "invalid_total",
            ScoreSplitError::InvalidRoster { .. } => "invalid_roster",
            ScoreSplitError::StudentFailed { source, .. } => source.error_type(),
            ScoreSplitError::AllocationInvariantViolated { .. } => {
                "allocation_invariant_violated"
            }
            ScoreSplitError::Io(_) => "io_error",
            ScoreSplitError::Json(_) => "json_error",
            ScoreSplitError::Toml(_) => "toml_error",
            ScoreSplitError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            ScoreSplitError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let ScoreSplitError::StudentFailed { student, .. } = self {
            error_obj["student"] = serde_json::json!(student);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for scoresplit operations
pub type Result<T> = std::result::Result<T, ScoreSplitError>;
