//! Allocation request and result types

use serde::{Deserialize, Serialize};

use super::repair::RepairReport;
use crate::bail_invalid;
use crate::error::Result;

/// Default noise intensity, as a fraction of the total per sqrt(subject)
pub const DEFAULT_RANDOMNESS: f64 = 0.25;

/// Weights at or below zero are lifted to this so no subject is excluded
pub const WEIGHT_FLOOR: f64 = 1e-4;

/// How per-subject caps and proportions are derived.
///
/// A run uses exactly one mode for all subjects. The two modes also differ
/// in how they treat out-of-range totals: weighted-fraction rejects a total
/// that cannot cover the floors, absolute-cap clamps the total into range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AllocationMode {
    /// Relative weights with a shared cap of `floor(total * max_each_fraction)`.
    ///
    /// An empty `weights` vector means every subject weighs the same.
    WeightedFraction {
        weights: Vec<f64>,
        max_each_fraction: f64,
    },
    /// Absolute per-subject maximum scores, used directly as caps.
    AbsoluteCap { max_scores: Vec<i64> },
}

impl AllocationMode {
    /// Short identifier used in logs and structured output
    pub fn name(&self) -> &'static str {
        match self {
            AllocationMode::WeightedFraction { .. } => "weighted_fraction",
            AllocationMode::AbsoluteCap { .. } => "absolute_cap",
        }
    }
}

/// Everything the allocator needs for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRequest {
    pub total_score: i64,
    /// Ordered, distinct subject names. Order drives noise assignment and
    /// repair tie-breaking.
    pub subjects: Vec<String>,
    pub min_each: i64,
    pub mode: AllocationMode,
    pub randomness: f64,
    /// `None` draws from system entropy
    pub seed: Option<u64>,
}

impl AllocationRequest {
    /// Build a weighted-fraction request with default randomness and no seed
    pub fn weighted(
        total_score: i64,
        subjects: Vec<String>,
        weights: Vec<f64>,
        min_each: i64,
        max_each_fraction: f64,
    ) -> Self {
        Self {
            total_score,
            subjects,
            min_each,
            mode: AllocationMode::WeightedFraction {
                weights,
                max_each_fraction,
            },
            randomness: DEFAULT_RANDOMNESS,
            seed: None,
        }
    }

    /// Build an absolute-cap request with default randomness and no seed
    pub fn absolute_cap(
        total_score: i64,
        subjects: Vec<String>,
        max_scores: Vec<i64>,
        min_each: i64,
    ) -> Self {
        Self {
            total_score,
            subjects,
            min_each,
            mode: AllocationMode::AbsoluteCap { max_scores },
            randomness: DEFAULT_RANDOMNESS,
            seed: None,
        }
    }

    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check argument shape. Feasibility of the total is mode-specific and
    /// handled by the allocator itself.
    pub fn validate(&self) -> Result<()> {
        let n = self.subjects.len();
        if n == 0 {
            bail_invalid!("subject list is empty");
        }
        for (i, subject) in self.subjects.iter().enumerate() {
            if self.subjects[..i].contains(subject) {
                bail_invalid!("duplicate subject name {:?}", subject);
            }
        }
        validate_min_each(self.min_each)?;
        validate_randomness(self.randomness)?;
        if (n as i64).checked_mul(self.min_each).is_none() {
            bail_invalid!("min_each {} overflows across {} subjects", self.min_each, n);
        }

        match &self.mode {
            AllocationMode::WeightedFraction {
                weights,
                max_each_fraction,
            } => {
                if !weights.is_empty() && weights.len() != n {
                    bail_invalid!("{} weights given for {} subjects", weights.len(), n);
                }
                if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
                    bail_invalid!("weight {} must be a finite non-negative number", w);
                }
                validate_max_each_fraction(*max_each_fraction)?;
                let cap = weighted_cap(self.total_score, *max_each_fraction, self.min_each);
                check_sum_range(n, cap)?;
            }
            AllocationMode::AbsoluteCap { max_scores } => {
                if max_scores.len() != n {
                    bail_invalid!("{} max scores given for {} subjects", max_scores.len(), n);
                }
                if let Some(m) = max_scores.iter().find(|m| **m < 0) {
                    bail_invalid!("max score {} must not be negative", m);
                }
                let largest = max_scores.iter().copied().max().unwrap_or(0);
                check_sum_range(n, largest.max(self.min_each))?;
            }
        }

        Ok(())
    }
}

/// Shared per-subject cap for weighted-fraction mode: `floor(total * fraction)`,
/// raised to `min_each + 1`.
pub(crate) fn weighted_cap(total: i64, max_each_fraction: f64, min_each: i64) -> i64 {
    ((total as f64 * max_each_fraction).floor() as i64)
        .min(total)
        .max(min_each.saturating_add(1))
}

/// Every score stays within `[0, per_subject]`, so `n` of them must sum
/// without overflowing.
fn check_sum_range(n: usize, per_subject: i64) -> Result<()> {
    if (n as i64).checked_mul(per_subject).is_none() {
        bail_invalid!(
            "scores up to {} across {} subjects exceed the supported range",
            per_subject,
            n
        );
    }
    Ok(())
}

pub(crate) fn validate_min_each(min_each: i64) -> Result<()> {
    if min_each < 0 {
        bail_invalid!("min_each must be >= 0, got {}", min_each);
    }
    Ok(())
}

pub(crate) fn validate_max_each_fraction(fraction: f64) -> Result<()> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        bail_invalid!("max_each_fraction must be in (0, 1], got {}", fraction);
    }
    Ok(())
}

pub(crate) fn validate_randomness(randomness: f64) -> Result<()> {
    if !randomness.is_finite() || randomness < 0.0 {
        bail_invalid!("randomness must be a finite number >= 0, got {}", randomness);
    }
    Ok(())
}

/// One subject's share of the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectScore {
    pub subject: String,
    pub score: i64,
}

/// Per-subject integer scores in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    scores: Vec<SubjectScore>,
    effective_total: i64,
    repair: RepairReport,
}

impl Allocation {
    pub(crate) fn new(
        subjects: &[String],
        values: Vec<i64>,
        effective_total: i64,
        repair: RepairReport,
    ) -> Self {
        let scores = subjects
            .iter()
            .zip(values)
            .map(|(subject, score)| SubjectScore {
                subject: subject.clone(),
                score,
            })
            .collect();
        Self {
            scores,
            effective_total,
            repair,
        }
    }

    /// Score for a subject by name
    pub fn get(&self, subject: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.score)
    }

    pub fn scores(&self) -> &[SubjectScore] {
        &self.scores
    }

    pub fn values(&self) -> Vec<i64> {
        self.scores.iter().map(|s| s.score).collect()
    }

    pub fn sum(&self) -> i64 {
        self.scores.iter().map(|s| s.score).sum()
    }

    /// Total actually distributed, after any clamping
    pub fn effective_total(&self) -> i64 {
        self.effective_total
    }

    pub fn repair(&self) -> &RepairReport {
        &self.repair
    }

    /// Whether the scores add up to the effective total
    pub fn is_exact(&self) -> bool {
        self.sum() == self.effective_total
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
