//! Allocate every student on a roster

use std::time::Instant;

use serde::Serialize;

use crate::allocator::{self, Allocation, AllocationRequest};
use crate::error::Result;
use crate::roster::Roster;
use crate::seed::SeedPolicy;
use crate::trace_time;

/// Tuning shared by every student in a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    pub min_each: i64,
    pub max_each_fraction: f64,
    pub randomness: f64,
    /// Ignored for rosters with absolute max scores
    pub use_weights: bool,
    pub seed_policy: SeedPolicy,
}

/// One student's generated scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAllocation {
    pub name: String,
    pub total: i64,
    pub seed: Option<u64>,
    pub allocation: Allocation,
    /// Recomputed sum of the generated scores
    pub checksum: i64,
}

/// Allocate each student in roster order.
///
/// Stops at the first failing student; the error names that student.
pub fn allocate_roster(roster: &Roster, options: &BatchOptions) -> Result<Vec<StudentAllocation>> {
    let start = Instant::now();
    let subjects = roster.subject_names();
    let mode = roster.mode(options.use_weights, options.max_each_fraction);
    tracing::debug!(
        students = roster.students.len(),
        mode = mode.name(),
        seed_policy = %options.seed_policy,
        reproducible = options.seed_policy.is_deterministic(),
        "allocate_roster"
    );

    let results = roster
        .students
        .iter()
        .enumerate()
        .map(|(row, student)| {
            let seed = options.seed_policy.seed_for(row, student.total);
            let request = AllocationRequest {
                total_score: student.total,
                subjects: subjects.clone(),
                min_each: options.min_each,
                mode: mode.clone(),
                randomness: options.randomness,
                seed,
            };
            let allocation =
                allocator::allocate(&request).map_err(|e| e.for_student(&student.name))?;
            let checksum = allocation.sum();

            Ok(StudentAllocation {
                name: student.name.clone(),
                total: student.total,
                seed,
                allocation,
                checksum,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    trace_time!(start, "allocate_roster", students = results.len());
    Ok(results)
}
