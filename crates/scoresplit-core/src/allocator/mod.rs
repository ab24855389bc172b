//! Score allocation
//!
//! Splits an integer total across ordered subjects so that the parts sum
//! exactly to the total, stay within per-subject bounds, roughly follow
//! the subject weights, and carry bounded Gaussian noise.
//!
//! Pipeline: proportions -> real targets -> noise -> clamp -> round (half
//! away from zero) -> repair. Both modes share that pipeline but differ in
//! feasibility policy and repair policy:
//!
//! | mode              | out-of-range total        | repair         | sum mismatch |
//! |-------------------|---------------------------|----------------|--------------|
//! | weighted fraction | `InfeasibleRequest`       | random probe   | error        |
//! | absolute cap      | clamped into range        | back to front  | best effort  |

pub mod noise;
pub mod repair;
pub mod types;


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{Result, ScoreSplitError};
pub use repair::{Bounds, RepairPolicy, RepairReport, MAX_REPAIR_ITERATIONS};
pub use types::{
    Allocation, AllocationMode, AllocationRequest, SubjectScore, DEFAULT_RANDOMNESS, WEIGHT_FLOOR,
};

use types::weighted_cap;

/// Allocate with a generator built for this call.
///
/// A `Some` seed gives a reproducible result for identical inputs; `None`
/// seeds from system entropy.
pub fn allocate(request: &AllocationRequest) -> Result<Allocation> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    allocate_with_rng(request, &mut rng)
}

/// Allocate drawing from a caller-owned generator. `request.seed` is ignored.
pub fn allocate_with_rng<R: Rng + ?Sized>(
    request: &AllocationRequest,
    rng: &mut R,
) -> Result<Allocation> {
    request.validate()?;

    match &request.mode {
        AllocationMode::WeightedFraction {
            weights,
            max_each_fraction,
        } => allocate_weighted(request, weights, *max_each_fraction, rng),
        AllocationMode::AbsoluteCap { max_scores } => allocate_capped(request, max_scores, rng),
    }
}

fn allocate_weighted<R: Rng + ?Sized>(
    request: &AllocationRequest,
    weights: &[f64],
    max_each_fraction: f64,
    rng: &mut R,
) -> Result<Allocation> {
    let n = request.subjects.len();
    let total = request.total_score;
    let min_each = request.min_each;

    let required = n as i64 * min_each;
    if total < required {
        return Err(ScoreSplitError::InfeasibleRequest { total, required });
    }

    let floored: Vec<f64> = if weights.is_empty() {
        vec![1.0; n]
    } else {
        weights.iter().map(|w| w.max(WEIGHT_FLOOR)).collect()
    };
    let proportions = normalize(&floored);

    let cap = weighted_cap(total, max_each_fraction, min_each);
    let bounds = Bounds::uniform(min_each, cap, n);

    debug!(
        subjects = n,
        total,
        min_each,
        cap,
        randomness = request.randomness,
        "weighted_allocation"
    );

    let mut values = noisy_initial(total, &proportions, &bounds, request.randomness, rng);
    let report = repair::repair(&mut values, total, &bounds, RepairPolicy::RandomProbe, rng);
    spread_identical(&mut values, &bounds, rng);

    let actual: i64 = values.iter().sum();
    if actual != total {
        return Err(ScoreSplitError::AllocationInvariantViolated {
            expected: total,
            actual,
        });
    }

    Ok(Allocation::new(&request.subjects, values, total, report))
}

fn allocate_capped<R: Rng + ?Sized>(
    request: &AllocationRequest,
    max_scores: &[i64],
    rng: &mut R,
) -> Result<Allocation> {
    let n = request.subjects.len();
    let min_each = request.min_each;

    if request.total_score <= 0 {
        return Ok(Allocation::new(
            &request.subjects,
            vec![0; n],
            0,
            RepairReport::default(),
        ));
    }

    let paper_max = max_scores
        .iter()
        .fold(0i64, |acc, &m| acc.saturating_add(m));
    let required = n as i64 * min_each;

    let mut effective = request.total_score;
    if effective > paper_max {
        debug!(total = effective, paper_max, "clamp_total_to_paper_max");
        effective = paper_max;
    }
    if effective < required {
        debug!(total = effective, required, "raise_total_to_floors");
        effective = required;
    }

    let cap_sum = paper_max.max(1) as f64;
    let proportions: Vec<f64> = max_scores.iter().map(|&m| m as f64 / cap_sum).collect();
    let bounds = Bounds::new(min_each, max_scores.to_vec());

    debug!(
        subjects = n,
        total = request.total_score,
        effective,
        paper_max,
        min_each,
        randomness = request.randomness,
        "capped_allocation"
    );

    let mut values = noisy_initial(effective, &proportions, &bounds, request.randomness, rng);
    let report = repair::repair(&mut values, effective, &bounds, RepairPolicy::BackToFront, rng);

    if !report.converged() {
        warn!(
            effective,
            residual = report.residual,
            hit_iteration_cap = report.hit_iteration_cap,
            "allocation does not reach the effective total"
        );
    }

    Ok(Allocation::new(&request.subjects, values, effective, report))
}

fn normalize(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| w / sum).collect()
}

/// Targets plus one Gaussian sample per subject, in subject order, clamped
/// and rounded half away from zero.
fn noisy_initial<R: Rng + ?Sized>(
    total: i64,
    proportions: &[f64],
    bounds: &Bounds,
    randomness: f64,
    rng: &mut R,
) -> Vec<i64> {
    let sigma = randomness * total as f64 / (proportions.len() as f64).sqrt();

    proportions
        .iter()
        .zip(&bounds.caps)
        .map(|(p, &cap)| {
            let noisy = total as f64 * p + noise::gaussian(rng, 0.0, sigma);
            // max after min: a cap below the floor resolves to the floor
            let clamped = noisy.min(cap as f64).max(bounds.floor as f64);
            // f64 cannot hold every i64, so clamp again after the cast
            (clamped.round() as i64).min(cap).max(bounds.floor)
        })
        .collect()
}

/// Nudge one unit between neighbours when every subject got the same score.
fn spread_identical<R: Rng + ?Sized>(values: &mut [i64], bounds: &Bounds, rng: &mut R) {
    let n = values.len();
    if n < 2 || values.iter().any(|&v| v != values[0]) {
        return;
    }

    let donor = rng.gen_range(0..n);
    let receiver = (donor + 1) % n;
    if values[donor] > bounds.floor && values[receiver] < bounds.caps[receiver] {
        values[donor] -= 1;
        values[receiver] += 1;
    }
}
