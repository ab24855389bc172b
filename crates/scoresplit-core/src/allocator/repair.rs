//! Sum-correction after rounding
//!
//! Rounding each noisy target independently rarely lands on the exact
//! total. Repair walks the vector one unit at a time until the sum matches,
//! never pushing an entry outside `[floor, cap_i]`.

use rand::Rng;
use serde::Serialize;

/// Upper bound on unit moves for a single repair call
pub const MAX_REPAIR_ITERATIONS: u64 = 100_000;

/// Random probes per required unit, multiplied by the subject count
pub const PROBES_PER_SUBJECT: usize = 5;

/// Which subject absorbs each unit of correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPolicy {
    /// Probe uniformly random subjects (up to `5 * n` tries per unit), then
    /// fall back to the first eligible subject in order.
    RandomProbe,
    /// Take the last eligible subject, scanning from the end each time.
    BackToFront,
}

/// Per-index bounds: a shared floor and individual caps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub floor: i64,
    pub caps: Vec<i64>,
}

impl Bounds {
    pub fn new(floor: i64, caps: Vec<i64>) -> Self {
        Self { floor, caps }
    }

    /// Same cap for every subject
    pub fn uniform(floor: i64, cap: i64, n: usize) -> Self {
        Self {
            floor,
            caps: vec![cap; n],
        }
    }

    /// Whether `values[i]` may move one unit in the direction of `step`
    fn can_move(&self, values: &[i64], i: usize, step: i64) -> bool {
        if step > 0 {
            values[i] < self.caps[i]
        } else {
            values[i] > self.floor
        }
    }
}

/// What a repair pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RepairReport {
    /// Unit adjustments applied
    pub moves: u64,
    /// `target - sum` left over; zero on success
    pub residual: i64,
    /// Correction rounds attempted
    pub iterations: u64,
    pub hit_iteration_cap: bool,
}

impl RepairReport {
    pub fn converged(&self) -> bool {
        self.residual == 0
    }
}

/// Adjust `values` toward summing to `target` under `bounds`.
pub fn repair<R: Rng + ?Sized>(
    values: &mut [i64],
    target: i64,
    bounds: &Bounds,
    policy: RepairPolicy,
    rng: &mut R,
) -> RepairReport {
    repair_with_limit(values, target, bounds, policy, rng, MAX_REPAIR_ITERATIONS)
}

/// [`repair`] with an explicit iteration cap.
///
/// Stops early when no subject can move; the residual is reported rather
/// than treated as an error.
pub fn repair_with_limit<R: Rng + ?Sized>(
    values: &mut [i64],
    target: i64,
    bounds: &Bounds,
    policy: RepairPolicy,
    rng: &mut R,
    limit: u64,
) -> RepairReport {
    let diff = target - values.iter().sum::<i64>();
    if values.is_empty() || diff == 0 {
        return RepairReport {
            residual: diff,
            ..RepairReport::default()
        };
    }

    let mut report = match policy {
        RepairPolicy::RandomProbe => probe_random(values, diff, bounds, rng, limit),
        RepairPolicy::BackToFront => scan_back_to_front(values, diff, bounds, limit),
    };
    report.residual = target - values.iter().sum::<i64>();

    tracing::trace!(
        policy = ?policy,
        diff,
        moves = report.moves,
        residual = report.residual,
        hit_iteration_cap = report.hit_iteration_cap,
        "repair"
    );

    report
}

fn probe_random<R: Rng + ?Sized>(
    values: &mut [i64],
    diff: i64,
    bounds: &Bounds,
    rng: &mut R,
    limit: u64,
) -> RepairReport {
    let n = values.len();
    let step = diff.signum();
    let mut report = RepairReport::default();

    for _ in 0..diff.unsigned_abs() {
        if report.iterations >= limit {
            report.hit_iteration_cap = true;
            break;
        }
        report.iterations += 1;

        let chosen = {
            let current: &[i64] = values;
            (0..PROBES_PER_SUBJECT * n)
                .map(|_| rng.gen_range(0..n))
                .find(|&i| bounds.can_move(current, i, step))
                .or_else(|| (0..n).find(|&i| bounds.can_move(current, i, step)))
        };

        match chosen {
            Some(i) => {
                values[i] += step;
                report.moves += 1;
            }
            None => break,
        }
    }

    report
}

fn scan_back_to_front(values: &mut [i64], diff: i64, bounds: &Bounds, limit: u64) -> RepairReport {
    let mut remaining = diff;
    let mut report = RepairReport::default();

    while remaining != 0 {
        if report.iterations >= limit {
            report.hit_iteration_cap = true;
            break;
        }
        report.iterations += 1;

        let step = remaining.signum();
        let chosen = {
            let current: &[i64] = values;
            (0..current.len())
                .rev()
                .find(|&i| bounds.can_move(current, i, step))
        };
        match chosen {
            Some(i) => {
                values[i] += step;
                remaining -= step;
                report.moves += 1;
            }
            None => break,
        }
    }

    report
}
