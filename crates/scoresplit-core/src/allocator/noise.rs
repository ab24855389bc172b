//! Gaussian noise for score targets

use std::f64::consts::PI;

use rand::Rng;

/// Draw one normal sample with the Box-Muller transform.
///
/// Always consumes exactly two uniform draws, even when `std_dev` is zero,
/// so a seeded generator yields the same sequence regardless of the values.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // gen::<f64>() is in [0, 1); flip to (0, 1] so ln() stays finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = 1.0 - rng.gen::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + z0 * std_dev
}
