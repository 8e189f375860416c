//! Bisection search for the largest homogeneous square
//!
//! The tested square is centered on the coordinate origin while uniformity is
//! measured against the domain midpoint. Both coincide for symmetric domains.

use crate::domain::{Center, SimulationDomain};
use crate::field::{FieldError, FieldEvaluator};
use crate::grid::linspace;

/// Stop once the bracket is this narrow (m)
pub const TOLERANCE: f64 = 1e-5;

/// Samples per square edge
pub const EDGE_SAMPLES: usize = 20;

/// Boundary of the square `[-mid, mid]²` as `(z, y)` pairs.
///
/// Edges come in the order top, bottom, left, right. Each edge includes both
/// corners, so every corner appears twice.
pub fn boundary_points(mid: f64) -> Vec<(f64, f64)> {
    let line = linspace(-mid, mid, EDGE_SAMPLES);

    let up = line.iter().map(|&z| (z, mid));
    let down = line.iter().map(|&z| (z, -mid));
    let left = line.iter().map(|&y| (-mid, y));
    let right = line.iter().map(|&y| (mid, y));

    up.chain(down).chain(left).chain(right).collect()
}

/// True when some boundary sample of the square falls below `threshold`
fn square_too_large<E: FieldEvaluator>(
    domain: &SimulationDomain,
    center: Center,
    threshold: f64,
    mid: f64,
    evaluator: &E,
) -> Result<bool, FieldError> {
    for (z, y) in boundary_points(mid) {
        // Axial symmetry: only the radial distance matters
        let val = evaluator.norm(&domain.coils, y.abs(), z, domain.mu0)?;
        let u = evaluator.uniformity(&domain.coils, &[val], domain.mu0, center)?;
        if u.iter().any(|&u| u < threshold) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Half-width of the largest origin-centered square whose boundary keeps
/// uniformity at or above `threshold` (a fraction in `(0, 1]`).
///
/// Assumes uniformity does not increase as the square grows. Returns `0` for a
/// domain of zero extent.
pub fn max_homogeneous_half_width<E: FieldEvaluator>(
    domain: &SimulationDomain,
    center: Center,
    threshold: f64,
    evaluator: &E,
) -> Result<f64, FieldError> {
    let mut low = 0.0_f64;
    let mut high = domain.max_abs_bound();
    let mut mid = (low + high) * 0.5;
    let mut iterations = 0usize;

    while (high - low).abs() > TOLERANCE {
        if square_too_large(domain, center, threshold, mid, evaluator)? {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) * 0.5;
        iterations += 1;

        tracing::debug!(iterations, low, high, "bisection step");
    }

    tracing::debug!("Homogeneous half-width {:.6} after {} iterations", mid, iterations);
    Ok(mid)
}
