//! Sampled field norm over the domain and its uniformity map

use serde::Serialize;

use crate::domain::{Center, SimulationDomain};
use crate::error::{HomogeneityError, Result};
use crate::field::FieldEvaluator;

/// Field norm sampled on a regular grid covering the domain.
///
/// Row-major: `ny` rows of `nz` values, row `j` at `y = linspace(y_min, y_max)[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormField {
    pub nz: usize,
    pub ny: usize,
    pub values: Vec<f64>,
}

/// `n` evenly spaced values from `start` to `end`, both included
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

impl NormField {
    /// Sample `norm(coils, |y|, z)` on an `nz` x `ny` grid
    pub fn sample<E: FieldEvaluator>(
        domain: &SimulationDomain,
        evaluator: &E,
        nz: usize,
        ny: usize,
    ) -> Result<Self> {
        let zs = linspace(domain.z_min, domain.z_max, nz);
        let ys = linspace(domain.y_min, domain.y_max, ny);

        let mut values = Vec::with_capacity(nz * ny);
        for &y in &ys {
            for &z in &zs {
                values.push(evaluator.norm(&domain.coils, y.abs(), z, domain.mu0)?);
            }
        }

        tracing::debug!("Sampled norm field: {}x{} points", nz, ny);
        Ok(Self { nz, ny, values })
    }

    /// Wrap a field sampled elsewhere
    pub fn from_values(nz: usize, ny: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != nz * ny {
            return Err(HomogeneityError::InvalidSetup(format!(
                "norm field of {}x{} needs {} samples, got {}",
                nz,
                ny,
                nz * ny,
                values.len()
            )));
        }
        Ok(Self { nz, ny, values })
    }
}

/// Per-sample uniformity relative to the domain center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformityGrid {
    pub center: Center,
    pub nz: usize,
    pub ny: usize,
    pub values: Vec<f64>,
}

impl UniformityGrid {
    pub fn compute<E: FieldEvaluator>(
        domain: &SimulationDomain,
        norm: &NormField,
        evaluator: &E,
    ) -> Result<Self> {
        let center = domain.center();
        let values = evaluator.uniformity(&domain.coils, &norm.values, domain.mu0, center)?;

        Ok(Self {
            center,
            nz: norm.nz,
            ny: norm.ny,
            values,
        })
    }

    /// `1` where uniformity reaches `threshold` (a fraction), `0` elsewhere
    pub fn mask(&self, threshold: f64) -> Vec<u8> {
        self.values
            .iter()
            .map(|&u| if u >= threshold { 1 } else { 0 })
            .collect()
    }

    /// Mask as text, one line per row, top row at `y_max`
    pub fn mask_to_text(&self, threshold: f64) -> String {
        let mask = self.mask(threshold);
        let mut out = String::with_capacity((self.nz + 1) * self.ny);

        for row in mask.chunks(self.nz.max(1)).rev() {
            out.extend(row.iter().map(|&m| if m == 1 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BiotSavart, Coil};

    #[test]
    fn test_linspace_endpoints() {
        let line = linspace(-1.0, 1.0, 5);
        assert_eq!(line, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_uniformity_grid_peaks_at_center() {
        let coils = Coil::helmholtz_pair(0.2, 1.0, 100.0);
        let domain = SimulationDomain::new(-0.125, 0.125, -0.125, 0.125, coils);
        let evaluator = BiotSavart::default();

        let norm = NormField::sample(&domain, &evaluator, 5, 5).unwrap();
        let grid = UniformityGrid::compute(&domain, &norm, &evaluator).unwrap();

        assert_eq!(grid.values.len(), 25);
        // Odd grid: the middle sample sits exactly on the center
        assert_eq!(grid.values[2 * 5 + 2], 1.0);
        assert!(grid.values.iter().all(|&u| u <= 1.0));
    }

    #[test]
    fn test_mask_threshold_is_inclusive() {
        let grid = UniformityGrid {
            center: Center { z: 0.0, y: 0.0 },
            nz: 2,
            ny: 2,
            values: vec![1.0, 0.97, 0.969, 0.5],
        };

        assert_eq!(grid.mask(0.97), vec![1, 1, 0, 0]);
        assert_eq!(grid.mask_to_text(0.97), "..\n##\n");
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        assert!(NormField::from_values(3, 3, vec![0.0; 8]).is_err());
        assert!(NormField::from_values(3, 3, vec![0.0; 9]).is_ok());
    }
}
