//! coil-homogeneity: locate the homogeneous field region of a coil arrangement
//!
//! This crate provides:
//! - Biot-Savart field norm for coaxial circular coils
//! - Uniformity map and thresholded mask over a sampled domain
//! - Bisection search for the largest homogeneous centered square
//! - Volume of revolution and field-at-center report
//!
//! Lengths are in meters and field values in millitesla.

pub mod domain;
pub mod error;
pub mod field;
pub mod grid;
pub mod report;
pub mod setup;
pub mod solver;

pub use domain::{Center, SimulationDomain, MU0};
pub use error::{HomogeneityError, Result};
pub use field::{BiotSavart, Coil, FieldError, FieldEvaluator};
pub use grid::{NormField, UniformityGrid};
pub use report::{RegionBounds, RegionReport};
pub use setup::{HelmholtzPreset, SetupFile};
pub use solver::max_homogeneous_half_width;

/// Configuration for an analysis session
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Homogeneity threshold in percent
    pub threshold_percent: f64,
    /// Norm field samples along z
    pub grid_nz: usize,
    /// Norm field samples along y
    pub grid_ny: usize,
    /// Straight segments per coil in the Biot-Savart sum
    pub segments: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 97.0,
            grid_nz: 101,
            grid_ny: 101,
            segments: 128,
        }
    }
}

/// Receives the clipped homogeneous rectangle for highlighting
pub trait RegionObserver {
    fn draw_rectangle(&mut self, z_min: f64, z_max: f64, y_min: f64, y_max: f64);
}

impl<F: FnMut(f64, f64, f64, f64)> RegionObserver for F {
    fn draw_rectangle(&mut self, z_min: f64, z_max: f64, y_min: f64, y_max: f64) {
        self(z_min, z_max, y_min, y_max)
    }
}

/// Check a percent threshold and convert it to a fraction
pub fn threshold_fraction(threshold_percent: f64) -> Result<f64> {
    if threshold_percent > 0.0 && threshold_percent <= 100.0 {
        Ok(threshold_percent / 100.0)
    } else {
        Err(HomogeneityError::InvalidThreshold(threshold_percent))
    }
}

/// A domain snapshot with its sampled norm field
#[derive(Debug, Clone)]
pub struct HomogeneityAnalysis<E: FieldEvaluator = BiotSavart> {
    domain: SimulationDomain,
    norm: NormField,
    evaluator: E,
}

impl HomogeneityAnalysis<BiotSavart> {
    /// Biot-Savart analysis with the norm field sampled per `config`
    pub fn from_config(domain: SimulationDomain, config: &AnalysisConfig) -> Result<Self> {
        Self::sampled(domain, BiotSavart::new(config.segments), config.grid_nz, config.grid_ny)
    }
}

impl<E: FieldEvaluator> HomogeneityAnalysis<E> {
    pub fn new(domain: SimulationDomain, norm: NormField, evaluator: E) -> Self {
        Self {
            domain,
            norm,
            evaluator,
        }
    }

    /// Sample the norm field on an `nz` x `ny` grid first
    pub fn sampled(domain: SimulationDomain, evaluator: E, nz: usize, ny: usize) -> Result<Self> {
        let norm = NormField::sample(&domain, &evaluator, nz, ny)?;
        Ok(Self::new(domain, norm, evaluator))
    }

    pub fn domain(&self) -> &SimulationDomain {
        &self.domain
    }

    pub fn norm_field(&self) -> &NormField {
        &self.norm
    }

    /// Uniformity of every sampled point relative to the domain center
    pub fn uniformity(&self) -> Result<UniformityGrid> {
        UniformityGrid::compute(&self.domain, &self.norm, &self.evaluator)
    }

    /// Binary homogeneity mask for a percent threshold
    pub fn mask(&self, threshold_percent: f64) -> Result<Vec<u8>> {
        let threshold = threshold_fraction(threshold_percent)?;
        Ok(self.uniformity()?.mask(threshold))
    }

    /// Locate the homogeneous region for a threshold given in percent
    pub fn compute(&self, threshold_percent: f64) -> Result<RegionReport> {
        let threshold = threshold_fraction(threshold_percent)?;
        let center = self.domain.center();

        tracing::info!(
            "Computing homogeneous region: threshold={}%, center=(z={:.5}, y={:.5}), {} coils",
            threshold_percent,
            center.z,
            center.y,
            self.domain.coils.len()
        );

        let mid = max_homogeneous_half_width(&self.domain, center, threshold, &self.evaluator)?;
        let report = RegionReport::new(threshold, mid, &self.domain, center, &self.evaluator)?;

        tracing::info!(
            "Homogeneous region: {:.5} x {:.5} m, volume {:.5} m³, B0 = {:.5} mT",
            report.width,
            report.height,
            report.volume,
            report.b0
        );

        Ok(report)
    }

    /// [`Self::compute`], then hand the clipped rectangle to `observer`
    pub fn compute_and_notify<O: RegionObserver>(
        &self,
        threshold_percent: f64,
        observer: &mut O,
    ) -> Result<RegionReport> {
        let report = self.compute(threshold_percent)?;
        let b = report.bounds;
        observer.draw_rectangle(b.z_min, b.z_max, b.y_min, b.y_max);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_validation() {
        assert_eq!(threshold_fraction(100.0).unwrap(), 1.0);
        assert_eq!(threshold_fraction(97.0).unwrap(), 0.97);

        for bad in [0.0, -5.0, 150.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                threshold_fraction(bad),
                Err(HomogeneityError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.threshold_percent, 97.0);
        assert_eq!(config.segments, 128);
    }
}
