//! Magnetic field computation using Biot-Savart law
//!
//! Coils are circular current loops coaxial with the z axis. Field points live
//! in the `x = 0` half-plane, addressed by radial `y` and axial `z`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

use crate::domain::Center;

/// A circular current loop centered on the z axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub z: f64,       // Axial position of the loop plane (m)
    pub radius: f64,  // Radius (m)
    pub current: f64, // Current (A)
    #[serde(default = "default_turns")]
    pub turns: f64,
}

fn default_turns() -> f64 {
    1.0
}

impl Coil {
    pub fn ampere_turns(&self) -> f64 {
        self.current * self.turns
    }

    /// Two identical coils spaced by their radius, centered on the origin
    pub fn helmholtz_pair(radius: f64, current: f64, turns: f64) -> Vec<Coil> {
        [-0.5, 0.5]
            .iter()
            .map(|side| Coil {
                z: side * radius,
                radius,
                current,
                turns,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("non-finite field norm at (y = {y}, z = {z})")]
    NonFinite { y: f64, z: f64 },

    #[error("reference field at center (z = {z}, y = {y}) is zero or non-finite")]
    ZeroReference { z: f64, y: f64 },
}

/// Field magnitude and uniformity for a coil arrangement
pub trait FieldEvaluator {
    /// Field norm (mT) at radial coordinate `y` and axial coordinate `z`
    fn norm(&self, coils: &[Coil], y: f64, z: f64, mu0: f64) -> Result<f64, FieldError>;

    /// Uniformity of each sample relative to the field at `center`.
    ///
    /// `1` means identical to the center field; the score decreases linearly
    /// with the relative deviation.
    fn uniformity(
        &self,
        coils: &[Coil],
        norms: &[f64],
        mu0: f64,
        center: Center,
    ) -> Result<Vec<f64>, FieldError> {
        let reference = self.norm(coils, center.y.abs(), center.z, mu0)?;
        if !reference.is_finite() || reference == 0.0 {
            return Err(FieldError::ZeroReference {
                z: center.z,
                y: center.y,
            });
        }

        Ok(norms
            .iter()
            .map(|&n| 1.0 - (n - reference).abs() / reference)
            .collect())
    }
}

/// Segmented-loop Biot-Savart evaluator
#[derive(Debug, Clone, Copy)]
pub struct BiotSavart {
    pub segments: usize,
}

impl Default for BiotSavart {
    fn default() -> Self {
        Self { segments: 128 }
    }
}

impl BiotSavart {
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Total B vector (T) from all coils at a 3D point (m)
    pub fn field(&self, coils: &[Coil], point: Vector3<f64>, mu0: f64) -> Vector3<f64> {
        coils
            .iter()
            .map(|coil| biot_savart_loop(coil, point, mu0, self.segments))
            .fold(Vector3::zeros(), |acc, b| acc + b)
    }
}

impl FieldEvaluator for BiotSavart {
    fn norm(&self, coils: &[Coil], y: f64, z: f64, mu0: f64) -> Result<f64, FieldError> {
        let b = self.field(coils, Vector3::new(0.0, y, z), mu0);
        let norm = b.norm() * 1e3;

        if norm.is_finite() {
            Ok(norm)
        } else {
            Err(FieldError::NonFinite { y, z })
        }
    }
}

/// B-field (T) of a single loop at a point
fn biot_savart_loop(coil: &Coil, point: Vector3<f64>, mu0: f64, num_segments: usize) -> Vector3<f64> {
    let mut b = Vector3::zeros();

    let r = coil.radius;
    let dtheta = 2.0 * PI / num_segments as f64;
    let factor = mu0 / (4.0 * PI) * coil.ampere_turns();

    for i in 0..num_segments {
        let theta_mid = (i as f64 + 0.5) * dtheta;
        let (sin, cos) = theta_mid.sin_cos();

        let wire = Vector3::new(r * cos, r * sin, coil.z);
        let dl = Vector3::new(-r * sin * dtheta, r * cos * dtheta, 0.0);

        let sep = point - wire;
        let r_mag = sep.norm();
        if r_mag < 1e-12 {
            continue;
        }

        // dB = (μ₀/4π) * NI * (dl × r) / r³
        b += dl.cross(&sep) * (factor / (r_mag * r_mag * r_mag));
    }

    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MU0;

    fn rel_err(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn test_single_loop_on_axis() {
        let coil = Coil { z: 0.0, radius: 0.1, current: 2.0, turns: 50.0 };
        let evaluator = BiotSavart::default();

        for &z in &[0.0, 0.05, -0.2] {
            let expected_t = MU0 * coil.ampere_turns() * coil.radius.powi(2)
                / (2.0 * (coil.radius.powi(2) + z * z).powf(1.5));
            let got = evaluator.norm(&[coil], 0.0, z, MU0).unwrap();
            assert!(rel_err(got, expected_t * 1e3) < 1e-9, "z = {z}: {got}");
        }
    }

    #[test]
    fn test_helmholtz_center_field() {
        let coils = Coil::helmholtz_pair(0.2, 1.5, 100.0);
        let evaluator = BiotSavart::default();

        let expected_t = (0.8_f64).powf(1.5) * MU0 * 150.0 / 0.2;
        let got = evaluator.norm(&coils, 0.0, 0.0, MU0).unwrap();
        assert!(rel_err(got, expected_t * 1e3) < 1e-9);
    }

    #[test]
    fn test_norm_symmetric_in_y() {
        let coils = Coil::helmholtz_pair(0.2, 1.0, 10.0);
        let evaluator = BiotSavart::default();

        let up = evaluator.norm(&coils, 0.07, 0.03, MU0).unwrap();
        let down = evaluator.norm(&coils, -0.07, 0.03, MU0).unwrap();
        assert!(rel_err(up, down) < 1e-10);
    }

    #[test]
    fn test_uniformity_at_center_is_one() {
        let coils = Coil::helmholtz_pair(0.2, 1.0, 10.0);
        let evaluator = BiotSavart::default();
        let center = Center { z: 0.0, y: 0.0 };

        let b0 = evaluator.norm(&coils, 0.0, 0.0, MU0).unwrap();
        let far = evaluator.norm(&coils, 0.15, 0.15, MU0).unwrap();
        let u = evaluator.uniformity(&coils, &[b0, far], MU0, center).unwrap();

        assert_eq!(u[0], 1.0);
        assert!(u[1] < 1.0);
    }

    #[test]
    fn test_uniformity_without_coils_is_zero_reference() {
        let evaluator = BiotSavart::default();
        let center = Center { z: 0.0, y: 0.0 };

        let err = evaluator.uniformity(&[], &[1.0], MU0, center).unwrap_err();
        assert_eq!(err, FieldError::ZeroReference { z: 0.0, y: 0.0 });
    }
}
