//! Simulation domain and its center point

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::field::Coil;

/// Permeability of free space (H/m)
pub const MU0: f64 = 4.0 * PI * 1e-7;

/// Midpoint of the sampled domain, `(z, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub z: f64,
    pub y: f64,
}

/// Bounds, permeability and coils of one analysis session.
///
/// Lengths are in meters. `z` is the coil axis, `y` the radial direction in
/// the plotted half-plane.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDomain {
    pub z_min: f64,
    pub z_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub mu0: f64,
    pub coils: Vec<Coil>,
}

impl SimulationDomain {
    pub fn new(z_min: f64, z_max: f64, y_min: f64, y_max: f64, coils: Vec<Coil>) -> Self {
        Self {
            z_min,
            z_max,
            y_min,
            y_max,
            mu0: MU0,
            coils,
        }
    }

    pub fn with_mu0(mut self, mu0: f64) -> Self {
        self.mu0 = mu0;
        self
    }

    pub fn center(&self) -> Center {
        Center {
            z: (self.z_max + self.z_min) * 0.5,
            y: (self.y_max + self.y_min) * 0.5,
        }
    }

    /// Largest absolute bound over both axes; the initial upper bracket of the
    /// region search
    pub fn max_abs_bound(&self) -> f64 {
        [self.z_min, self.z_max, self.y_min, self.y_max]
            .iter()
            .fold(0.0_f64, |acc, b| acc.max(b.abs()))
    }

    /// Bounds are finite and not crossed
    pub fn is_consistent(&self) -> bool {
        let bounds = [self.z_min, self.z_max, self.y_min, self.y_max];
        bounds.iter().all(|b| b.is_finite()) && self.z_min <= self.z_max && self.y_min <= self.y_max
    }
}
