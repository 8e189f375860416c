//! Setup file format: domain bounds and coil arrangement (JSON)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{SimulationDomain, MU0};
use crate::error::{HomogeneityError, Result};
use crate::field::Coil;

/// Top-level setup file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupFile {
    /// Sampled domain; defaults to the preset's domain when a preset is given
    #[serde(default)]
    pub domain: Option<DomainBounds>,
    /// Permeability (H/m), vacuum when absent
    #[serde(default)]
    pub mu0: Option<f64>,
    /// Explicit coils
    #[serde(default)]
    pub coils: Vec<Coil>,
    /// Helmholtz pair appended to the explicit coils
    #[serde(default)]
    pub helmholtz: Option<HelmholtzPreset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub z_min: f64,
    pub z_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Two coils of radius `R` at `z = ±R/2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelmholtzPreset {
    pub radius: f64,
    pub current: f64,
    #[serde(default = "default_turns")]
    pub turns: f64,
}

fn default_turns() -> f64 {
    1.0
}

impl HelmholtzPreset {
    pub fn coils(&self) -> Vec<Coil> {
        Coil::helmholtz_pair(self.radius, self.current, self.turns)
    }

    /// `[-R, R]` on both axes
    pub fn default_bounds(&self) -> DomainBounds {
        DomainBounds {
            z_min: -self.radius,
            z_max: self.radius,
            y_min: -self.radius,
            y_max: self.radius,
        }
    }
}

impl SetupFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HomogeneityError::InvalidSetup(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            HomogeneityError::InvalidSetup(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Validate and build the simulation domain
    pub fn into_domain(self) -> Result<SimulationDomain> {
        let mut coils = self.coils;
        if let Some(preset) = &self.helmholtz {
            coils.extend(preset.coils());
        }

        if coils.is_empty() {
            return Err(HomogeneityError::InvalidSetup("no coils defined".into()));
        }
        if let Some(bad) = coils.iter().find(|c| !(c.radius.is_finite() && c.radius > 0.0)) {
            return Err(HomogeneityError::InvalidSetup(format!(
                "coil at z = {} has invalid radius {}",
                bad.z, bad.radius
            )));
        }

        let bounds = self
            .domain
            .or_else(|| self.helmholtz.map(|p| p.default_bounds()))
            .ok_or_else(|| HomogeneityError::InvalidSetup("no domain bounds given".into()))?;

        let mu0 = self.mu0.unwrap_or(MU0);
        if !(mu0.is_finite() && mu0 > 0.0) {
            return Err(HomogeneityError::InvalidSetup(format!("invalid mu0 {}", mu0)));
        }

        let domain = SimulationDomain::new(bounds.z_min, bounds.z_max, bounds.y_min, bounds.y_max, coils)
            .with_mu0(mu0);
        if !domain.is_consistent() {
            return Err(HomogeneityError::InvalidSetup(format!(
                "domain bounds must be finite with min <= max: z [{}, {}], y [{}, {}]",
                bounds.z_min, bounds.z_max, bounds.y_min, bounds.y_max
            )));
        }

        for coil in &domain.coils {
            if coil.z < domain.z_min || coil.z > domain.z_max {
                tracing::warn!("Coil at z = {} lies outside the sampled domain", coil.z);
            }
        }

        Ok(domain)
    }
}
