//! Homogeneous region bounds, volume of revolution and the text report

use minijinja::{context, Environment};
use serde::Serialize;
use std::f64::consts::PI;

use crate::domain::{Center, SimulationDomain};
use crate::error::Result;
use crate::field::{FieldError, FieldEvaluator};

const REPORT_TEMPLATE: &str = concat!(
    "\n",
    " \tDimensions:\n",
    "\n",
    " \t\tHeight [m]\t\t\t=\t\t{{ width }}\n",
    " \t\tWidth [m]\t\t\t=\t\t{{ height }}\n",
    " \t\tVolume [m³]\t\t\t=\t\t{{ volume }}\n",
    "\n",
    " \tMagnetic field value at the center of the volume:\n",
    "\n",
    " \t\tBo [mT]\t\t\t\t\t\t=\t\t{{ b0 }}\n",
    " \t\tCenter coordinates [m]\t\t=\t\t(z = {{ center_z }}, y = {{ center_y }})\n",
);

/// Square `[-mid, mid]²` clipped to the domain, one axis at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionBounds {
    pub z_min: f64,
    pub z_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl RegionBounds {
    pub fn clipped(mid: f64, domain: &SimulationDomain) -> Self {
        Self {
            z_min: domain.z_min.max(-mid),
            z_max: domain.z_max.min(mid),
            y_min: domain.y_min.max(-mid),
            y_max: domain.y_max.min(mid),
        }
    }

    /// Extent along z
    pub fn width(&self) -> f64 {
        self.z_max - self.z_min
    }

    /// Extent along y
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Volume swept by revolving the rectangle around the z axis.
    ///
    /// A rectangle on one side of the axis sweeps an annulus, one straddling
    /// it sweeps a disk of the larger radius.
    pub fn volume_of_revolution(&self) -> f64 {
        let (a, b) = (self.y_max.abs(), self.y_min.abs());
        let r2 = a.max(b);
        let r1 = if sign(self.y_max) == sign(self.y_min) { a.min(b) } else { 0.0 };

        PI * self.width() * (r2 * r2 - r1 * r1)
    }
}

/// Three-valued sign; zero is its own class
fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Result of one homogeneity computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    /// Threshold as a fraction in `(0, 1]`
    pub threshold: f64,
    /// Half-width of the unclipped homogeneous square (m)
    pub half_width: f64,
    pub bounds: RegionBounds,
    pub width: f64,
    pub height: f64,
    /// Volume of revolution (m³)
    pub volume: f64,
    /// Field norm at the center (mT)
    pub b0: f64,
    pub center: Center,
}

impl RegionReport {
    pub fn new<E: FieldEvaluator>(
        threshold: f64,
        mid: f64,
        domain: &SimulationDomain,
        center: Center,
        evaluator: &E,
    ) -> std::result::Result<Self, FieldError> {
        let bounds = RegionBounds::clipped(mid, domain);

        // Center passed as (z, y) into the (y, z) slots; identical for centered domains
        let b0 = evaluator.norm(&domain.coils, center.z, center.y, domain.mu0)?;

        Ok(Self {
            threshold,
            half_width: mid,
            bounds,
            width: bounds.width(),
            height: bounds.height(),
            volume: bounds.volume_of_revolution(),
            b0,
            center,
        })
    }

    /// Fixed-layout text report, values to 5 decimals
    pub fn render(&self) -> Result<String> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template("report", REPORT_TEMPLATE)?;

        let template = env.get_template("report")?;
        let fixed = |v: f64| format!("{:.5}", v);
        let output = template.render(context! {
            width => fixed(self.width),
            height => fixed(self.height),
            volume => fixed(self.volume),
            b0 => fixed(self.b0),
            center_z => fixed(self.center.z),
            center_y => fixed(self.center.y),
        })?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bounds(z_min: f64, z_max: f64, y_min: f64, y_max: f64) -> RegionBounds {
        RegionBounds { z_min, z_max, y_min, y_max }
    }

    #[test]
    fn test_clipping_to_domain() {
        let domain = SimulationDomain::new(-5.0, 5.0, -2.0, 2.0, vec![]);
        let b = RegionBounds::clipped(3.0, &domain);

        assert_eq!(b, bounds(-3.0, 3.0, -2.0, 2.0));
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn test_clipping_one_sided_domain() {
        let domain = SimulationDomain::new(-1.0, 4.0, 0.5, 3.0, vec![]);
        let b = RegionBounds::clipped(2.0, &domain);
        assert_eq!(b, bounds(-1.0, 2.0, 0.5, 2.0));
    }

    #[test]
    fn test_volume_straddling_axis() {
        let b = bounds(0.0, 4.0, -2.0, 3.0);
        assert!((b.volume_of_revolution() - 36.0 * PI).abs() < 1e-12);
        assert!((b.volume_of_revolution() - 113.097).abs() < 1e-3);
    }

    #[test]
    fn test_volume_one_side_of_axis() {
        let b = bounds(0.0, 2.0, 1.0, 3.0);
        assert!((b.volume_of_revolution() - 16.0 * PI).abs() < 1e-12);
        assert!((b.volume_of_revolution() - 50.265).abs() < 1e-3);
    }

    #[test]
    fn test_volume_touching_axis_is_disk() {
        let b = bounds(0.0, 1.0, 0.0, 2.0);
        assert!((b.volume_of_revolution() - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_render_layout() {
        let report = RegionReport {
            threshold: 0.97,
            half_width: 0.05,
            bounds: bounds(-0.05, 0.05, -0.05, 0.05),
            width: 0.1,
            height: 0.1,
            volume: PI * 0.1 * 0.0025,
            b0: 0.674427,
            center: Center { z: 0.0, y: 0.0 },
        };

        let expected = [
            "",
            " \tDimensions:",
            "",
            " \t\tHeight [m]\t\t\t=\t\t0.10000",
            " \t\tWidth [m]\t\t\t=\t\t0.10000",
            " \t\tVolume [m³]\t\t\t=\t\t0.00079",
            "",
            " \tMagnetic field value at the center of the volume:",
            "",
            " \t\tBo [mT]\t\t\t\t\t\t=\t\t0.67443",
            " \t\tCenter coordinates [m]\t\t=\t\t(z = 0.00000, y = 0.00000)",
            "",
        ]
        .join("\n");

        assert_eq!(report.render().unwrap(), expected);
    }
}
