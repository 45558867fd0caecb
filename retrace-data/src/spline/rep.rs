//! B-spline representation as stored on disk

use serde::{Deserialize, Serialize};

use crate::error::{DataFormatError, Result};

/// Highest polynomial degree accepted for a spline component.
pub const MAX_DEGREE: usize = 5;

/// One B-spline curve in "tck" layout: knot vector, per-axis coefficients, degree.
///
/// `coefficients` holds one array per coordinate axis. Arrays may carry trailing
/// padding beyond `knots.len() - degree - 1` entries; the padding is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplineRep {
    pub knots: Vec<f64>,
    pub coefficients: Vec<Vec<f64>>,
    pub degree: usize,
}

impl SplineRep {
    /// Create a representation without validating it.
    pub fn new(knots: Vec<f64>, coefficients: Vec<Vec<f64>>, degree: usize) -> Self {
        Self {
            knots,
            coefficients,
            degree,
        }
    }

    /// Number of control points the knot vector implies.
    pub fn control_point_count(&self) -> usize {
        self.knots.len().saturating_sub(self.degree + 1)
    }

    /// Parameter range covered by the polynomial pieces.
    ///
    /// Only meaningful on a validated representation.
    pub fn domain(&self) -> (f64, f64) {
        let n = self.control_point_count();
        (self.knots[self.degree], self.knots[n])
    }

    /// Check that knots, coefficients and degree describe a 3D curve.
    ///
    /// `component` names the curve in the returned error.
    pub fn validate(&self, component: &str) -> Result<()> {
        let k = self.degree;
        if k == 0 || k > MAX_DEGREE {
            return Err(DataFormatError::spline(
                component,
                format!("degree must be in 1..={MAX_DEGREE}, got {k}"),
            ));
        }

        let m = self.knots.len();
        if m < 2 * (k + 1) {
            return Err(DataFormatError::spline(
                component,
                format!("degree {k} needs at least {} knots, got {m}", 2 * (k + 1)),
            ));
        }

        if let Some(i) = self.knots.iter().position(|t| !t.is_finite()) {
            return Err(DataFormatError::spline(
                component,
                format!("knot {i} is not finite"),
            ));
        }

        if let Some(i) = self.knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(DataFormatError::spline(
                component,
                format!("knots decrease between index {i} and {}", i + 1),
            ));
        }

        if self.coefficients.len() != 3 {
            return Err(DataFormatError::spline(
                component,
                format!(
                    "expected 3 coefficient arrays (x, y, z), got {}",
                    self.coefficients.len()
                ),
            ));
        }

        let n = self.control_point_count();
        for (axis, coeffs) in self.coefficients.iter().enumerate() {
            if coeffs.len() < n {
                return Err(DataFormatError::spline(
                    component,
                    format!(
                        "coefficient array {axis} has {} entries, knots require {n}",
                        coeffs.len()
                    ),
                ));
            }
            if let Some(i) = coeffs[..n].iter().position(|c| !c.is_finite()) {
                return Err(DataFormatError::spline(
                    component,
                    format!("coefficient {i} of array {axis} is not finite"),
                ));
            }
        }

        // Extrapolation reuses the first and last pieces, so they must have width.
        if self.knots[k + 1] <= self.knots[k] || self.knots[n] <= self.knots[n - 1] {
            return Err(DataFormatError::spline(
                component,
                "first and last knot intervals must be non-empty",
            ));
        }

        Ok(())
    }
}

/// A spline path file: exactly the three named curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplineFile {
    pub eye: SplineRep,
    pub target: SplineRep,
    pub up: SplineRep,
}

impl SplineFile {
    /// Validate all three components.
    pub fn validate(&self) -> Result<()> {
        self.eye.validate("eye")?;
        self.target.validate("target")?;
        self.up.validate("up")?;
        Ok(())
    }
}
