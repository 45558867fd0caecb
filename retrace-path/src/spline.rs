//! B-spline curves and the three-curve camera path.

use std::path::Path;

use glam::DVec3;
use retrace_data::spline::MAX_DEGREE;
use retrace_data::{DataFormatError, SplineFile, SplineRep, Tick, load_spline_file, ticks_to_seconds};

/// A validated 3D B-spline curve.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline {
    knots: Vec<f64>,
    control_points: Vec<DVec3>,
    degree: usize,
}

impl BSpline {
    /// Build a curve from its serialized form.
    ///
    /// `component` names the curve in validation errors.
    pub fn from_rep(rep: &SplineRep, component: &str) -> Result<Self, DataFormatError> {
        rep.validate(component)?;
        let [xs, ys, zs] = [&rep.coefficients[0], &rep.coefficients[1], &rep.coefficients[2]];
        let control_points = (0..rep.control_point_count())
            .map(|i| DVec3::new(xs[i], ys[i], zs[i]))
            .collect();
        Ok(Self {
            knots: rep.knots.clone(),
            control_points,
            degree: rep.degree,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn control_points(&self) -> &[DVec3] {
        &self.control_points
    }

    /// Parameter range covered by the polynomial pieces.
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.control_points.len()],
        )
    }

    /// Index `l` of the knot interval `[t_l, t_{l+1})` used for `x`.
    ///
    /// Clamped to the first and last polynomial pieces, so parameters outside
    /// the domain extrapolate along the nearest piece.
    fn span(&self, x: f64) -> usize {
        let last = self.control_points.len() - 1;
        let upper = self.knots.partition_point(|&t| t <= x);
        upper.saturating_sub(1).clamp(self.degree, last)
    }

    /// Evaluate the curve at `x` with de Boor's algorithm.
    ///
    /// There is no bounds check: outside the domain the result is the
    /// extrapolated end polynomial.
    pub fn evaluate(&self, x: f64) -> DVec3 {
        let k = self.degree;
        let l = self.span(x);

        let mut d = [DVec3::ZERO; MAX_DEGREE + 1];
        d[..=k].copy_from_slice(&self.control_points[l - k..=l]);

        for r in 1..=k {
            for j in (r..=k).rev() {
                let left = self.knots[j + l - k];
                let right = self.knots[j + 1 + l - r];
                let alpha = (x - left) / (right - left);
                d[j] = d[j - 1].lerp(d[j], alpha);
            }
        }

        d[k]
    }
}

/// Raw eye, target and up-reference samples at one time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
}

/// Camera path made of three independent curves: eye position, look-at
/// target and up reference. Parameterized in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SplinePath {
    eye: BSpline,
    target: BSpline,
    up: BSpline,
}

impl SplinePath {
    /// Build a path from a parsed spline file.
    pub fn from_file(file: &SplineFile) -> Result<Self, DataFormatError> {
        Ok(Self {
            eye: BSpline::from_rep(&file.eye, "eye")?,
            target: BSpline::from_rep(&file.target, "target")?,
            up: BSpline::from_rep(&file.up, "up")?,
        })
    }

    /// Load a path from a spline file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataFormatError> {
        let file = load_spline_file(path)?;
        Self::from_file(&file)
    }

    pub fn eye(&self) -> &BSpline {
        &self.eye
    }

    pub fn target(&self) -> &BSpline {
        &self.target
    }

    pub fn up(&self) -> &BSpline {
        &self.up
    }

    /// Sample all three curves at `seconds`. Out-of-range times extrapolate.
    pub fn evaluate(&self, seconds: f64) -> PathSample {
        PathSample {
            eye: self.eye.evaluate(seconds),
            target: self.target.evaluate(seconds),
            up: self.up.evaluate(seconds),
        }
    }

    /// Sample the path at a trigger tick.
    pub fn evaluate_ticks(&self, tick: Tick, ticks_per_second: u64) -> PathSample {
        self.evaluate(ticks_to_seconds(tick, ticks_per_second))
    }

    /// Sample the path at many times, e.g. to pre-sample a preview polyline.
    pub fn evaluate_batch(&self, times: &[f64]) -> Vec<PathSample> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Time range where all three curves interpolate rather than extrapolate.
    pub fn domain(&self) -> (f64, f64) {
        let curves = [&self.eye, &self.target, &self.up];
        let start = curves
            .iter()
            .map(|c| c.domain().0)
            .fold(f64::NEG_INFINITY, f64::max);
        let end = curves
            .iter()
            .map(|c| c.domain().1)
            .fold(f64::INFINITY, f64::min);
        (start, end)
    }

    /// Whether `seconds` lies inside [`SplinePath::domain`].
    pub fn contains(&self, seconds: f64) -> bool {
        let (start, end) = self.domain();
        (start..=end).contains(&seconds)
    }

    /// Number of triggers whose time lies outside [`SplinePath::domain`].
    pub fn count_outside(&self, triggers: &[Tick], ticks_per_second: u64) -> usize {
        triggers
            .iter()
            .filter(|&&tick| !self.contains(ticks_to_seconds(tick, ticks_per_second)))
            .count()
    }
}
