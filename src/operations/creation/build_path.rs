use crate::config::{
    CurveConfig, InterpolationMode, LinearClosure, DEFAULT_RESOLUTION, MAX_RESOLUTION,
};
use crate::error::{ConfigError, Result};
use crate::geometry::{CardinalCurve, ControlPointSet, CurvePath, SplineBoundary};
use crate::math::{Point3, TOLERANCE};

/// Turns an ordered control-point set into a dense path.
///
/// Linear mode passes the control points through unchanged. Cardinal spline
/// mode fits x, y and z against the point index and samples
/// `(resolution + 2) * (N - 1)` points across the parametric range. Fewer
/// than two control points give an empty path.
#[derive(Debug)]
pub struct BuildPath<'a> {
    points: &'a ControlPointSet,
    mode: InterpolationMode,
    closed: bool,
    resolution: usize,
    boundary: SplineBoundary,
    linear_closure: LinearClosure,
}

impl<'a> BuildPath<'a> {
    /// Creates a new open `BuildPath` operation with default sampling.
    #[must_use]
    pub fn new(points: &'a ControlPointSet, mode: InterpolationMode) -> Self {
        Self {
            points,
            mode,
            closed: false,
            resolution: DEFAULT_RESOLUTION.get(),
            boundary: SplineBoundary::default(),
            linear_closure: LinearClosure::default(),
        }
    }

    /// Creates a `BuildPath` operation using every path setting in `config`.
    #[must_use]
    pub fn from_config(points: &'a ControlPointSet, config: &CurveConfig) -> Self {
        Self::new(points, config.mode())
            .with_closed(config.is_closed())
            .with_resolution(config.resolution())
            .with_boundary(config.boundary())
            .with_linear_closure(config.linear_closure())
    }

    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the number of intermediate samples per control-point segment.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub fn with_boundary(mut self, boundary: SplineBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    #[must_use]
    pub fn with_linear_closure(mut self, closure: LinearClosure) -> Self {
        self.linear_closure = closure;
        self
    }

    /// Executes the operation, returning the sampled path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResolution`] for a resolution of zero or
    /// above [`MAX_RESOLUTION`], or a geometry error if the spline fit fails.
    pub fn execute(&self) -> Result<CurvePath> {
        if self.resolution == 0 || self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::InvalidResolution(self.resolution).into());
        }
        if self.points.len() < 2 {
            return Ok(CurvePath::empty());
        }

        let positions = self.points.positions();
        match self.mode {
            InterpolationMode::Linear => Ok(self.linear(positions)),
            InterpolationMode::CardinalSpline => self.spline(&positions),
        }
    }

    fn linear(&self, mut positions: Vec<Point3>) -> CurvePath {
        if !self.closed {
            return CurvePath::new(positions, false);
        }

        let first = positions[0];
        match self.linear_closure {
            LinearClosure::Spur => {
                let mid = nalgebra::center(&first, &positions[positions.len() - 1]);
                let mut points = Vec::with_capacity(positions.len() + 2);
                points.push(mid);
                points.extend(positions);
                points.push(mid);
                CurvePath::new(points, true)
            }
            LinearClosure::Ring => {
                positions.push(first);
                CurvePath::new(positions, true)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn spline(&self, positions: &[Point3]) -> Result<CurvePath> {
        let curve = CardinalCurve::fit(positions, self.closed, self.boundary)?;
        let range = curve.parametric_range();
        let sample_count = (self.resolution + 2)
            .checked_mul(positions.len() - 1)
            .ok_or(ConfigError::InvalidResolution(self.resolution))?;
        let step = range.span() / (sample_count - 1) as f64;
        let at = |k: usize| range.t_min + step * k as f64;

        if !self.closed {
            let mut points: Vec<Point3> = (0..sample_count).map(|k| curve.point_at(at(k))).collect();
            // Land exactly on the last control point.
            points[sample_count - 1] = curve.point_at(range.t_max);
            return Ok(CurvePath::new(points, false));
        }

        // The closing interval spans [t_max, t_max + 1]; stop short of the
        // seam, then repeat the first two samples to close the loop.
        let loop_end = range.t_max + 1.0 - TOLERANCE;
        let mut points: Vec<Point3> = (0..)
            .map(at)
            .take_while(|&t| t < loop_end)
            .map(|t| curve.point_at(t))
            .collect();
        points.push(curve.point_at(range.t_min));
        points.push(curve.point_at(range.t_min + step));
        Ok(CurvePath::new(points, true))
    }
}
