use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{CardinalSpline, Curve, CurveDomain, SplineBoundary};

/// A 3D interpolating curve built from three independent 1-D splines.
///
/// Control point `i` sits at parameter `t = i`; x, y and z are fitted
/// separately against that shared parameter.
#[derive(Debug, Clone)]
pub struct CardinalCurve {
    x: CardinalSpline,
    y: CardinalSpline,
    z: CardinalSpline,
}

impl CardinalCurve {
    /// Fits a curve through `points`, parametrized by index.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 points are given or a spline fit fails.
    pub fn fit(points: &[Point3], closed: bool, boundary: SplineBoundary) -> Result<Self> {
        let axis = |component: usize| -> Vec<(f64, f64)> {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (index_parameter(i), p[component]))
                .collect()
        };
        Ok(Self {
            x: CardinalSpline::fit(&axis(0), closed, boundary)?,
            y: CardinalSpline::fit(&axis(1), closed, boundary)?,
            z: CardinalSpline::fit(&axis(2), closed, boundary)?,
        })
    }

    /// Range of the control-point parameters, `[0, N - 1]`.
    #[must_use]
    pub fn parametric_range(&self) -> CurveDomain {
        self.x.parametric_range()
    }

    /// Evaluates the curve at `t`, clamped to the domain.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        Point3::new(self.x.evaluate(t), self.y.evaluate(t), self.z.evaluate(t))
    }

    /// First derivative with respect to `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3 {
        Vector3::new(
            self.x.derivative(t),
            self.y.derivative(t),
            self.z.derivative(t),
        )
    }
}

impl Curve for CardinalCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let d = self.derivative_at(t);
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        self.x.domain()
    }

    fn is_closed(&self) -> bool {
        self.x.is_closed()
    }
}

/// Converts a control-point index to its spline parameter.
#[allow(clippy::cast_precision_loss)]
fn index_parameter(index: usize) -> f64 {
    index as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn passes_through_control_points() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.5), p(3.0, 1.0, -1.0)];
        let curve = CardinalCurve::fit(&pts, false, SplineBoundary::Natural).unwrap();
        for (i, expected) in pts.iter().enumerate() {
            let got = curve.evaluate(index_parameter(i)).unwrap();
            assert_abs_diff_eq!((got - expected).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn straight_line_tangent() {
        let pts = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 2.0), p(0.0, 0.0, 4.0)];
        let curve = CardinalCurve::fit(&pts, false, SplineBoundary::Natural).unwrap();
        let t = curve.tangent(0.7).unwrap();
        assert_abs_diff_eq!(t.z, 1.0, epsilon = 1e-12);
        assert!(!curve.is_closed());
        assert_abs_diff_eq!(curve.domain().t_max, 2.0);
    }

    #[test]
    fn stationary_curve_has_no_tangent() {
        let pts = vec![p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)];
        let curve = CardinalCurve::fit(&pts, false, SplineBoundary::Natural).unwrap();
        assert!(curve.tangent(0.5).is_err());
    }

    #[test]
    fn closed_curve_extends_domain_by_one() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)];
        let curve = CardinalCurve::fit(&pts, true, SplineBoundary::Natural).unwrap();
        assert!(curve.is_closed());
        assert_abs_diff_eq!(curve.parametric_range().t_max, 2.0);
        assert_abs_diff_eq!(curve.domain().t_max, 3.0);
        let end = curve.point_at(3.0);
        assert_abs_diff_eq!(end.coords.norm(), 0.0, epsilon = 1e-12);
    }
}
