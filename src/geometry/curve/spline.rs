#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::tridiagonal::{solve_cyclic_tridiagonal, solve_tridiagonal};
use crate::math::TOLERANCE;

use super::CurveDomain;

/// End conditions for an open spline fit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplineBoundary {
    /// Zero second derivative at both ends.
    #[default]
    Natural,
    /// Prescribed first derivative at each end.
    Clamped { start: f64, end: f64 },
}

/// A 1-D piecewise cubic spline interpolating `(t, value)` samples.
///
/// Each interval `[t_k, t_k+1]` holds a cubic in Hermite form whose first
/// derivatives at the knots come from a tridiagonal solve, so the curve is
/// C2 across interior knots. A closed spline appends a closing interval of
/// unit length that returns to the first value and solves the periodic system.
#[derive(Debug, Clone)]
pub struct CardinalSpline {
    knots: Vec<f64>,
    /// `[c0, c1, c2, c3]` per interval, in powers of `t - t_k`.
    coefficients: Vec<[f64; 4]>,
    parametric_range: CurveDomain,
    closed: bool,
}

impl CardinalSpline {
    /// Fits a spline through `samples`, ordered by strictly increasing parameter.
    ///
    /// `boundary` only applies to open splines.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] for fewer than 2 samples and
    /// [`GeometryError::SingularSystem`] if parameters are not strictly
    /// increasing or the derivative system cannot be solved.
    pub fn fit(samples: &[(f64, f64)], closed: bool, boundary: SplineBoundary) -> Result<Self> {
        if samples.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                min: 2,
                actual: samples.len(),
            }
            .into());
        }

        let mut knots: Vec<f64> = samples.iter().map(|s| s.0).collect();
        let mut values: Vec<f64> = samples.iter().map(|s| s.1).collect();
        if knots.windows(2).any(|w| w[1] - w[0] < TOLERANCE) {
            return Err(GeometryError::SingularSystem.into());
        }

        let last = knots.len() - 1;
        let parametric_range = CurveDomain::new(knots[0], knots[last]);

        let slopes = if closed {
            knots.push(knots[last] + 1.0);
            values.push(values[0]);
            periodic_slopes(&knots, &values)?
        } else {
            open_slopes(&knots, &values, boundary)?
        };

        let coefficients = hermite_coefficients(&knots, &values, &slopes);

        Ok(Self {
            knots,
            coefficients,
            parametric_range,
            closed,
        })
    }

    /// Evaluates the spline at `t`, clamped to [`Self::domain`].
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        let (index, local) = self.locate(t);
        let [c0, c1, c2, c3] = self.coefficients[index];
        c0 + local * (c1 + local * (c2 + local * c3))
    }

    /// Evaluates the first derivative at `t`, clamped to [`Self::domain`].
    #[must_use]
    pub fn derivative(&self, t: f64) -> f64 {
        let (index, local) = self.locate(t);
        let [_, c1, c2, c3] = self.coefficients[index];
        c1 + local * (2.0 * c2 + 3.0 * c3 * local)
    }

    /// Range of the fitted sample parameters.
    ///
    /// For closed splines this excludes the closing interval.
    #[must_use]
    pub fn parametric_range(&self) -> CurveDomain {
        self.parametric_range
    }

    /// Full evaluation domain, including the closing interval when closed.
    #[must_use]
    pub fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Returns whether the spline wraps back to its first value.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Finds the interval containing `t` and the offset from its start knot.
    fn locate(&self, t: f64) -> (usize, f64) {
        let t = self.domain().clamp(t);
        let last_interval = self.coefficients.len() - 1;
        let index = self
            .knots
            .partition_point(|&k| k <= t)
            .saturating_sub(1)
            .min(last_interval);
        (index, t - self.knots[index])
    }
}

/// Knot derivatives for an open spline with the given end conditions.
fn open_slopes(knots: &[f64], values: &[f64], boundary: SplineBoundary) -> Result<Vec<f64>> {
    let n = knots.len();
    let last = n - 1;
    let mut sub = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut sup = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    let first_h = knots[1] - knots[0];
    let last_h = knots[last] - knots[last - 1];
    match boundary {
        SplineBoundary::Natural => {
            diag[0] = 2.0;
            sup[0] = 1.0;
            rhs[0] = 3.0 * (values[1] - values[0]) / first_h;
            sub[last] = 1.0;
            diag[last] = 2.0;
            rhs[last] = 3.0 * (values[last] - values[last - 1]) / last_h;
        }
        SplineBoundary::Clamped { start, end } => {
            diag[0] = 1.0;
            rhs[0] = start;
            diag[last] = 1.0;
            rhs[last] = end;
        }
    }

    for k in 1..last {
        let h_prev = knots[k] - knots[k - 1];
        let h_next = knots[k + 1] - knots[k];
        sub[k] = h_next;
        diag[k] = 2.0 * (h_prev + h_next);
        sup[k] = h_prev;
        rhs[k] = 3.0
            * (h_next * (values[k] - values[k - 1]) / h_prev
                + h_prev * (values[k + 1] - values[k]) / h_next);
    }

    solve_tridiagonal(&sub, &diag, &sup, &rhs)
}

/// Knot derivatives for a closed spline whose last value repeats the first.
fn periodic_slopes(knots: &[f64], values: &[f64]) -> Result<Vec<f64>> {
    // Unknowns are the derivatives at knots 1..=m; knot 0 shares knot m's.
    let m = knots.len() - 1;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for row in 0..m {
        let k = row + 1;
        let h_prev = knots[k] - knots[k - 1];
        let (h_next, delta_next) = if k < m {
            (knots[k + 1] - knots[k], values[k + 1] - values[k])
        } else {
            (knots[1] - knots[0], values[1] - values[0])
        };
        sub[row] = h_next;
        diag[row] = 2.0 * (h_prev + h_next);
        sup[row] = h_prev;
        rhs[row] = 3.0 * (h_next * (values[k] - values[k - 1]) / h_prev + h_prev * delta_next / h_next);
    }

    let solved = solve_cyclic_tridiagonal(&sub, &diag, &sup, &rhs)?;
    let mut slopes = Vec::with_capacity(m + 1);
    slopes.push(solved[m - 1]);
    slopes.extend_from_slice(&solved);
    Ok(slopes)
}

fn hermite_coefficients(knots: &[f64], values: &[f64], slopes: &[f64]) -> Vec<[f64; 4]> {
    knots
        .windows(2)
        .enumerate()
        .map(|(k, w)| {
            let h = w[1] - w[0];
            let dy = values[k + 1] - values[k];
            [
                values[k],
                slopes[k],
                3.0 * dy / (h * h) - (slopes[k + 1] + 2.0 * slopes[k]) / h,
                -2.0 * dy / (h * h * h) + (slopes[k + 1] + slopes[k]) / (h * h),
            ]
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (f64::from(u32::try_from(i).unwrap()), v))
            .collect()
    }

    #[test]
    fn interpolates_every_sample() {
        let samples = indexed(&[0.0, 3.0, -1.0, 4.0, 2.0]);
        let spline = CardinalSpline::fit(&samples, false, SplineBoundary::Natural).unwrap();
        for (t, v) in &samples {
            assert_abs_diff_eq!(spline.evaluate(*t), *v, epsilon = 1e-12);
        }
    }

    #[test]
    fn natural_spline_reproduces_linear_data() {
        let samples = indexed(&[1.0, 3.0, 5.0, 7.0]);
        let spline = CardinalSpline::fit(&samples, false, SplineBoundary::Natural).unwrap();
        for i in 0..=30 {
            let t = f64::from(i) * 0.1;
            assert_abs_diff_eq!(spline.evaluate(t), 1.0 + 2.0 * t, epsilon = 1e-12);
            assert_abs_diff_eq!(spline.derivative(t), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_samples_give_a_straight_segment() {
        let spline =
            CardinalSpline::fit(&[(0.0, 2.0), (1.0, 6.0)], false, SplineBoundary::Natural).unwrap();
        assert_abs_diff_eq!(spline.evaluate(0.25), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn clamped_spline_honors_end_derivatives() {
        let samples = indexed(&[0.0, 1.0, 0.0, 2.0]);
        let boundary = SplineBoundary::Clamped {
            start: 0.0,
            end: -1.5,
        };
        let spline = CardinalSpline::fit(&samples, false, boundary).unwrap();
        assert_abs_diff_eq!(spline.derivative(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.derivative(3.0), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn natural_spline_has_zero_end_curvature() {
        let samples = indexed(&[0.0, 2.0, -1.0, 1.0]);
        let spline = CardinalSpline::fit(&samples, false, SplineBoundary::Natural).unwrap();
        // Second derivative at the start of interval 0 is 2 * c2.
        assert_abs_diff_eq!(spline.coefficients[0][2], 0.0, epsilon = 1e-12);
        let [_, _, c2, c3] = spline.coefficients[2];
        assert_abs_diff_eq!(2.0 * c2 + 6.0 * c3, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn interior_knots_are_c2() {
        let samples = indexed(&[0.0, 2.0, -1.0, 1.0, 5.0]);
        let spline = CardinalSpline::fit(&samples, false, SplineBoundary::Natural).unwrap();
        for k in 1..4 {
            let [_, _, c2_prev, c3_prev] = spline.coefficients[k - 1];
            let [_, _, c2_next, _] = spline.coefficients[k];
            assert_abs_diff_eq!(2.0 * c2_prev + 6.0 * c3_prev, 2.0 * c2_next, epsilon = 1e-9);
        }
    }

    #[test]
    fn closed_spline_wraps_to_first_value() {
        let samples = indexed(&[0.0, 1.0, 0.0, -1.0]);
        let spline = CardinalSpline::fit(&samples, true, SplineBoundary::Natural).unwrap();
        assert!(spline.is_closed());
        assert_abs_diff_eq!(spline.parametric_range().t_max, 3.0);
        assert_abs_diff_eq!(spline.domain().t_max, 4.0);
        assert_abs_diff_eq!(spline.evaluate(4.0), 0.0, epsilon = 1e-12);
        // Periodic: slope at the seam matches from both sides.
        assert_abs_diff_eq!(spline.derivative(0.0), spline.derivative(4.0), epsilon = 1e-12);
    }

    #[test]
    fn closed_spline_with_two_samples() {
        let spline =
            CardinalSpline::fit(&[(0.0, 0.0), (1.0, 1.0)], true, SplineBoundary::Natural).unwrap();
        assert_abs_diff_eq!(spline.evaluate(1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.evaluate(2.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluation_clamps_outside_domain() {
        let samples = indexed(&[1.0, 4.0, 2.0]);
        let spline = CardinalSpline::fit(&samples, false, SplineBoundary::Natural).unwrap();
        assert_abs_diff_eq!(spline.evaluate(-5.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.evaluate(10.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn single_sample_is_rejected() {
        let result = CardinalSpline::fit(&[(0.0, 1.0)], false, SplineBoundary::Natural);
        assert!(result.is_err());
    }

    #[test]
    fn repeated_parameter_is_rejected() {
        let result =
            CardinalSpline::fit(&[(0.0, 1.0), (0.0, 2.0)], false, SplineBoundary::Natural);
        assert!(result.is_err());
    }
}
