use crate::geometry::CurvePath;
use crate::math::LOOP_CLOSURE_EPSILON;

/// Computes the polyline length of a path.
///
/// If the path has more than two points and its first point coincides with
/// the second-to-last one (within [`LOOP_CLOSURE_EPSILON`]), the loop is
/// already closed there and the final point is left out of the sum.
pub struct MeasureLength<'a> {
    path: &'a CurvePath,
}

impl<'a> MeasureLength<'a> {
    /// Creates a new `MeasureLength` query.
    #[must_use]
    pub fn new(path: &'a CurvePath) -> Self {
        Self { path }
    }

    /// Executes the query, returning the path length.
    ///
    /// Paths with fewer than two points have length `0.0`.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let points = self.path.points();
        let mut n = points.len();
        if n < 2 {
            return 0.0;
        }
        if n > 2 && (points[0] - points[n - 2]).norm() < LOOP_CLOSURE_EPSILON {
            n -= 1;
        }
        points[..n].windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::InterpolationMode;
    use crate::geometry::ControlPointSet;
    use crate::math::Point3;
    use crate::operations::creation::BuildPath;
    use approx::assert_abs_diff_eq;

    fn path(points: &[(f64, f64, f64)], closed: bool) -> CurvePath {
        CurvePath::new(
            points.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect(),
            closed,
        )
    }

    #[test]
    fn line_length_3_4_5() {
        let p = path(&[(0.0, 0.0, 0.0), (3.0, 4.0, 0.0)], false);
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_path_has_zero_length() {
        let p = CurvePath::empty();
        assert!(MeasureLength::new(&p).execute().abs() < f64::EPSILON);
    }

    #[test]
    fn linear_length_is_sum_of_control_distances() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 2.0),
            Point3::new(4.0, 6.0, 2.0),
            Point3::new(4.0, 6.0, -1.0),
        ];
        let points = ControlPointSet::from_positions(&positions);
        let p = BuildPath::new(&points, InterpolationMode::Linear)
            .execute()
            .unwrap();
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), 3.0 + 5.0 + 3.0, epsilon = 1e-12);
    }

    #[test]
    fn duplicated_closing_point_is_not_counted() {
        // Square loop with the first two samples repeated at the end.
        let p = path(
            &[
                (0.0, 0.0, 0.0),
                (1.0, 0.0, 0.0),
                (1.0, 1.0, 0.0),
                (0.0, 1.0, 0.0),
                (0.0, 0.0, 0.0),
                (1.0, 0.0, 0.0),
            ],
            true,
        );
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn near_coincident_closing_point_is_not_counted() {
        let p = path(
            &[
                (0.0, 0.0, 0.0),
                (1.0, 0.0, 0.0),
                (1.0, 1.0, 0.0),
                (0.0, 1.0, 0.0),
                (0.0, 0.0, 1e-7),
                (1.0, 0.0, 0.0),
            ],
            true,
        );
        let expected = 3.0 + (1.0_f64 + 1e-14).sqrt();
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), expected, epsilon = 1e-12);
    }

    #[test]
    fn closed_linear_square_measures_perimeter() {
        let points = ControlPointSet::from_positions(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let p = BuildPath::new(&points, InterpolationMode::Linear)
            .with_closed(true)
            .execute()
            .unwrap();
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn two_point_path_is_never_trimmed() {
        let p = path(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0)], false);
        assert!(MeasureLength::new(&p).execute().abs() < f64::EPSILON);
        let p = path(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)], false);
        assert_abs_diff_eq!(MeasureLength::new(&p).execute(), 2.0, epsilon = 1e-12);
    }
}
