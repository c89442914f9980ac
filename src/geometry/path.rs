use crate::math::Point3;

/// A dense ordered polyline sampled from a set of control points.
///
/// A path is either empty or holds at least two points. `closed` records
/// that the path was built as a loop; the polyline itself is always stored
/// explicitly, including any repeated closing samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePath {
    points: Vec<Point3>,
    closed: bool,
}

impl CurvePath {
    /// Creates a path from sampled points.
    ///
    /// Fewer than 2 points produce an empty path.
    #[must_use]
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        if points.len() < 2 {
            return Self::empty();
        }
        Self { points, closed }
    }

    /// Creates an empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the sampled points in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns whether the path was built as a loop.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the number of sampled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of line segments between consecutive samples.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_collapses_to_empty() {
        let path = CurvePath::new(vec![Point3::origin()], false);
        assert!(path.is_empty());
        assert_eq!(path.segment_count(), 0);
    }

    #[test]
    fn segment_count_open() {
        let path = CurvePath::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            false,
        );
        assert_eq!(path.len(), 3);
        assert_eq!(path.segment_count(), 2);
        assert!(!path.is_closed());
    }
}
