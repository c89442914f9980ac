use crate::math::Point3;

/// A user-placed 3D landmark with an optional display label.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    position: Point3,
    label: Option<String>,
}

impl ControlPoint {
    /// Creates an unlabeled control point.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            label: None,
        }
    }

    /// Creates a labeled control point.
    #[must_use]
    pub fn labeled(position: Point3, label: impl Into<String>) -> Self {
        Self {
            position,
            label: Some(label.into()),
        }
    }

    /// Returns the position.
    #[must_use]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Returns the label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An ordered sequence of control points.
///
/// Order defines the curve parametrization: point `i` sits at `t = i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPointSet {
    points: Vec<ControlPoint>,
}

impl ControlPointSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set of unlabeled points.
    #[must_use]
    pub fn from_positions(positions: &[Point3]) -> Self {
        positions.iter().copied().map(ControlPoint::new).collect()
    }

    /// Appends a point.
    pub fn push(&mut self, point: ControlPoint) {
        self.points.push(point);
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ControlPoint> {
        self.points.iter()
    }

    /// Collects the positions in order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(ControlPoint::position).collect()
    }
}

impl FromIterator<ControlPoint> for ControlPointSet {
    fn from_iter<I: IntoIterator<Item = ControlPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ControlPointSet {
    type Item = &'a ControlPoint;
    type IntoIter = std::slice::Iter<'a, ControlPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
