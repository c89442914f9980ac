pub mod control_point;
pub mod curve;
pub mod path;

pub use control_point::{ControlPoint, ControlPointSet};
pub use curve::{CardinalCurve, CardinalSpline, Curve, CurveDomain, SplineBoundary};
pub use path::CurvePath;
