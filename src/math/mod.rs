pub mod tridiagonal;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which the first and second-to-last samples of a path are
/// considered the same point (loop already closed).
pub const LOOP_CLOSURE_EPSILON: f64 = 1e-5;
