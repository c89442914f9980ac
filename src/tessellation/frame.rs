use nalgebra::Rotation3;

use crate::math::{Point3, Vector3};

/// Orthonormal frame at a path vertex.
///
/// `binormal = tangent × normal`, so `(tangent, normal, binormal)` is
/// right-handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Unit direction of travel along the path.
    pub tangent: Vector3,
    /// Unit vector perpendicular to the tangent, carried without twist.
    pub normal: Vector3,
    /// `tangent × normal`.
    pub binormal: Vector3,
}

impl Frame {
    /// Builds a frame around `tangent` with an arbitrary perpendicular normal.
    fn from_tangent(tangent: Vector3) -> Self {
        Self::with_normal_hint(tangent, perpendicular(&tangent))
    }

    /// Builds a frame around `tangent`, keeping the normal as close to `hint`
    /// as possible.
    fn with_normal_hint(tangent: Vector3, hint: Vector3) -> Self {
        let projected = hint - tangent * tangent.dot(&hint);
        let normal = projected
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(|| perpendicular(&tangent));
        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }
}

/// Computes rotation-minimizing frames at every vertex of a polyline.
///
/// Interior tangents bisect the incoming and outgoing segment directions.
/// Zero-length segments reuse the last valid tangent. Each normal is the
/// previous normal rotated by the smallest rotation between consecutive
/// tangents, so the frame does not twist around the path.
#[must_use]
pub fn parallel_transport_frames(points: &[Point3]) -> Vec<Frame> {
    if points.len() < 2 {
        return Vec::new();
    }

    let tangents = vertex_tangents(points);
    let mut frames: Vec<Frame> = Vec::with_capacity(points.len());
    frames.push(Frame::from_tangent(tangents[0]));

    for tangent in tangents.into_iter().skip(1) {
        let prev = frames[frames.len() - 1];
        let carried = Rotation3::rotation_between(&prev.tangent, &tangent)
            .map_or(prev.normal, |rotation| rotation * prev.normal);
        frames.push(Frame::with_normal_hint(tangent, carried));
    }

    frames
}

fn vertex_tangents(points: &[Point3]) -> Vec<Vector3> {
    let n = points.len();
    let segments: Vec<Option<Vector3>> = points
        .windows(2)
        .map(|w| (w[1] - w[0]).try_normalize(f64::EPSILON))
        .collect();

    // Fallback for a fully stationary path.
    let first_valid = segments.iter().flatten().next().copied().unwrap_or(Vector3::z());

    let mut tangents = Vec::with_capacity(n);
    let mut last = first_valid;
    for i in 0..n {
        let incoming = if i > 0 { segments[i - 1] } else { None };
        let outgoing = segments.get(i).copied().flatten();
        let tangent = match (incoming, outgoing) {
            (Some(a), Some(b)) => (a + b).try_normalize(f64::EPSILON).unwrap_or(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => last,
        };
        last = tangent;
        tangents.push(tangent);
    }
    tangents
}

/// Returns a unit vector perpendicular to `v`, built from the world axis
/// least aligned with it.
fn perpendicular(v: &Vector3) -> Vector3 {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::y())
}
