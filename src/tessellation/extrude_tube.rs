use crate::geometry::CurvePath;

use super::frame::parallel_transport_frames;
use super::tube_profile::TubeProfile;
use super::TubeMesh;

/// Sweeps a circular cross-section along a path into a capped tube.
///
/// Each path vertex gets a ring of `side_count` vertices at exactly `radius`
/// from it, in the plane perpendicular to the local tangent. Consecutive
/// rings are joined by two triangles per side and both ends are closed with
/// a triangle fan to a center vertex, so a well-formed path yields a closed
/// 2-manifold.
#[derive(Debug)]
pub struct ExtrudeTube<'a> {
    path: &'a CurvePath,
    profile: TubeProfile,
}

impl<'a> ExtrudeTube<'a> {
    /// Creates a new tube extrusion operation.
    #[must_use]
    pub fn new(path: &'a CurvePath, profile: TubeProfile) -> Self {
        Self { path, profile }
    }

    /// Executes the extrusion.
    ///
    /// An empty path produces an empty mesh.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn execute(&self) -> TubeMesh {
        let points = self.path.points();
        let frames = parallel_transport_frames(points);
        if frames.is_empty() {
            return TubeMesh::default();
        }

        let sides = self.profile.side_count();
        let radius = self.profile.radius();
        let angles = self.profile.ring_angles();
        let rings = points.len();

        let vertex_count = rings * sides + 2;
        let mut vertices = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(2 * sides * rings);

        for (center, frame) in points.iter().zip(&frames) {
            for &(cos_a, sin_a) in &angles {
                let radial = frame.normal * cos_a + frame.binormal * sin_a;
                vertices.push(center + radial * radius);
                normals.push(radial);
            }
        }

        let index = |ring: usize, side: usize| (ring * sides + side % sides) as u32;

        for ring in 0..rings - 1 {
            for side in 0..sides {
                let curr = index(ring, side);
                let next_side = index(ring, side + 1);
                let next_ring = index(ring + 1, side);
                let next_both = index(ring + 1, side + 1);
                indices.push([curr, next_side, next_ring]);
                indices.push([next_side, next_both, next_ring]);
            }
        }

        let first = frames[0];
        let last = frames[rings - 1];
        let start_center = vertices.len() as u32;
        vertices.push(points[0]);
        normals.push(-first.tangent);
        let end_center = vertices.len() as u32;
        vertices.push(points[rings - 1]);
        normals.push(last.tangent);

        for side in 0..sides {
            indices.push([start_center, index(0, side + 1), index(0, side)]);
            indices.push([end_center, index(rings - 1, side), index(rings - 1, side + 1)]);
        }

        tracing::trace!(rings, sides, triangles = indices.len(), "extruded tube");

        TubeMesh {
            vertices,
            normals,
            indices,
            ring_count: rings,
            side_count: sides,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::math::Point3;
    use approx::assert_abs_diff_eq;

    fn profile(radius: f64, sides: usize) -> TubeProfile {
        TubeProfile::new(radius, sides).unwrap()
    }

    fn path(points: &[(f64, f64, f64)]) -> CurvePath {
        CurvePath::new(
            points.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect(),
            false,
        )
    }

    /// Every directed edge appears once and its reverse appears once.
    fn assert_closed_manifold(mesh: &TubeMesh) {
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for tri in &mesh.indices {
            for k in 0..3 {
                *directed.entry((tri[k], tri[(k + 1) % 3])).or_default() += 1;
            }
        }
        for (&(a, b), &count) in &directed {
            assert_eq!(count, 1, "edge {a}->{b} used {count} times");
            assert_eq!(directed.get(&(b, a)), Some(&1), "edge {a}->{b} has no twin");
        }
    }

    #[test]
    fn straight_two_point_tube() {
        let p = path(&[(0.0, 0.0, 0.0), (0.0, 0.0, 10.0)]);
        let mesh = ExtrudeTube::new(&p, profile(2.0, 12)).execute();

        assert_eq!(mesh.ring_count, 2);
        assert_eq!(mesh.side_count, 12);
        assert_eq!(mesh.vertices.len(), 2 * 12 + 2);
        // 12 side quads + 2 fans of 12.
        assert_eq!(mesh.triangle_count(), 2 * 12 + 2 * 12);

        for (ring, center) in p.points().iter().enumerate() {
            for v in mesh.ring(ring).unwrap() {
                assert_abs_diff_eq!((v - center).norm(), 2.0, epsilon = 1e-12);
                assert_abs_diff_eq!(v.z, center.z, epsilon = 1e-12);
            }
        }
        let (start, end) = mesh.cap_centers().unwrap();
        assert_eq!(start, p.points()[0]);
        assert_eq!(end, p.points()[1]);
    }

    #[test]
    fn bent_tube_rings_are_perpendicular_to_tangent() {
        let p = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (10.0, 10.0, 0.0)]);
        let mesh = ExtrudeTube::new(&p, profile(5.0, 20)).execute();
        assert_eq!(mesh.vertices.len(), 3 * 20 + 2);

        let frames = parallel_transport_frames(p.points());
        for (ring, (center, frame)) in p.points().iter().zip(&frames).enumerate() {
            for v in mesh.ring(ring).unwrap() {
                let offset = v - center;
                assert_abs_diff_eq!(offset.norm(), 5.0, epsilon = 1e-9);
                assert_abs_diff_eq!(offset.dot(&frame.tangent), 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn tube_is_watertight() {
        let p = path(&[
            (0.0, 0.0, 0.0),
            (3.0, 1.0, 0.0),
            (4.0, 4.0, 2.0),
            (1.0, 5.0, 3.0),
        ]);
        let mesh = ExtrudeTube::new(&p, profile(0.5, 7)).execute();
        assert_closed_manifold(&mesh);
    }

    #[test]
    fn side_faces_point_outward() {
        let p = path(&[(0.0, 0.0, 0.0), (0.0, 0.0, 4.0)]);
        let mesh = ExtrudeTube::new(&p, profile(1.0, 8)).execute();
        let axis_mid = Point3::new(0.0, 0.0, 2.0);
        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
            let normal = (b - a).cross(&(c - a));
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            assert!(
                normal.dot(&(centroid - axis_mid)) > 0.0,
                "triangle {tri:?} faces inward"
            );
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let p = path(&[(0.0, 0.0, 0.0), (1.0, 2.0, 0.0), (2.0, 2.0, 1.0)]);
        let mesh = ExtrudeTube::new(&p, profile(0.3, 5)).execute();
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        for n in &mesh.normals {
            assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_path_gives_empty_mesh() {
        let p = CurvePath::empty();
        let mesh = ExtrudeTube::new(&p, profile(1.0, 20)).execute();
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
        assert!(mesh.cap_centers().is_none());
    }
}
