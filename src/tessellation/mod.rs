mod extrude_tube;
mod frame;
mod tube_profile;

pub use extrude_tube::ExtrudeTube;
pub use frame::{parallel_transport_frames, Frame};
pub use tube_profile::{TubeProfile, MIN_SIDES};

use crate::math::{Point3, Vector3};

/// A capped tube surface swept along a path.
///
/// Vertex layout: `ring_count` rings of `side_count` vertices each, in path
/// order, followed by the start cap center and the end cap center. An empty
/// mesh has no rings and no caps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle, counter-clockwise
    /// seen from outside).
    pub indices: Vec<[u32; 3]>,
    /// Number of cross-section rings.
    pub ring_count: usize,
    /// Vertices per ring.
    pub side_count: usize,
}

impl TubeMesh {
    /// Returns `true` if the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices of ring `index`, or `None` if out of range.
    #[must_use]
    pub fn ring(&self, index: usize) -> Option<&[Point3]> {
        if index >= self.ring_count {
            return None;
        }
        let start = index * self.side_count;
        self.vertices.get(start..start + self.side_count)
    }

    /// Returns the start and end cap center vertices.
    #[must_use]
    pub fn cap_centers(&self) -> Option<(Point3, Point3)> {
        let ring_vertices = self.ring_count * self.side_count;
        match self.vertices.get(ring_vertices..) {
            Some([start, end]) => Some((*start, *end)),
            _ => None,
        }
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}
