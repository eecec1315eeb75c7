//! Raw polygon meshes as read from OFF/4OFF input.
//!
//! A [`RawMesh`] is the untriangulated face-vertex form: vertex positions,
//! faces as ordered rings of vertex indices (arbitrary size, possibly
//! non-planar, possibly self-intersecting when projected), a derived wireframe
//! edge set, and — for polychora — cells as lists of face indices.

use std::collections::BTreeSet;

use nalgebra::{Point3, Point4};

use super::point::MeshPoint;
use crate::error::{MeshError, Result};

/// A raw 3D polygon mesh.
pub type RawMesh3 = RawMesh<Point3<f64>>;

/// A raw 4D polygon mesh (polychoron boundary).
pub type RawMesh4 = RawMesh<Point4<f64>>;

/// An untriangulated polygon mesh in `P`'s dimension.
///
/// Construction validates the combinatorial structure (face arity, index
/// ranges) and derives the canonical edge set. The topology itself is trusted:
/// no manifoldness or closedness checks are performed.
#[derive(Debug, Clone)]
pub struct RawMesh<P> {
    vertices: Vec<P>,
    faces: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    cells: Vec<Vec<usize>>,
}

impl<P: MeshPoint> RawMesh<P> {
    /// Build a mesh from vertices and polygonal faces.
    ///
    /// Fails with [`MeshError::InvalidFace`] for a face with fewer than three
    /// vertices and [`MeshError::InvalidVertexIndex`] for an out-of-range
    /// index.
    pub fn new(vertices: Vec<P>, faces: Vec<Vec<usize>>) -> Result<Self> {
        Self::with_cells(vertices, faces, Vec::new())
    }

    /// Build a mesh that additionally carries cells (lists of face indices).
    ///
    /// Cells are only meaningful for 4D meshes; pass an empty list otherwise.
    pub fn with_cells(
        vertices: Vec<P>,
        faces: Vec<Vec<usize>>,
        cells: Vec<Vec<usize>>,
    ) -> Result<Self> {
        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::InvalidFace {
                    face: fi,
                    count: face.len(),
                });
            }
            for &vi in face {
                if vi >= vertices.len() {
                    return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
                }
            }
        }
        for (ci, cell) in cells.iter().enumerate() {
            for &fi in cell {
                if fi >= faces.len() {
                    return Err(MeshError::InvalidFaceIndex { cell: ci, face: fi });
                }
            }
        }

        let edges = derive_edges(&faces);
        Ok(Self {
            vertices,
            faces,
            edges,
            cells,
        })
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[P] {
        &self.vertices
    }

    /// Faces as ordered vertex-index rings.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Canonical wireframe edges as `(min, max)` vertex-index pairs.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Cells as lists of face indices (empty for 3D meshes).
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Resolve the edge list to coordinate pairs against the current vertices.
    pub fn edge_points(&self) -> Vec<(P, P)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
            .collect()
    }
}

/// Derive the canonical edge set: every adjacent index pair of every face,
/// order-normalized to `(min, max)` and deduplicated.
fn derive_edges(faces: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut edges = BTreeSet::new();
    for face in faces {
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            if a != b {
                edges.insert((a.min(b), a.max(b)));
            }
        }
    }
    edges.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> RawMesh3 {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        RawMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_cube_edges_deduplicated() {
        let mesh = unit_cube();

        // 6 quads contribute 24 directed pairs; the cube has 12 edges.
        assert_eq!(mesh.edges().len(), 12);
        for &(a, b) in mesh.edges() {
            assert!(a < b, "edge ({}, {}) not canonicalized", a, b);
        }
    }

    #[test]
    fn test_edge_points_resolve_against_vertices() {
        let mesh = unit_cube();
        let pairs = mesh.edge_points();

        assert_eq!(pairs.len(), mesh.edges().len());
        let (a, b) = mesh.edges()[0];
        assert_eq!(pairs[0].0, mesh.vertices()[a]);
        assert_eq!(pairs[0].1, mesh.vertices()[b]);
    }

    #[test]
    fn test_face_with_too_few_vertices() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let result = RawMesh::new(vertices, vec![vec![0, 1]]);

        assert!(matches!(
            result,
            Err(MeshError::InvalidFace { face: 0, count: 2 })
        ));
    }

    #[test]
    fn test_face_with_invalid_vertex_index() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = RawMesh::new(vertices, vec![vec![0, 1, 7]]);

        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { face: 0, vertex: 7 })
        ));
    }

    #[test]
    fn test_cell_with_invalid_face_index() {
        let vertices = vec![
            Point4::new(0.0, 0.0, 0.0, 0.0),
            Point4::new(1.0, 0.0, 0.0, 0.0),
            Point4::new(0.0, 1.0, 0.0, 0.0),
        ];
        let result = RawMesh::with_cells(vertices, vec![vec![0, 1, 2]], vec![vec![0, 3]]);

        assert!(matches!(
            result,
            Err(MeshError::InvalidFaceIndex { cell: 0, face: 3 })
        ));
    }
}
