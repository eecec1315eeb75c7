//! Triangulated output meshes.
//!
//! A `TriMesh*` is produced once per pipeline run and never mutated after
//! construction. The vertex list begins as a copy of the input vertices
//! (original indices are preserved) with any points introduced by
//! decomposition appended after them, so the input edge list remains valid
//! against the output vertex array.

use std::collections::BTreeMap;
use std::ops::Range;

use nalgebra::{Point3, Point4};

/// The contiguous span of output triangles one original face decomposed into.
///
/// Half-open: `start..end` indexes into the output triangle list. Spans are
/// disjoint, appear in original face order, and exactly cover the triangle
/// list. A face whose rings all degenerated away has an empty span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleRange {
    /// First output-triangle index of the span.
    pub start: usize,
    /// One past the last output-triangle index of the span.
    pub end: usize,
}

impl TriangleRange {
    /// Number of triangles in the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the face produced no triangles.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as an iterable index range.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A cell re-expressed over the output triangle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriCell {
    /// Number of original faces the cell was defined over.
    pub faces_count: usize,
    /// Flattened concatenation of the member faces' triangle spans.
    pub face_indices: Vec<usize>,
}

/// A strictly triangulated 3D mesh.
#[derive(Debug, Clone)]
pub struct TriMesh3 {
    pub(crate) vertices: Vec<Point3<f64>>,
    pub(crate) faces: Vec<[usize; 3]>,
    pub(crate) edges: Vec<(usize, usize)>,
    pub(crate) faces_map: Vec<TriangleRange>,
    pub(crate) ngons_in_faces: BTreeMap<usize, Vec<usize>>,
}

impl TriMesh3 {
    /// Vertex positions: the input vertices followed by appended points.
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Output triangles as vertex-index triples.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// The original wireframe edges, untouched by triangulation.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Per original face, the span of output triangles it produced.
    pub fn faces_map(&self) -> &[TriangleRange] {
        &self.faces_map
    }

    /// Diagnostic: polygon size to the original face indices of that size.
    pub fn ngons_in_faces(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.ngons_in_faces
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of output triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Resolve the edge list to coordinate pairs.
    pub fn edge_points(&self) -> Vec<(Point3<f64>, Point3<f64>)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
            .collect()
    }
}

/// A strictly triangulated 4D mesh (polychoron boundary).
#[derive(Debug, Clone)]
pub struct TriMesh4 {
    pub(crate) vertices: Vec<Point4<f64>>,
    pub(crate) faces: Vec<[usize; 3]>,
    pub(crate) edges: Vec<(usize, usize)>,
    pub(crate) faces_map: Vec<TriangleRange>,
    pub(crate) cells: Vec<TriCell>,
}

impl TriMesh4 {
    /// Vertex positions: the input vertices followed by appended points.
    pub fn vertices(&self) -> &[Point4<f64>] {
        &self.vertices
    }

    /// Output triangles as vertex-index triples.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// The original wireframe edges, untouched by triangulation.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Per original face, the span of output triangles it produced.
    pub fn faces_map(&self) -> &[TriangleRange] {
        &self.faces_map
    }

    /// Cells re-expressed over the output triangle list.
    pub fn cells(&self) -> &[TriCell] {
        &self.cells
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of output triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Resolve the edge list to coordinate pairs.
    pub fn edge_points(&self) -> Vec<(Point4<f64>, Point4<f64>)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
            .collect()
    }
}
