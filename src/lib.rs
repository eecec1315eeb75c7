//! # Offcut
//!
//! A triangulation pipeline for polyhedron and polychoron boundary meshes in
//! the OFF and 4OFF text formats.
//!
//! Input faces are arbitrary-size polygon rings that may be non-planar and
//! may self-intersect when flattened. Offcut reduces every face to triangles
//! and keeps the bookkeeping renderers need: a map from each original face to
//! the triangles it produced, the untouched wireframe edge set, and — for 4D
//! input — each cell re-expressed over the output triangle list.
//!
//! ## Features
//!
//! - **OFF / 4OFF parsing**: eager validation with line-accurate errors
//! - **Planar frames**: per-face rigid rotations into a 2D working plane,
//!   with exact inverses
//! - **Self-intersection handling**: contours are resolved into simple rings
//!   by polygon-clipping union before triangulation
//! - **Vertex deduplication**: reprojected triangle corners collapse onto
//!   existing vertices through a spatial-hash pool
//! - **Progress reporting**: throttled callbacks and a background-thread
//!   event channel for long batches
//!
//! ## Quick Start
//!
//! ```
//! use offcut::algo::{triangulate, TriangulateOptions};
//! use offcut::io::off;
//!
//! let text = "\
//! OFF
//! 4 1 4
//! 0 0 0
//! 1 0 0
//! 1 1 0
//! 0 1 0
//! 4 0 1 2 3
//! ";
//!
//! let mesh = off::parse_3d(text).unwrap();
//! let tri = triangulate(&mesh, &TriangulateOptions::default()).unwrap();
//!
//! assert_eq!(tri.num_triangles(), 2);
//! assert_eq!(tri.faces_map()[0].len(), 2);
//! ```
//!
//! ## Background runs
//!
//! Large batches are expected to run off the interactive thread. The
//! [`algo::spawn_triangulate`] entry point returns an event channel that
//! yields throttled progress reports followed by exactly one terminal
//! `Complete` or `Error` event.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use offcut::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        triangulate, triangulate_4d, PipelineEvent, Progress, TriangulateOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        MeshPoint, RawMesh, RawMesh3, RawMesh4, TriCell, TriMesh3, TriMesh4, TriangleRange,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::io::off;

    const CUBE: &str = "\
OFF
8 6 12
0 0 0
1 0 0
1 1 0
0 1 0
0 0 1
1 0 1
1 1 1
0 1 1
4 0 3 2 1
4 4 5 6 7
4 0 1 5 4
4 1 2 6 5
4 2 3 7 6
4 3 0 4 7
";

    #[test]
    fn test_cube_end_to_end() {
        let mesh = off::parse_3d(CUBE).unwrap();
        let tri = triangulate(&mesh, &TriangulateOptions::default()).unwrap();

        assert_eq!(tri.num_vertices(), 8);
        assert_eq!(tri.num_triangles(), 12);
        assert_eq!(tri.edges().len(), 12);

        // faces_map partitions the output triangle list in face order.
        let mut covered = 0;
        for (range, face) in tri.faces_map().iter().zip(mesh.faces()) {
            assert_eq!(range.start, covered);
            assert_eq!(range.len(), face.len() - 2);
            covered = range.end;
        }
        assert_eq!(covered, tri.num_triangles());

        // Every triangle references valid vertices.
        for face in tri.faces() {
            for &vi in face {
                assert!(vi < tri.num_vertices());
            }
        }
    }
}
