//! Error types for offcut.
//!
//! This module defines all error types used throughout the library.
//! Every error is fatal to the run that raised it: the first failure aborts
//! remaining work and surfaces as the pipeline's terminal result.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while parsing or triangulating a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input text does not start with the expected format tag.
    #[error("expected format tag `{expected}`, found {found:?}")]
    Format {
        /// The tag (or tags) that would have been accepted.
        expected: &'static str,
        /// The first content line actually found.
        found: String,
    },

    /// A malformed header, coordinate, face, or cell line.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// A face with fewer than three vertices.
    #[error("face {face} has {count} vertices; a face needs at least 3")]
    InvalidFace {
        /// The face index.
        face: usize,
        /// The declared vertex count.
        count: usize,
    },

    /// A face references a vertex index outside the vertex list.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A cell references a face index outside the face list.
    #[error("cell {cell} references invalid face index {face}")]
    InvalidFaceIndex {
        /// The cell index.
        cell: usize,
        /// The invalid face index.
        face: usize,
    },

    /// A face whose supporting plane could not be established.
    #[error("face {face} is degenerate ({reason})")]
    DegenerateFace {
        /// The face index.
        face: usize,
        /// Which geometric construction failed.
        reason: &'static str,
    },

    /// Triangulation failed on one of a face's sub-polygons.
    #[error("face {face}: triangulation failed: {message}")]
    Triangulation {
        /// The face index.
        face: usize,
        /// Error reported by the triangulator.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
