//! Core mesh data structures.
//!
//! # Overview
//!
//! Two families of types: [`RawMesh`] is the untriangulated polygon mesh as
//! parsed from OFF/4OFF input (faces of arbitrary size referencing a shared
//! vertex list, plus the derived wireframe edge set), and [`TriMesh3`] /
//! [`TriMesh4`] are the strictly triangulated outputs produced by
//! [`crate::algo::triangulate`] and [`crate::algo::triangulate_4d`].
//!
//! The output types carry the bookkeeping the rendering side needs:
//! [`TriangleRange`] spans mapping each original face to the triangles it
//! became, and for 4D, [`TriCell`]s re-expressing each cell over the output
//! triangle list.
//!
//! Dimensionality is abstracted by the [`MeshPoint`] trait, implemented for
//! `nalgebra::Point3<f64>` and `nalgebra::Point4<f64>`.

mod point;
mod raw;
mod tri;

pub use point::MeshPoint;
pub use raw::{RawMesh, RawMesh3, RawMesh4};
pub use tri::{TriCell, TriMesh3, TriMesh4, TriangleRange};
