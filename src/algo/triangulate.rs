//! Simple-polygon triangulation.
//!
//! Each [`SubPolygon`] coming out of decomposition is simple, so it can be
//! triangulated directly. The rings are flattened into earcut's interleaved
//! coordinate layout (exterior first, then holes, with hole start offsets)
//! and the resulting index triples are mapped back to 2D points. A hole-free
//! ring of `k` vertices always yields exactly `k - 2` triangles, built from
//! the input points only.

use nalgebra::Point2;

use super::decompose::SubPolygon;
use crate::error::{MeshError, Result};

/// Triangulate one simple ring (plus holes) into 2D point triples.
///
/// `face` is the owning face index, used for error context. Failure is
/// propagated as [`MeshError::Triangulation`], never retried.
pub fn triangulate_ring(sub: &SubPolygon, face: usize) -> Result<Vec<[Point2<f64>; 3]>> {
    let total = sub.exterior.len() + sub.holes.iter().map(Vec::len).sum::<usize>();
    let mut flattened = Vec::with_capacity(total * 2);
    let mut points = Vec::with_capacity(total);

    for p in &sub.exterior {
        flattened.push(p.x);
        flattened.push(p.y);
        points.push(*p);
    }
    let mut hole_indices = Vec::with_capacity(sub.holes.len());
    for hole in &sub.holes {
        hole_indices.push(points.len());
        for p in hole {
            flattened.push(p.x);
            flattened.push(p.y);
            points.push(*p);
        }
    }

    let indices = earcutr::earcut(&flattened, &hole_indices, 2).map_err(|e| {
        MeshError::Triangulation {
            face,
            message: format!("{:?}", e),
        }
    })?;

    Ok(indices
        .chunks_exact(3)
        .map(|tri| [points[tri[0]], points[tri[1]], points[tri[2]]])
        .collect())
}
