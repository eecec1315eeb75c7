//! Append-only vertex pool with spatial-hash deduplication.
//!
//! Reprojected triangle corners must resolve to global vertex indices:
//! corners that round-trip onto an existing vertex reuse its index, anything
//! genuinely new is appended. A grid spatial hash (cell side twice the merge
//! tolerance, probing the 3^DIM neighborhood) keeps resolution at expected
//! O(1) instead of a linear scan over the growing vertex list.
//!
//! Indices are never invalidated or reordered; the pool is seeded with the
//! input vertex list so original vertices keep their original indices.

use std::collections::HashMap;

use crate::mesh::MeshPoint;

/// Growable vertex buffer with tolerance-based duplicate resolution.
#[derive(Debug)]
pub struct VertexPool<P: MeshPoint> {
    points: Vec<P>,
    cells: HashMap<[i64; 4], Vec<usize>>,
    inv_cell: f64,
    tolerance: f64,
}

impl<P: MeshPoint> VertexPool<P> {
    /// Create an empty pool merging points within `tolerance` per coordinate.
    pub fn new(tolerance: f64) -> Self {
        Self::seeded(Vec::new(), tolerance)
    }

    /// Create a pool pre-populated with `points`, preserving their indices.
    /// Seed points are inserted as-is, without merging.
    pub fn seeded(points: Vec<P>, tolerance: f64) -> Self {
        let tolerance = tolerance.max(f64::EPSILON);
        let mut pool = Self {
            points: Vec::with_capacity(points.len()),
            cells: HashMap::new(),
            // Cell size 2x tolerance keeps duplicates in adjacent cells.
            inv_cell: 1.0 / (tolerance * 2.0),
            tolerance,
        };
        for point in points {
            pool.append(point);
        }
        pool
    }

    /// Resolve a point to an index: an existing point with every coordinate
    /// within tolerance, or a newly appended slot.
    pub fn resolve(&mut self, point: P) -> usize {
        let key = point.grid_key(self.inv_cell);
        let w_range = if P::DIM == 4 { -1..=1 } else { 0..=0 };
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    for dw in w_range.clone() {
                        let neighbor = [key[0] + dx, key[1] + dy, key[2] + dz, key[3] + dw];
                        if let Some(bucket) = self.cells.get(&neighbor) {
                            for &index in bucket {
                                if self.points[index].approx_eq(&point, self.tolerance) {
                                    return index;
                                }
                            }
                        }
                    }
                }
            }
        }
        self.append(point)
    }

    fn append(&mut self, point: P) -> usize {
        let index = self.points.len();
        self.cells
            .entry(point.grid_key(self.inv_cell))
            .or_default()
            .push(index);
        self.points.push(point);
        index
    }

    /// Number of points in the pool.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the pool holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the pool, returning the vertex buffer.
    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Point4};

    #[test]
    fn test_resolve_is_idempotent() {
        let mut pool = VertexPool::new(1e-6);
        let p = Point3::new(1.0, 2.0, 3.0);

        let first = pool.resolve(p);
        let second = pool.resolve(p);

        assert_eq!(first, second);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_near_duplicate_merges() {
        let mut pool = VertexPool::new(1e-6);
        let a = pool.resolve(Point3::new(1.0, 2.0, 3.0));
        let b = pool.resolve(Point3::new(1.0 + 5e-7, 2.0, 3.0 - 5e-7));

        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_distant_point_appends() {
        let mut pool = VertexPool::new(1e-6);
        let a = pool.resolve(Point3::new(1.0, 2.0, 3.0));
        let b = pool.resolve(Point3::new(1.0 + 1e-3, 2.0, 3.0));

        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_seeded_pool_preserves_indices() {
        let seeds = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut pool = VertexPool::seeded(seeds.clone(), 1e-6);

        for (i, seed) in seeds.iter().enumerate() {
            assert_eq!(pool.resolve(*seed), i);
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.into_points(), seeds);
    }

    #[test]
    fn test_duplicates_across_cell_boundary() {
        // Points on opposite sides of a grid cell boundary but within
        // tolerance must still merge.
        let mut pool = VertexPool::new(0.1);
        let a = pool.resolve(Point3::new(0.199, 0.0, 0.0));
        let b = pool.resolve(Point3::new(0.201, 0.0, 0.0));

        assert_eq!(a, b);
    }

    #[test]
    fn test_four_dimensional_resolution() {
        let mut pool = VertexPool::new(1e-6);
        let a = pool.resolve(Point4::new(1.0, 2.0, 3.0, 4.0));
        let same = pool.resolve(Point4::new(1.0, 2.0, 3.0, 4.0 + 1e-8));
        let other = pool.resolve(Point4::new(1.0, 2.0, 3.0, 4.1));

        assert_eq!(a, same);
        assert_ne!(a, other);
        assert_eq!(pool.len(), 2);
    }
}
