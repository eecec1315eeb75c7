//! Point dimensionality seam.
//!
//! The pipeline is identical for polyhedra (3D) and polychora (4D) except for
//! the coordinate count and the planar-frame construction. [`MeshPoint`]
//! abstracts the former so the batch machinery, the vertex pool, and the mesh
//! containers can be written once.

use nalgebra::{Point3, Point4};

/// A fixed-dimension mesh vertex position.
///
/// Implemented for [`Point3<f64>`] and [`Point4<f64>`].
pub trait MeshPoint: Copy + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Number of coordinates.
    const DIM: usize;

    /// Coordinate along the given axis (0-based).
    fn coord(&self, axis: usize) -> f64;

    /// Whether every coordinate of `other` is within `tolerance` of this
    /// point's corresponding coordinate.
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (0..Self::DIM).all(|axis| (self.coord(axis) - other.coord(axis)).abs() <= tolerance)
    }

    /// Spatial-hash grid cell for this point. Unused trailing axes stay zero
    /// so 3D and 4D keys share one map type.
    fn grid_key(&self, inv_cell: f64) -> [i64; 4] {
        let mut key = [0i64; 4];
        for axis in 0..Self::DIM {
            key[axis] = (self.coord(axis) * inv_cell).floor() as i64;
        }
        key
    }
}

impl MeshPoint for Point3<f64> {
    const DIM: usize = 3;

    fn coord(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl MeshPoint for Point4<f64> {
    const DIM: usize = 4;

    fn coord(&self, axis: usize) -> f64 {
        self[axis]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_is_per_coordinate() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(1.0 + 5e-7, 2.0 - 5e-7, 3.0);

        assert!(p.approx_eq(&q, 1e-6));
        assert!(!p.approx_eq(&q, 1e-8));
    }

    #[test]
    fn test_approx_eq_rejects_single_bad_axis() {
        let p = Point4::new(0.0, 0.0, 0.0, 0.0);
        let q = Point4::new(0.0, 0.0, 0.0, 1e-3);

        assert!(!p.approx_eq(&q, 1e-6));
    }

    #[test]
    fn test_grid_key_pads_unused_axes() {
        let p = Point3::new(0.5, -0.5, 2.5);
        let key = p.grid_key(1.0);

        assert_eq!(key, [0, -1, 2, 0]);
    }
}
