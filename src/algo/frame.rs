//! Planar frame solver.
//!
//! A face's vertices live on (or near) a 2-plane embedded in 3- or 4-space.
//! Triangulation and self-intersection splitting both work in 2D, so each
//! face gets a [`PlanarFrame`]: a rigid rotation carrying the face's
//! supporting plane onto the canonical subspace where the trailing
//! coordinate(s) are constant, together with its exact inverse and the
//! recorded constant offset(s).
//!
//! Rotations are orthonormal, so projecting a point into the frame and back
//! reproduces it up to floating-point rounding. That round-trip is what lets
//! the vertex pool collapse reprojected polygon corners onto their original
//! vertex indices.

use nalgebra::{Matrix4, Point2, Point3, Point4, Rotation3, Vector3, Vector4};

use crate::error::{MeshError, Result};
use crate::mesh::MeshPoint;

/// Below this length a normal or basis residual counts as degenerate.
const DEGENERACY_EPS: f64 = 1e-12;

/// A per-face rotation frame: project into the 2D working plane, and map 2D
/// results back into the original space.
pub trait PlanarFrame: Sized {
    /// The point type this frame operates on.
    type Point: MeshPoint;

    /// Build the frame from a face's ordered vertices (at least three).
    ///
    /// `face` is the face index, used for error context. Fails with
    /// [`MeshError::DegenerateFace`] when no supporting plane exists.
    fn from_face(points: &[Self::Point], face: usize) -> Result<Self>;

    /// Rotate a point into the frame and drop the constant coordinates.
    fn project(&self, point: &Self::Point) -> Point2<f64>;

    /// Restore the constant coordinates and apply the inverse rotation.
    fn unproject(&self, point: &Point2<f64>) -> Self::Point;
}

/// 3D frame: two successive axis rotations aligning the face normal with Z.
#[derive(Debug, Clone)]
pub struct Frame3 {
    rotation: Rotation3<f64>,
    inverse: Rotation3<f64>,
    plane_z: f64,
}

impl PlanarFrame for Frame3 {
    type Point = Point3<f64>;

    fn from_face(points: &[Point3<f64>], face: usize) -> Result<Self> {
        let normal = (points[1] - points[0]).cross(&(points[2] - points[0]));
        if normal.norm() <= DEGENERACY_EPS {
            return Err(MeshError::DegenerateFace {
                face,
                reason: "zero-length normal",
            });
        }
        let n = normal.normalize();

        // Rotate about X by theta to zero the normal's Y component, then
        // about Y by phi to zero its X component, leaving it along +Z.
        let theta = n.y.atan2(n.z);
        let phi = (-n.x).atan2((n.y * n.y + n.z * n.z).sqrt());
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), phi)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), theta);
        let inverse = rotation.inverse();
        let plane_z = (rotation * points[0]).z;

        Ok(Self {
            rotation,
            inverse,
            plane_z,
        })
    }

    fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let rotated = self.rotation * point;
        Point2::new(rotated.x, rotated.y)
    }

    fn unproject(&self, point: &Point2<f64>) -> Point3<f64> {
        self.inverse * Point3::new(point.x, point.y, self.plane_z)
    }
}

/// 4D frame: a full orthonormal 4x4 rotation built by Gram-Schmidt from two
/// in-plane edge vectors, inverted by transposition.
#[derive(Debug, Clone)]
pub struct Frame4 {
    rotation: Matrix4<f64>,
    inverse: Matrix4<f64>,
    plane_z: f64,
    plane_w: f64,
}

impl PlanarFrame for Frame4 {
    type Point = Point4<f64>;

    fn from_face(points: &[Point4<f64>], face: usize) -> Result<Self> {
        let d1 = points[1] - points[0];
        if d1.norm() <= DEGENERACY_EPS {
            return Err(MeshError::DegenerateFace {
                face,
                reason: "zero-length edge",
            });
        }
        let u1 = d1.normalize();

        let d2 = points[2] - points[0];
        let v2 = d2 - u1 * d2.dot(&u1);
        if v2.norm() <= DEGENERACY_EPS {
            return Err(MeshError::DegenerateFace {
                face,
                reason: "collinear in-plane basis",
            });
        }
        let u2 = v2.normalize();

        // Complete to an orthonormal basis of R^4 from the standard axes,
        // largest residual first.
        let mut basis = vec![u1, u2];
        while basis.len() < 4 {
            let mut best = Vector4::zeros();
            let mut best_norm = 0.0;
            for axis in 0..4 {
                let mut candidate = Vector4::zeros();
                candidate[axis] = 1.0;
                for b in &basis {
                    let along = candidate.dot(b);
                    candidate -= b * along;
                }
                let norm = candidate.norm();
                if norm > best_norm {
                    best_norm = norm;
                    best = candidate;
                }
            }
            if best_norm <= DEGENERACY_EPS {
                return Err(MeshError::DegenerateFace {
                    face,
                    reason: "rank-deficient basis",
                });
            }
            basis.push(best / best_norm);
        }

        let mut rotation = Matrix4::from_rows(&[
            basis[0].transpose(),
            basis[1].transpose(),
            basis[2].transpose(),
            basis[3].transpose(),
        ]);
        // Flip the last row if needed so the map is a proper rotation.
        if rotation.determinant() < 0.0 {
            let flipped = -rotation.row(3).clone_owned();
            rotation.set_row(3, &flipped);
        }
        let inverse = rotation.transpose();

        let r0 = rotation * points[0].coords;
        Ok(Self {
            rotation,
            inverse,
            plane_z: r0.z,
            plane_w: r0.w,
        })
    }

    fn project(&self, point: &Point4<f64>) -> Point2<f64> {
        let rotated = self.rotation * point.coords;
        Point2::new(rotated.x, rotated.y)
    }

    fn unproject(&self, point: &Point2<f64>) -> Point4<f64> {
        Point4::from(self.inverse * Vector4::new(point.x, point.y, self.plane_z, self.plane_w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Regular pentagon in a plane tilted out of every coordinate plane.
    fn skewed_pentagon() -> Vec<Point3<f64>> {
        let axis_u = Vector3::new(1.0, 0.2, -0.3).normalize();
        let axis_v = {
            let raw = Vector3::new(0.1, 1.0, 0.4);
            (raw - axis_u * raw.dot(&axis_u)).normalize()
        };
        let center = Point3::new(0.5, -1.0, 2.0);
        (0..5)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / 5.0;
                center + axis_u * angle.cos() + axis_v * angle.sin()
            })
            .collect()
    }

    #[test]
    fn test_frame3_flattens_planar_face() {
        let points = skewed_pentagon();
        let frame = Frame3::from_face(&points, 0).unwrap();

        // Every in-plane point must rotate to the same z.
        let z0 = (frame.rotation * points[0]).z;
        for p in &points {
            let rotated = frame.rotation * p;
            assert!(
                (rotated.z - z0).abs() < 1e-9,
                "point {:?} rotated to z {} instead of {}",
                p,
                rotated.z,
                z0
            );
        }
    }

    #[test]
    fn test_frame3_round_trip() {
        let points = skewed_pentagon();
        let frame = Frame3::from_face(&points, 0).unwrap();

        for p in &points {
            let restored = frame.unproject(&frame.project(p));
            assert!(
                (restored - p).norm() < 1e-9,
                "round trip moved {:?} to {:?}",
                p,
                restored
            );
        }
    }

    #[test]
    fn test_frame3_degenerate_normal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let result = Frame3::from_face(&points, 7);

        assert!(matches!(
            result,
            Err(MeshError::DegenerateFace { face: 7, .. })
        ));
    }

    #[test]
    fn test_frame3_axis_aligned_normal() {
        // Normal along +X exercises the atan2(_, 0) branch.
        let points = vec![
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
        ];
        let frame = Frame3::from_face(&points, 0).unwrap();

        for p in &points {
            let restored = frame.unproject(&frame.project(p));
            assert!((restored - p).norm() < 1e-12);
        }
    }

    #[test]
    fn test_frame4_constant_trailing_coordinates() {
        // A quad spanning a plane oblique to all four axes.
        let origin = Point4::new(0.3, -0.2, 1.0, 2.0);
        let u = Vector4::new(1.0, 1.0, 0.5, -0.25).normalize();
        let v = {
            let raw = Vector4::new(-0.5, 1.0, 1.0, 0.75);
            (raw - u * raw.dot(&u)).normalize()
        };
        let points: Vec<Point4<f64>> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(a, b)| origin + u * a + v * b)
            .collect();

        let frame = Frame4::from_face(&points, 0).unwrap();
        for p in &points {
            let rotated = frame.rotation * p.coords;
            assert!((rotated.z - frame.plane_z).abs() < 1e-9);
            assert!((rotated.w - frame.plane_w).abs() < 1e-9);
        }
    }

    #[test]
    fn test_frame4_round_trip() {
        let points = vec![
            Point4::new(1.0, 0.0, 0.0, 1.0),
            Point4::new(0.0, 1.0, 0.0, 1.0),
            Point4::new(0.0, 0.0, 1.0, 1.0),
        ];
        let frame = Frame4::from_face(&points, 0).unwrap();

        for p in &points {
            let restored = frame.unproject(&frame.project(p));
            assert!(
                (restored - p).norm() < 1e-9,
                "round trip moved {:?} to {:?}",
                p,
                restored
            );
        }
    }

    #[test]
    fn test_frame4_rotation_is_orthonormal() {
        let points = vec![
            Point4::new(0.0, 0.0, 0.0, 0.0),
            Point4::new(1.0, 2.0, 3.0, 4.0),
            Point4::new(-2.0, 1.0, 0.5, 1.0),
        ];
        let frame = Frame4::from_face(&points, 0).unwrap();

        let product = frame.rotation * frame.inverse;
        let identity = Matrix4::identity();
        assert!((product - identity).norm() < 1e-10);
        assert!((frame.rotation.determinant() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_frame4_collinear_basis() {
        let points = vec![
            Point4::new(0.0, 0.0, 0.0, 0.0),
            Point4::new(1.0, 1.0, 1.0, 1.0),
            Point4::new(2.0, 2.0, 2.0, 2.0),
        ];
        let result = Frame4::from_face(&points, 3);

        assert!(matches!(
            result,
            Err(MeshError::DegenerateFace { face: 3, .. })
        ));
    }
}
