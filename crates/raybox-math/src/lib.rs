#![warn(missing_docs)]

//! Math types for the raybox renderer.
//!
//! Thin wrappers around nalgebra providing the vector algebra the tracer
//! needs: points, vectors, rays, rotations, and the tolerance constants
//! used to keep intersection tests numerically stable.

mod ray;

pub use ray::{faceforward, reflect, Ray};

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in 2D parameter space (texture u, v).
pub type Point2 = nalgebra::Point2<f64>;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All three axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector pointing along the positive axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }

    /// Indices of the two remaining axes, in ascending order.
    ///
    /// These span the plane perpendicular to `self` and are used as the
    /// (u, v) parameterization of axis-aligned faces.
    pub fn others(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        }
    }
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to a point applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }
}

/// Tolerance constants for intersection tests.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Minimum distance along a ray for a hit to count.
    ///
    /// Hits closer than this are treated as self-intersections of the
    /// surface the ray started on.
    pub hit: f64,
    /// Below this magnitude a direction component is treated as zero.
    pub parallel: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 hit distance, 1e-9 parallel threshold).
    pub const DEFAULT: Self = Self {
        hit: 1e-6,
        parallel: 1e-9,
    };

    /// Check if a hit distance lies in front of the ray origin.
    pub fn in_front(&self, distance: f64) -> bool {
        distance > self.hit
    }

    /// Check if a direction component is effectively zero.
    pub fn is_parallel(&self, component: f64) -> bool {
        component.abs() < self.parallel
    }

    /// Check if two hit distances coincide.
    pub fn same_distance(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.hit
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_translation_ignored_for_vectors() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((p.x - 11.0).abs() < 1e-12);
        assert!((p.y - 22.0).abs() < 1e-12);
        assert!((p.z - 33.0).abs() < 1e-12);

        let v = t.apply_vec(&Vec3::new(1.0, 2.0, 3.0));
        assert!((v - Vec3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_x_90() {
        let t = Transform::rotation_x(PI / 2.0);
        let v = t.apply_vec(&Vec3::z());
        assert!(v.x.abs() < 1e-12);
        assert!((v.y + 1.0).abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_y_90() {
        let t = Transform::rotation_y(PI / 2.0);
        let v = t.apply_vec(&Vec3::z());
        assert!((v.x - 1.0).abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        // rotate (1,0,0) about Z to (0,1,0), then translate by (0,0,5)
        let t = Transform::translation(0.0, 0.0, 5.0).then(&Transform::rotation_z(PI / 2.0));
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!((p.z - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_others_span_perpendicular_plane() {
        for axis in Axis::ALL {
            let (a, b) = axis.others();
            assert_ne!(a, axis.index());
            assert_ne!(b, axis.index());
            assert!(a < b);
            assert!((axis.unit()[axis.index()] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        assert!(!tol.in_front(0.0));
        assert!(!tol.in_front(1e-7));
        assert!(tol.in_front(1e-3));
        assert!(tol.is_parallel(1e-12));
        assert!(!tol.is_parallel(1e-3));
        assert!(tol.same_distance(2.0, 2.0 + 1e-8));
        assert!(!tol.same_distance(2.0, 2.001));
    }
}
