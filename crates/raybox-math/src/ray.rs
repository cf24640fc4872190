//! Ray representation and the reflection helpers used by shading.

use crate::{Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Vec3,
    /// Diagnostic tracing flag. Has no effect on the traced result.
    pub debug: bool,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized; it must not be the zero vector.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            debug: false,
        }
    }

    /// Return a copy of this ray with the debug flag set.
    pub fn debug(self) -> Self {
        Self {
            debug: true,
            ..self
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

/// Reflect `v` about `normal`: `v + 2 * dot(normal, -v) * normal`.
#[inline]
pub fn reflect(v: &Vec3, normal: &Vec3) -> Vec3 {
    *v + normal * (2.0 * normal.dot(&-v))
}

/// Return `v` if it opposes `reference`, otherwise `-v`.
///
/// Used to flip a surface normal so that it faces against the incoming ray.
#[inline]
pub fn faceforward(v: &Vec3, reference: &Vec3) -> Vec3 {
    if reference.dot(v) < 0.0 {
        *v
    } else {
        -v
    }
}
