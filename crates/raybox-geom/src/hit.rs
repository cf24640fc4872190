//! Intersection records.

use raybox_math::{Point2, Point3, Vec3};

use crate::Geometry;

/// Result of a ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Parameter along the ray where the intersection occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Unit surface normal, pointing out of the solid.
    pub normal: Vec3,
    /// Surface parameter coordinates (u, v) for texturing.
    pub uv: Point2,
}

/// An intersection found in the scene.
///
/// `normal` points out of the solid and is not guaranteed to face the ray;
/// shaders that need that use [`raybox_math::faceforward`].
#[derive(Debug, Clone, Copy)]
pub struct IntersectionInfo<'a> {
    /// Intersection point in world space.
    pub point: Point3,
    /// Distance to the intersection point along the (unit) ray direction.
    pub distance: f64,
    /// Unit surface normal at the intersection point.
    pub normal: Vec3,
    /// Texture coordinate u.
    pub u: f64,
    /// Texture coordinate v.
    pub v: f64,
    /// The primitive whose surface was hit.
    pub geometry: &'a Geometry,
}

impl<'a> IntersectionInfo<'a> {
    /// Tag a primitive hit with the geometry that produced it.
    pub fn new(hit: SurfaceHit, geometry: &'a Geometry) -> Self {
        Self {
            point: hit.point,
            distance: hit.t,
            normal: hit.normal,
            u: hit.uv.x,
            v: hit.uv.y,
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    fn hit_at(t: f64) -> SurfaceHit {
        SurfaceHit {
            t,
            point: Point3::new(0.0, 0.0, t),
            normal: -Vec3::z(),
            uv: Point2::new(0.25, 0.5),
        }
    }

    #[test]
    fn test_new_copies_surface_fields() {
        let g = Geometry::from(Sphere::new(Point3::origin(), 1.0));
        let info = IntersectionInfo::new(hit_at(3.0), &g);
        assert!((info.distance - 3.0).abs() < 1e-12);
        assert!((info.u - 0.25).abs() < 1e-12);
        assert!((info.v - 0.5).abs() < 1e-12);
        assert_eq!(info.geometry.name(), "Sphere");
    }
}
