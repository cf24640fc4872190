//! Ray-plane intersection (closed-form).

use raybox_math::{Axis, Point2, Point3, Ray, Tolerance, Vec3};

use crate::SurfaceHit;

/// An infinite plane perpendicular to one coordinate axis.
///
/// The plane's normal is the positive axis. For CSG purposes the plane
/// bounds a half-space: points below `offset` along the axis are inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Axis the plane is perpendicular to.
    pub axis: Axis,
    /// Offset of the plane from the origin along `axis`.
    pub offset: f64,
}

impl Plane {
    /// Create a plane perpendicular to `axis` at `offset`.
    pub fn new(axis: Axis, offset: f64) -> Self {
        Self { axis, offset }
    }

    /// A plane parallel to XZ at height `y` (the floor plane).
    pub fn horizontal(y: f64) -> Self {
        Self::new(Axis::Y, y)
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.axis.unit()
    }

    /// Intersect a ray with the plane.
    ///
    /// Returns `None` if the ray is parallel to the plane or meets it behind
    /// the origin. u and v are the two in-plane world coordinates.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let tol = Tolerance::DEFAULT;
        let i = self.axis.index();
        let denom = ray.direction[i];

        if tol.is_parallel(denom) {
            return None;
        }

        let t = (self.offset - ray.origin[i]) / denom;
        if !tol.in_front(t) {
            return None;
        }

        let point = ray.at(t);
        let (a, b) = self.axis.others();
        Some(SurfaceHit {
            t,
            point,
            normal: self.normal(),
            uv: Point2::new(point[a], point[b]),
        })
    }

    /// Whether `p` lies in the half-space below the plane.
    pub fn contains(&self, p: &Point3) -> bool {
        p[self.axis.index()] < self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_plane_perpendicular() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Point3::new(3.0, 5.0, 4.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-10);
        assert!((hit.uv.x - 3.0).abs() < 1e-10);
        assert!((hit.uv.y - 4.0).abs() < 1e-10);
        assert!((hit.normal - Vec3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_ray_plane_parallel_misses() {
        let plane = Plane::horizontal(0.0);
        for dir in [Vec3::x(), Vec3::z(), Vec3::new(1.0, 0.0, 1.0)] {
            let ray = Ray::new(Point3::new(0.0, 2.0, 0.0), dir);
            assert!(plane.intersect(&ray).is_none());
        }
    }

    #[test]
    fn test_ray_plane_behind() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vec3::y());
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_plane_origin_on_surface() {
        // A ray starting on the plane must not hit it again.
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Point3::new(1.0, 0.0, 1.0), Vec3::new(0.0, -1.0, 1.0));
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_plane_angled() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Point3::new(0.0, 10.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.t - 10.0 * 2.0_f64.sqrt()).abs() < 1e-10);
        assert!((hit.point.x - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_plane_along_x() {
        let plane = Plane::new(Axis::X, 2.0);
        let ray = Ray::new(Point3::new(-1.0, 7.0, 8.0), Vec3::x());
        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-10);
        assert!((hit.uv.x - 7.0).abs() < 1e-10);
        assert!((hit.uv.y - 8.0).abs() < 1e-10);
        assert!(plane.contains(&Point3::new(1.0, 0.0, 0.0)));
        assert!(!plane.contains(&Point3::new(3.0, 0.0, 0.0)));
    }
}
