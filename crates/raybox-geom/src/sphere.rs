//! Ray-sphere intersection (quadratic equation).

use std::f64::consts::PI;

use raybox_math::{Point2, Point3, Ray, Tolerance};

use crate::SurfaceHit;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Both roots of `|origin + t*dir - center|^2 = R^2`, smaller first.
    fn roots(&self, ray: &Ray) -> Option<(f64, f64)> {
        let oc = ray.origin - self.center;
        let d = &ray.direction;

        let a = d.dot(d);
        let b = 2.0 * oc.dot(d);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        Some(((-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)))
    }

    /// Intersect a ray with the sphere.
    ///
    /// Returns the nearer root in front of the ray. When the origin is inside
    /// the sphere that is the far (exit) root.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let tol = Tolerance::DEFAULT;
        let (t1, t2) = self.roots(ray)?;

        let t = if tol.in_front(t1) {
            t1
        } else if tol.in_front(t2) {
            t2
        } else {
            return None;
        };

        Some(self.hit_at(ray, t))
    }

    /// Append every crossing in front of the ray (up to 2), sorted by t.
    ///
    /// A tangent ray produces two hits at the same distance.
    pub fn all_intersections(&self, ray: &Ray, out: &mut Vec<SurfaceHit>) {
        let tol = Tolerance::DEFAULT;
        if let Some((t1, t2)) = self.roots(ray) {
            for t in [t1, t2] {
                if tol.in_front(t) {
                    out.push(self.hit_at(ray, t));
                }
            }
        }
    }

    /// Whether `p` lies strictly inside the sphere.
    pub fn contains(&self, p: &Point3) -> bool {
        (p - self.center).norm_squared() < self.radius * self.radius
    }

    fn hit_at(&self, ray: &Ray, t: f64) -> SurfaceHit {
        let point = ray.at(t);
        SurfaceHit {
            t,
            point,
            normal: (point - self.center) / self.radius,
            uv: self.uv(&point),
        }
    }

    /// Compute the (u, v) surface parameters for a point on the sphere.
    ///
    /// u = longitude around +Y in [0, 2π), v = latitude in [-π/2, π/2].
    fn uv(&self, point: &Point3) -> Point2 {
        let to_point = (point - self.center) / self.radius;

        let v = to_point.y.clamp(-1.0, 1.0).asin();

        if to_point.x.hypot(to_point.z) < 1e-12 {
            // At a pole - longitude is undefined, use 0
            return Point2::new(0.0, v);
        }

        let u = to_point.z.atan2(to_point.x);
        let u = if u < 0.0 { u + 2.0 * PI } else { u };

        Point2::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raybox_math::Vec3;

    #[test]
    fn test_ray_sphere_through_center() {
        let sphere = Sphere::new(Point3::origin(), 5.0);
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::x());
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-10);
        assert!((hit.normal - -Vec3::x()).norm() < 1e-10);

        let mut hits = Vec::new();
        sphere.all_intersections(&ray, &mut hits);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 5.0).abs() < 1e-10);
        assert!((hits[1].t - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let sphere = Sphere::new(Point3::origin(), 5.0);
        let ray = Ray::new(Point3::new(-10.0, 10.0, 0.0), Vec3::x());
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside_returns_far_root() {
        let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 4.0);
        let dirs = [
            Vec3::x(),
            Vec3::new(0.3, -0.2, 0.9),
            Vec3::new(-1.0, -1.0, -1.0),
        ];
        for dir in dirs {
            let ray = Ray::new(Point3::new(1.5, 2.5, 2.0), dir);
            let hit = sphere.intersect(&ray).unwrap();
            assert!(hit.t > 0.0);
            assert!(((hit.point - sphere.center).norm() - 4.0).abs() < 1e-9);
            // exit point: outward normal follows the ray
            assert!(hit.normal.dot(&ray.direction) > 0.0);

            let mut hits = Vec::new();
            sphere.all_intersections(&ray, &mut hits);
            assert_eq!(hits.len(), 1);
        }
    }

    #[test]
    fn test_ray_sphere_behind() {
        let sphere = Sphere::new(Point3::origin(), 1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::z());
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_sphere_tangent() {
        let sphere = Sphere::new(Point3::origin(), 5.0);
        let ray = Ray::new(Point3::new(5.0, -10.0, 0.0), Vec3::y());
        let mut hits = Vec::new();
        sphere.all_intersections(&ray, &mut hits);
        // zero discriminant: the double root is reported twice
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 10.0).abs() < 1e-10);
        assert!((hits[0].t - hits[1].t).abs() < 1e-10);
    }

    #[test]
    fn test_sphere_uv() {
        let sphere = Sphere::new(Point3::origin(), 10.0);

        let uv = sphere.uv(&Point3::new(10.0, 0.0, 0.0));
        assert!(uv.x.abs() < 1e-10);
        assert!(uv.y.abs() < 1e-10);

        let uv = sphere.uv(&Point3::new(0.0, 10.0, 0.0));
        assert!((uv.y - PI / 2.0).abs() < 1e-10);

        let uv = sphere.uv(&Point3::new(0.0, 0.0, 10.0));
        assert!((uv.x - PI / 2.0).abs() < 1e-10);

        let uv = sphere.uv(&Point3::new(0.0, 0.0, -10.0));
        assert!((uv.x - 3.0 * PI / 2.0).abs() < 1e-10);
    }
}
