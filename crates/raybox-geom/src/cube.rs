//! Ray-cube intersection (slab method).

use raybox_math::{Axis, Point2, Point3, Ray, Tolerance};

use crate::SurfaceHit;

/// An axis-aligned cube given by center and half of its side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    /// Center of the cube.
    pub center: Point3,
    /// Half the side length.
    pub half_extent: f64,
}

/// One end of the parametric interval a ray spends inside the cube.
#[derive(Debug, Clone, Copy)]
struct SlabBound {
    t: f64,
    axis: Axis,
}

impl Cube {
    /// Create a cube from its center and full side length.
    pub fn new(center: Point3, side: f64) -> Self {
        Self {
            center,
            half_extent: side / 2.0,
        }
    }

    /// Intersect the three per-axis slab intervals.
    ///
    /// Returns the entry and exit bounds, each tagged with the axis whose
    /// slab was binding. An axis the ray runs parallel to is unconstrained
    /// as long as the origin lies within that slab.
    fn span(&self, ray: &Ray) -> Option<(SlabBound, SlabBound)> {
        let tol = Tolerance::DEFAULT;
        let mut entry = SlabBound {
            t: f64::NEG_INFINITY,
            axis: Axis::X,
        };
        let mut exit = SlabBound {
            t: f64::INFINITY,
            axis: Axis::X,
        };

        for axis in Axis::ALL {
            let i = axis.index();
            let lo = self.center[i] - self.half_extent;
            let hi = self.center[i] + self.half_extent;
            let o = ray.origin[i];
            let d = ray.direction[i];

            if tol.is_parallel(d) {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let (t_near, t_far) = {
                let a = (lo - o) / d;
                let b = (hi - o) / d;
                if a < b {
                    (a, b)
                } else {
                    (b, a)
                }
            };

            if t_near > entry.t {
                entry = SlabBound { t: t_near, axis };
            }
            if t_far < exit.t {
                exit = SlabBound { t: t_far, axis };
            }
        }

        if entry.t > exit.t {
            None
        } else {
            Some((entry, exit))
        }
    }

    fn face_hit(&self, ray: &Ray, bound: SlabBound, entering: bool) -> SurfaceHit {
        let i = bound.axis.index();
        let sign = ray.direction[i].signum();
        // outward normal opposes the ray on entry and follows it on exit
        let normal = bound.axis.unit() * if entering { -sign } else { sign };
        let point = ray.at(bound.t);
        let (a, b) = bound.axis.others();

        SurfaceHit {
            t: bound.t,
            point,
            normal,
            uv: Point2::new(point[a], point[b]),
        }
    }

    /// Intersect a ray with the cube.
    ///
    /// Returns the entry face, or the exit face when the origin is inside.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let tol = Tolerance::DEFAULT;
        let (entry, exit) = self.span(ray)?;

        if tol.in_front(entry.t) {
            Some(self.face_hit(ray, entry, true))
        } else if tol.in_front(exit.t) {
            Some(self.face_hit(ray, exit, false))
        } else {
            None
        }
    }

    /// Append the entry and exit crossings that lie in front of the ray.
    pub fn all_intersections(&self, ray: &Ray, out: &mut Vec<SurfaceHit>) {
        let tol = Tolerance::DEFAULT;
        if let Some((entry, exit)) = self.span(ray) {
            if tol.in_front(entry.t) {
                out.push(self.face_hit(ray, entry, true));
            }
            if tol.in_front(exit.t) {
                out.push(self.face_hit(ray, exit, false));
            }
        }
    }

    /// Whether `p` lies strictly inside the cube.
    pub fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|i| (p[i] - self.center[i]).abs() < self.half_extent)
    }
}
