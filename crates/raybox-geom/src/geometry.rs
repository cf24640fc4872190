//! The closed set of solids a scene node can hold.

use raybox_math::{Point3, Ray};

use crate::{Csg, Cube, IntersectionInfo, Overflow, Plane, Sphere, SurfaceHit};

/// A solid that can be intersected by rays.
#[derive(Debug, Clone)]
pub enum Geometry {
    /// Infinite axis-aligned plane.
    Plane(Plane),
    /// Sphere.
    Sphere(Sphere),
    /// Axis-aligned cube.
    Cube(Cube),
    /// Boolean combination of two geometries.
    Csg(Box<Csg>),
}

impl Geometry {
    /// Find the nearest intersection in front of the ray.
    pub fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo<'_>> {
        let hit = match self {
            Geometry::Plane(p) => p.intersect(ray),
            Geometry::Sphere(s) => s.intersect(ray),
            Geometry::Cube(c) => c.intersect(ray),
            Geometry::Csg(csg) => return csg.intersect(ray),
        };
        hit.map(|h| IntersectionInfo::new(h, self))
    }

    /// Append every boundary crossing in front of the ray, sorted by distance.
    ///
    /// Fails only when a nested CSG node exceeds its crossing limit.
    pub fn all_intersections<'a>(
        &'a self,
        ray: &Ray,
        out: &mut Vec<IntersectionInfo<'a>>,
    ) -> Result<(), Overflow> {
        let mut hits: Vec<SurfaceHit> = Vec::with_capacity(2);
        match self {
            Geometry::Plane(p) => hits.extend(p.intersect(ray)),
            Geometry::Sphere(s) => s.all_intersections(ray, &mut hits),
            Geometry::Cube(c) => c.all_intersections(ray, &mut hits),
            Geometry::Csg(csg) => return csg.all_intersections(ray, out),
        }
        out.extend(hits.into_iter().map(|h| IntersectionInfo::new(h, self)));
        Ok(())
    }

    /// Whether `p` lies inside the solid.
    pub fn contains(&self, p: &Point3) -> bool {
        match self {
            Geometry::Plane(g) => g.contains(p),
            Geometry::Sphere(g) => g.contains(p),
            Geometry::Cube(g) => g.contains(p),
            Geometry::Csg(g) => g.contains(p),
        }
    }

    /// Short name of the geometry kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Plane(_) => "Plane",
            Geometry::Sphere(_) => "Sphere",
            Geometry::Cube(_) => "Cube",
            Geometry::Csg(csg) => csg.op.name(),
        }
    }
}

impl From<Plane> for Geometry {
    fn from(value: Plane) -> Self {
        Geometry::Plane(value)
    }
}

impl From<Sphere> for Geometry {
    fn from(value: Sphere) -> Self {
        Geometry::Sphere(value)
    }
}

impl From<Cube> for Geometry {
    fn from(value: Cube) -> Self {
        Geometry::Cube(value)
    }
}

impl From<Csg> for Geometry {
    fn from(value: Csg) -> Self {
        Geometry::Csg(Box::new(value))
    }
}
