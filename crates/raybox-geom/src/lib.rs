#![warn(missing_docs)]

//! Ray intersection for the raybox renderer.
//!
//! Every solid in a scene is a [`Geometry`]: one of the analytic primitives
//! ([`Plane`], [`Sphere`], [`Cube`]) or a [`Csg`] boolean combination of two
//! other geometries. Intersection is brute force; a scene tests every
//! geometry against every ray.
//!
//! # Architecture
//!
//! - [`SurfaceHit`] - raw hit of a primitive (distance, point, normal, uv)
//! - [`IntersectionInfo`] - a hit tagged with the geometry that produced it
//! - [`Csg`] - span-sweeping boolean combination with [`BooleanOp`]
//!
//! # Example
//!
//! ```
//! use raybox_geom::{Csg, Cube, Geometry, Sphere};
//! use raybox_math::{Point3, Ray, Vec3};
//!
//! let rounded = Geometry::from(Csg::intersection(
//!     Cube::new(Point3::origin(), 2.0),
//!     Sphere::new(Point3::origin(), 1.3),
//! ));
//! let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::z());
//! let hit = rounded.intersect(&ray).expect("ray points at the solid");
//! assert!((hit.distance - 4.0).abs() < 1e-9);
//! ```

mod csg;
mod cube;
mod geometry;
mod hit;
mod plane;
mod sphere;

pub use csg::{BooleanOp, Csg, Overflow};
pub use cube::Cube;
pub use geometry::Geometry;
pub use hit::{IntersectionInfo, SurfaceHit};
pub use plane::Plane;
pub use sphere::Sphere;
