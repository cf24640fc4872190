//! Constructive solid geometry by sweeping ray crossings.
//!
//! A [`Csg`] node never builds the combined surface. Instead every crossing
//! of the ray with both children is collected and sorted, and the sweep
//! tracks whether the ray is currently inside the left and right solid.
//! Wherever the boolean predicate changes value the ray crosses the
//! combined solid's boundary.

use raybox_math::{Point3, Ray, Tolerance};
use thiserror::Error;

use crate::{Geometry, IntersectionInfo};

/// CSG boolean operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Union: inside either solid.
    Union,
    /// Difference: inside the left solid but not the right one.
    Difference,
    /// Intersection: inside both solids.
    Intersection,
}

impl BooleanOp {
    /// Evaluate the membership predicate.
    pub fn apply(self, inside_left: bool, inside_right: bool) -> bool {
        match self {
            BooleanOp::Union => inside_left || inside_right,
            BooleanOp::Difference => inside_left && !inside_right,
            BooleanOp::Intersection => inside_left && inside_right,
        }
    }

    /// Diagnostic name of the combined geometry.
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Union => "CsgUnion",
            BooleanOp::Difference => "CsgDiff",
            BooleanOp::Intersection => "CsgInter",
        }
    }
}

/// The crossing buffer of a CSG node overflowed.
///
/// Intersection treats this as a miss.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("CSG crossing limit exceeded: {count} crossings, limit {limit}")]
pub struct Overflow {
    /// Number of crossings the offending operand produced.
    pub count: usize,
    /// Configured limit.
    pub limit: usize,
}

/// Binary boolean combination of two geometries.
#[derive(Debug, Clone)]
pub struct Csg {
    /// The boolean operation.
    pub op: BooleanOp,
    /// Left operand.
    pub left: Geometry,
    /// Right operand.
    pub right: Geometry,
    /// Maximum number of crossings considered per operand and ray.
    pub max_intersections: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left = 0,
    Right = 1,
}

#[derive(Debug, Clone, Copy)]
struct Crossing<'a> {
    info: IntersectionInfo<'a>,
    side: Side,
}

impl Csg {
    /// Default crossing limit per operand and ray.
    pub const MAX_INTERSECTIONS: usize = 32;

    /// Combine two geometries with `op`.
    pub fn new(op: BooleanOp, left: impl Into<Geometry>, right: impl Into<Geometry>) -> Self {
        Self {
            op,
            left: left.into(),
            right: right.into(),
            max_intersections: Self::MAX_INTERSECTIONS,
        }
    }

    /// Union of `left` and `right`.
    pub fn union(left: impl Into<Geometry>, right: impl Into<Geometry>) -> Self {
        Self::new(BooleanOp::Union, left, right)
    }

    /// `left` with `right` subtracted.
    pub fn difference(left: impl Into<Geometry>, right: impl Into<Geometry>) -> Self {
        Self::new(BooleanOp::Difference, left, right)
    }

    /// Overlap of `left` and `right`.
    pub fn intersection(left: impl Into<Geometry>, right: impl Into<Geometry>) -> Self {
        Self::new(BooleanOp::Intersection, left, right)
    }

    /// Override the per-ray crossing limit.
    pub fn with_max_intersections(mut self, limit: usize) -> Self {
        self.max_intersections = limit;
        self
    }

    /// Whether `p` lies inside the combined solid.
    pub fn contains(&self, p: &Point3) -> bool {
        self.op.apply(self.left.contains(p), self.right.contains(p))
    }

    /// Find the first boundary of the combined solid in front of the ray.
    ///
    /// From outside this is where the predicate first becomes true; from
    /// inside it is the exit boundary. Crossing-limit overflow is a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo<'_>> {
        let mut found = Vec::with_capacity(1);
        self.sweep(ray, &mut found, true).ok()?;
        found.into_iter().next()
    }

    /// Append every boundary crossing of the combined solid, sorted by
    /// distance, with normals pointing out of the combined solid.
    pub fn all_intersections<'a>(
        &'a self,
        ray: &Ray,
        out: &mut Vec<IntersectionInfo<'a>>,
    ) -> Result<(), Overflow> {
        self.sweep(ray, out, false)
    }

    fn collect_crossings<'a>(&'a self, ray: &Ray) -> Result<Vec<Crossing<'a>>, Overflow> {
        let mut crossings = Vec::new();
        let mut buf = Vec::new();

        // each child gets its own crossing budget
        for (side, child) in [(Side::Left, &self.left), (Side::Right, &self.right)] {
            child.all_intersections(ray, &mut buf)?;
            if buf.len() > self.max_intersections {
                if ray.debug {
                    log::debug!(
                        "{} dropped: {} crossings on the {:?} operand exceed limit {}",
                        self.op.name(),
                        buf.len(),
                        side,
                        self.max_intersections
                    );
                }
                return Err(Overflow {
                    count: buf.len(),
                    limit: self.max_intersections,
                });
            }
            crossings.extend(buf.drain(..).map(|info| Crossing { info, side }));
        }

        crossings.sort_by(|a, b| a.info.distance.total_cmp(&b.info.distance));
        Ok(crossings)
    }

    fn sweep<'a>(
        &'a self,
        ray: &Ray,
        out: &mut Vec<IntersectionInfo<'a>>,
        first_only: bool,
    ) -> Result<(), Overflow> {
        let tol = Tolerance::DEFAULT;
        let crossings = self.collect_crossings(ray)?;

        let mut inside = [
            self.left.contains(&ray.origin),
            self.right.contains(&ray.origin),
        ];
        let mut state = self.op.apply(inside[0], inside[1]);

        let mut i = 0;
        while i < crossings.len() {
            // crossings at the same distance (tangents, shared faces) are
            // applied together so paired toggles cancel out
            let mut j = i + 1;
            while j < crossings.len()
                && tol.same_distance(crossings[i].info.distance, crossings[j].info.distance)
            {
                j += 1;
            }

            let before = inside;
            for c in &crossings[i..j] {
                inside[c.side as usize] = !inside[c.side as usize];
            }

            let now = self.op.apply(inside[0], inside[1]);
            if now != state {
                let group = &crossings[i..j];
                let crossing = group
                    .iter()
                    .find(|c| inside[c.side as usize] != before[c.side as usize])
                    .unwrap_or(&group[0]);

                let mut info = crossing.info;
                // the child normal points out of the child; flip it when the
                // combined solid is entered while the child is left, or
                // vice versa
                if now != inside[crossing.side as usize] {
                    info.normal = -info.normal;
                }
                out.push(info);
                state = now;

                if first_only {
                    break;
                }
            }

            i = j;
        }

        Ok(())
    }
}
