//! Axis-aligned bounding box.
//!
//! Serves as the clip region for Voronoi edges.

use crate::primitives::Point2;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. The box is closed: points on the
/// boundary are contained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// The unit square `[0, 1] x [0, 1]`, the sampling domain.
    #[inline]
    pub fn unit() -> Self {
        Self {
            min: Point2::origin(),
            max: Point2::new(F::one(), F::one()),
        }
    }

    /// Returns `true` if this AABB contains the given point (boundary included).
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Moves a point onto the closest location inside the box.
    #[inline]
    pub fn clamp_point(self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
        )
    }
}
