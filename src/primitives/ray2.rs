//! 2D ray type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D ray defined by an origin point and direction.
///
/// A ray extends infinitely from its origin in the direction specified.
/// The direction is stored as-is (not necessarily normalized).
///
/// # Example
///
/// ```
/// use voronoise::primitives::{Point2, Ray2, Vec2};
///
/// let ray: Ray2<f64> = Ray2::new(Point2::new(0.5, 0.5), Vec2::new(0.0, -2.0));
/// assert_eq!(ray.point_at(0.25), Point2::new(0.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Origin point of the ray
    pub origin: Point2<F>,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Ray2<F> {
    /// Creates a new ray from origin and direction.
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// - `t = 0` returns the origin
    /// - `t > 0` returns points along the ray direction
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction * t
    }

    /// Returns `true` if the direction is the zero vector.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(ray.origin, Point2::new(1.0, 2.0));
        assert_eq!(ray.direction, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_point_at() {
        let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 1.0), Vec2::new(1.0, 2.0));
        assert_eq!(ray.point_at(0.0), ray.origin);
        assert_eq!(ray.point_at(1.0), Point2::new(2.0, 3.0));
    }

    #[test]
    fn test_degenerate() {
        let p = Point2::new(0.5_f64, 0.5);
        assert!(Ray2::new(p, Vec2::zero()).is_degenerate());
        assert!(!Ray2::new(p, Vec2::new(0.0, 1.0)).is_degenerate());
    }
}
