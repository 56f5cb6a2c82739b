//! 2D line segment type.
//!
//! Clipped Voronoi edges are reported as segments.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[inline]
    pub fn from_coords(x1: F, y1: F, x2: F, y2: F) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(self) -> Point2<F> {
        self.start.midpoint(self.end)
    }

    /// Returns `true` if both endpoints coincide exactly.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_coords() {
        let s: Segment2<f64> = Segment2::from_coords(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.start, Point2::new(1.0, 2.0));
        assert_eq!(s.end, Point2::new(3.0, 4.0));
        assert_eq!(s.direction(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_midpoint() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 3.0, 4.0);
        let m = s.midpoint();
        assert_relative_eq!(m.x, 1.5);
        assert_relative_eq!(m.y, 2.0);
    }

    #[test]
    fn test_degenerate() {
        assert!(Segment2::from_coords(0.5_f64, 0.5, 0.5, 0.5).is_degenerate());
        assert!(!Segment2::from_coords(0.5_f64, 0.5, 0.5, 0.6).is_degenerate());
    }
}
