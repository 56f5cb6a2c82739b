//! 2D infinite line type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D infinite line defined by a point and direction.
///
/// # Example
///
/// ```
/// use voronoise::primitives::{Line2, Point2};
///
/// // Every point on the bisector is equidistant from both sites.
/// let a = Point2::new(0.25_f64, 0.5);
/// let b = Point2::new(0.75, 0.5);
/// let bisector = Line2::bisector(a, b);
/// let p = bisector.point_at(3.0);
/// assert!((p.distance(a) - p.distance(b)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2<F> {
    /// A point on the line
    pub origin: Point2<F>,
    /// Direction vector of the line (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Line2<F> {
    /// Creates a new line from a point and direction.
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Creates the perpendicular bisector of `a` and `b`.
    ///
    /// The direction is `(b - a)` rotated counter-clockwise, so it is zero
    /// when the two points coincide.
    #[inline]
    pub fn bisector(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            origin: a.midpoint(b),
            direction: (b - a).perpendicular(),
        }
    }

    /// Returns the point on the line at parameter t.
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
