//! Clipping of segments, rays and lines against an axis-aligned rectangle.
//!
//! Uses the Liang-Barsky parametric method: each primitive is written as
//! `origin + t * direction` over a parameter interval (`[0, 1]` for a
//! segment, `[0, inf)` for a ray, `(-inf, inf)` for a line), and the
//! interval is narrowed by the four half-planes of the rectangle.

use crate::bounds::Aabb2;
use crate::error::{Result, VoronoiError};
use crate::primitives::{Line2, Point2, Ray2, Segment2, Vec2};
use num_traits::Float;

/// A Voronoi edge before clipping.
///
/// Which variant appears depends on how many of the edge's generating
/// triangles are bounded: two gives a segment between circumcenters, one
/// gives a ray, none (two sites only) gives the full bisector line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DualEdge<F> {
    /// Between the circumcenters of two adjacent triangles.
    Segment(Segment2<F>),
    /// From a hull triangle's circumcenter, away from the hull.
    Ray(Ray2<F>),
    /// A perpendicular bisector with no bounding triangle.
    Line(Line2<F>),
}

impl<F: Float> DualEdge<F> {
    fn parametric(&self) -> (Point2<F>, Vec2<F>, F, F) {
        let inf = F::infinity();
        match *self {
            DualEdge::Segment(s) => (s.start, s.direction(), F::zero(), F::one()),
            DualEdge::Ray(r) => (r.origin, r.direction, F::zero(), inf),
            DualEdge::Line(l) => (l.origin, l.direction, -inf, inf),
        }
    }
}

/// Intersects a dual edge with `rect`, returning the finite part inside it.
///
/// Returns `Ok(None)` when the primitive misses the rectangle or only
/// touches it in a single point. A zero-length segment is treated as a
/// point and kept if it lies inside the rectangle. Endpoints are clamped
/// into the closed rectangle so that rounding never pushes them outside.
///
/// # Errors
///
/// [`VoronoiError::DegenerateDirection`] for a ray or line whose direction
/// is the zero vector.
///
/// # Example
///
/// ```
/// use voronoise::bounds::Aabb2;
/// use voronoise::kernel::{clip, DualEdge};
/// use voronoise::primitives::{Point2, Ray2, Vec2};
///
/// let ray = Ray2::new(Point2::new(0.5_f64, 0.5), Vec2::new(0.0, -1.0));
/// let clipped = clip(&DualEdge::Ray(ray), &Aabb2::unit()).unwrap().unwrap();
/// assert_eq!(clipped.start, Point2::new(0.5, 0.5));
/// assert_eq!(clipped.end, Point2::new(0.5, 0.0));
/// ```
pub fn clip<F: Float>(edge: &DualEdge<F>, rect: &Aabb2<F>) -> Result<Option<Segment2<F>>> {
    match edge {
        DualEdge::Segment(s) if s.is_degenerate() => {
            return Ok(rect.contains_point(s.start).then_some(*s));
        }
        DualEdge::Ray(r) if r.is_degenerate() => return Err(VoronoiError::DegenerateDirection),
        DualEdge::Line(l) if l.is_degenerate() => return Err(VoronoiError::DegenerateDirection),
        _ => {}
    }

    let (origin, dir, mut t0, mut t1) = edge.parametric();

    let constraints = [
        (-dir.x, origin.x - rect.min.x),
        (dir.x, rect.max.x - origin.x),
        (-dir.y, origin.y - rect.min.y),
        (dir.y, rect.max.y - origin.y),
    ];

    for (p, q) in constraints {
        if p == F::zero() {
            // Parallel to this boundary: either fully inside its half-plane
            // or fully outside.
            if q < F::zero() {
                return Ok(None);
            }
            continue;
        }
        let r = q / p;
        if p < F::zero() {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return Ok(None);
        }
    }

    if t0 >= t1 {
        return Ok(None);
    }

    let start = rect.clamp_point(origin + dir * t0);
    let end = rect.clamp_point(origin + dir * t1);
    Ok(Some(Segment2::new(start, end)))
}
