//! Robust orientation and in-circle predicates.
//!
//! Both predicates first evaluate the determinant in plain floating point
//! and accept the result when it clears a static error bound. Otherwise the
//! determinant is re-evaluated exactly with [`Expansion`] arithmetic, so the
//! returned sign is always the sign of the exact determinant of the input
//! coordinates. Near-collinear and near-cocircular inputs therefore never
//! produce contradictory answers.

use super::expansion::Expansion;
use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are exactly collinear.
    Collinear,
}

impl Orientation {
    fn from_sign<F: Float>(det: F) -> Self {
        if det > F::zero() {
            Orientation::CounterClockwise
        } else if det < F::zero() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

/// Half the unit roundoff of `F`.
#[inline]
fn half_epsilon<F: Float>() -> F {
    F::epsilon() / (F::one() + F::one())
}

/// `(3 + 16e) e`
fn orient_error_bound<F: Float>() -> F {
    let e = half_epsilon::<F>();
    (F::from(3.0).unwrap_or_else(F::one) + F::from(16.0).unwrap_or_else(F::one) * e) * e
}

/// `(10 + 96e) e`
fn incircle_error_bound<F: Float>() -> F {
    let e = half_epsilon::<F>();
    (F::from(10.0).unwrap_or_else(F::one) + F::from(96.0).unwrap_or_else(F::one) * e) * e
}

/// Twice the signed area of triangle `abc`.
///
/// Positive if `c` lies to the left of the directed line `a -> b`, negative
/// if to the right, zero if the points are collinear. The sign is exact; the
/// magnitude is a floating-point approximation.
///
/// # Example
///
/// ```
/// use voronoise::kernel::orient2d;
/// use voronoise::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert!(orient2d(a, b, Point2::new(0.5, 1e-300)) > 0.0);
/// assert_eq!(orient2d(a, b, Point2::new(2.0, 0.0)), 0.0);
/// ```
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;

    let det_sum = if det_left > F::zero() {
        if det_right <= F::zero() {
            return det;
        }
        det_left + det_right
    } else if det_left < F::zero() {
        if det_right >= F::zero() {
            return det;
        }
        -det_left - det_right
    } else {
        return det;
    };

    let bound = orient_error_bound::<F>() * det_sum;
    if det >= bound || -det >= bound {
        return det;
    }

    orient2d_exact(a, b, c).estimate()
}

fn orient2d_exact<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Expansion<F> {
    // ax*by - ax*cy - cx*by - ay*bx + ay*cx + cy*bx
    Expansion::from_product(a.x, b.y)
        .sub(&Expansion::from_product(a.x, c.y))
        .sub(&Expansion::from_product(c.x, b.y))
        .sub(&Expansion::from_product(a.y, b.x))
        .add(&Expansion::from_product(a.y, c.x))
        .add(&Expansion::from_product(c.y, b.x))
}

/// Classifies the turn `a -> b -> c`.
#[inline]
pub fn orientation<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Orientation {
    Orientation::from_sign(orient2d(a, b, c))
}

/// The in-circle determinant for a counter-clockwise triangle `abc`.
///
/// Positive if `d` lies inside the circle through `a`, `b`, `c`, negative if
/// outside, zero if the four points are cocircular. The sign flips when
/// `abc` is clockwise. The sign is exact.
pub fn incircle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, d: Point2<F>) -> F {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let bound = incircle_error_bound::<F>() * permanent;
    if det > bound || -det > bound {
        return det;
    }

    incircle_exact(a, b, c, d).estimate()
}

fn incircle_exact<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    d: Point2<F>,
) -> Expansion<F> {
    let adx = Expansion::from_diff(a.x, d.x);
    let ady = Expansion::from_diff(a.y, d.y);
    let bdx = Expansion::from_diff(b.x, d.x);
    let bdy = Expansion::from_diff(b.y, d.y);
    let cdx = Expansion::from_diff(c.x, d.x);
    let cdy = Expansion::from_diff(c.y, d.y);

    let alift = adx.mul(&adx).add(&ady.mul(&ady));
    let blift = bdx.mul(&bdx).add(&bdy.mul(&bdy));
    let clift = cdx.mul(&cdx).add(&cdy.mul(&cdy));

    let bc = bdx.mul(&cdy).sub(&cdx.mul(&bdy));
    let ca = cdx.mul(&ady).sub(&adx.mul(&cdy));
    let ab = adx.mul(&bdy).sub(&bdx.mul(&ady));

    alift.mul(&bc).add(&blift.mul(&ca)).add(&clift.mul(&ab))
}

/// Tests whether `p` lies strictly inside the circle through `a`, `b`, `c`.
///
/// Works for either orientation of the triangle. Points exactly on the
/// circle are not inside, and a collinear triple has no circle, so both
/// cases return `false`.
///
/// # Example
///
/// ```
/// use voronoise::kernel::in_circumcircle;
/// use voronoise::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.0, 1.0);
///
/// assert!(in_circumcircle(a, b, c, Point2::new(0.9, 0.9)));
/// // (1, 1) is on the circle, not strictly inside.
/// assert!(!in_circumcircle(a, b, c, Point2::new(1.0, 1.0)));
/// ```
pub fn in_circumcircle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, p: Point2<F>) -> bool {
    match orientation(a, b, c) {
        Orientation::CounterClockwise => incircle(a, b, c, p) > F::zero(),
        Orientation::Clockwise => incircle(a, b, c, p) < F::zero(),
        Orientation::Collinear => false,
    }
}

/// Computes the point equidistant from `a`, `b` and `c`.
///
/// Returns `None` when the three points are exactly collinear, or when the
/// triangle is so flat that the center is not representable.
///
/// # Example
///
/// ```
/// use voronoise::kernel::circumcenter;
/// use voronoise::Point2;
///
/// let center = circumcenter(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// )
/// .unwrap();
/// assert_eq!(center, Point2::new(0.5, 0.5));
/// ```
pub fn circumcenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Point2<F>> {
    let two = F::one() + F::one();
    let d = two * orient2d(a, b, c);
    if d == F::zero() {
        return None;
    }

    let ab = b - a;
    let ac = c - a;
    let ab_sq = ab.magnitude_squared();
    let ac_sq = ac.magnitude_squared();

    let ux = (ac.y * ab_sq - ab.y * ac_sq) / d;
    let uy = (ab.x * ac_sq - ac.x * ab_sq) / d;

    let center = Point2::new(a.x + ux, a.y + uy);
    center.is_finite().then_some(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_orientation_ccw_cw_collinear() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(orientation(a, b, Point2::new(0.5, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, Point2::new(0.5, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation(a, b, Point2::new(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn test_orientation_tiny_offset_is_not_collinear() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, 1e-12);
        assert_eq!(orientation(a, b, c), Orientation::CounterClockwise);
    }

    #[test]
    fn test_orientation_needs_exact_fallback() {
        // A point one ulp off the line y = x, far from the origin; the naive
        // determinant rounds to zero.
        let a: Point2<f64> = Point2::new(0.5, 0.5);
        let b = Point2::new(12.0, 12.0);
        let c = Point2::new(24.0, 24.0 + 24.0 * f64::EPSILON);
        assert_eq!(orientation(a, b, c), Orientation::CounterClockwise);
        assert_eq!(orientation(a, c, b), Orientation::Clockwise);
    }

    #[test]
    fn test_collinear_is_consistent_under_permutation() {
        let a: Point2<f64> = Point2::new(0.1, 0.1);
        let b = Point2::new(0.3, 0.3);
        let c = Point2::new(0.7, 0.7);
        for (p, q, r) in [(a, b, c), (b, c, a), (c, a, b), (b, a, c)] {
            assert_eq!(orientation(p, q, r), Orientation::Collinear);
        }
    }

    #[test]
    fn test_incircle_inside_outside() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, 0.866);
        assert!(in_circumcircle(a, b, c, Point2::new(0.5, 0.288)));
        assert!(!in_circumcircle(a, b, c, Point2::new(10.0, 10.0)));
        // Same answer for the clockwise ordering.
        assert!(in_circumcircle(a, c, b, Point2::new(0.5, 0.288)));
        assert!(!in_circumcircle(a, c, b, Point2::new(10.0, 10.0)));
    }

    #[test]
    fn test_incircle_cocircular_is_exactly_zero() {
        let a: Point2<f64> = Point2::new(0.25, 0.25);
        let b = Point2::new(0.75, 0.25);
        let c = Point2::new(0.75, 0.75);
        let d = Point2::new(0.25, 0.75);
        assert_eq!(incircle(a, b, c, d), 0.0);
        assert!(!in_circumcircle(a, b, c, d));
    }

    #[test]
    fn test_incircle_collinear_triangle() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(2.0, 0.0);
        assert!(!in_circumcircle(a, b, c, Point2::new(1.0, 0.1)));
    }

    #[test]
    fn test_circumcenter_equilateral() {
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        let a = Point2::new(0.0_f64, 1.0);
        let b = Point2::new(-sqrt3_2, -0.5);
        let c = Point2::new(sqrt3_2, -0.5);
        let center = circumcenter(a, b, c).unwrap();
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_is_equidistant() {
        let a = Point2::new(0.1_f64, 0.2);
        let b = Point2::new(0.8, 0.15);
        let c = Point2::new(0.4, 0.9);
        let center = circumcenter(a, b, c).unwrap();
        assert_relative_eq!(center.distance(a), center.distance(b), epsilon = 1e-12);
        assert_relative_eq!(center.distance(b), center.distance(c), epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_collinear_is_none() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(0.5, 0.5);
        let c = Point2::new(1.0, 1.0);
        assert!(circumcenter(a, b, c).is_none());
    }

    #[test]
    fn test_circumcenter_nearly_collinear_is_finite() {
        let a = Point2::new(0.1_f64, 0.5);
        let b = Point2::new(0.9, 0.5);
        let c = Point2::new(0.5, 0.5 + 1e-12);
        let center = circumcenter(a, b, c).unwrap();
        assert!(center.is_finite());
        assert!(center.y < -1e9);
    }

    /// Exact orientation of points on an integer grid scaled by a power of
    /// two; the products are small enough to be exact in `i128`.
    fn grid_orient(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> i128 {
        let (ax, ay) = (a.0 as i128, a.1 as i128);
        let (bx, by) = (b.0 as i128, b.1 as i128);
        let (cx, cy) = (c.0 as i128, c.1 as i128);
        (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
    }

    fn grid_incircle(a: (i64, i64), b: (i64, i64), c: (i64, i64), d: (i64, i64)) -> i128 {
        let row = |p: (i64, i64)| {
            let x = (p.0 - d.0) as i128;
            let y = (p.1 - d.1) as i128;
            (x, y, x * x + y * y)
        };
        let (ax, ay, al) = row(a);
        let (bx, by, bl) = row(b);
        let (cx, cy, cl) = row(c);
        al * (bx * cy - cx * by) + bl * (cx * ay - ax * cy) + cl * (ax * by - bx * ay)
    }

    const SCALE: f64 = 1.0 / (1u64 << 26) as f64;

    fn to_point(p: (i64, i64)) -> Point2<f64> {
        Point2::new(p.0 as f64 * SCALE, p.1 as f64 * SCALE)
    }

    proptest! {
        #[test]
        fn prop_orientation_matches_exact_sign(
            a in (0i64..1 << 26, 0i64..1 << 26),
            b in (0i64..1 << 26, 0i64..1 << 26),
            t in -4i64..4,
        ) {
            // c = a + t * (b - a) + tiny perpendicular nudge in {-1, 0, 1}
            let nudge = t.signum();
            let c = (a.0 + t * (b.0 - a.0) / 4 - nudge, a.1 + t * (b.1 - a.1) / 4 + nudge);
            let expected = grid_orient(a, b, c).signum();
            let got = orient2d(to_point(a), to_point(b), to_point(c));
            let got_sign = if got > 0.0 { 1 } else if got < 0.0 { -1 } else { 0 };
            prop_assert_eq!(got_sign as i128, expected);
        }

        #[test]
        fn prop_incircle_matches_exact_sign(
            cx in 1i64 << 20..1 << 22,
            cy in 1i64 << 20..1 << 22,
            r in 1i64..1 << 12,
            dx in -2i64..=2,
            dy in -2i64..=2,
        ) {
            // Three points exactly on a circle and a fourth within a couple
            // of grid steps of it.
            let a = (cx + r, cy);
            let b = (cx, cy + r);
            let c = (cx - r, cy);
            let d = (cx + dx, cy - r + dy);
            let expected = grid_incircle(a, b, c, d).signum();
            let got = incircle(to_point(a), to_point(b), to_point(c), to_point(d));
            let got_sign = if got > 0.0 { 1 } else if got < 0.0 { -1 } else { 0 };
            prop_assert_eq!(got_sign as i128, expected);
        }
    }
}
