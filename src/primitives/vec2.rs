//! 2D vector type for directions and offsets.

use num_traits::Float;
use std::ops::Mul;

/// A 2D vector representing a direction or offset.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Returns the squared magnitude (length squared).
    #[inline]
    pub fn magnitude_squared(self) -> F {
        self.dot(self)
    }

    /// Returns a vector perpendicular to this one (rotated 90 degrees counter-clockwise).
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Returns a vector perpendicular to this one (rotated 90 degrees clockwise).
    ///
    /// For an edge traversed with the interior on its left, this is the
    /// outward-facing normal.
    #[inline]
    pub fn perpendicular_cw(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Returns `true` if this vector has zero length.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == F::zero() && self.y == F::zero()
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v: Vec2<f64> = Vec2::new(3.0, 4.0);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn test_dot_product() {
        let a: Vec2<f64> = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.dot(b), 11.0);
    }

    #[test]
    fn test_perpendicular() {
        let v: Vec2<f64> = Vec2::new(1.0, 0.0);
        let p = v.perpendicular();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 1.0);
        assert_eq!(v.dot(p), 0.0);
    }

    #[test]
    fn test_perpendicular_cw() {
        // Bottom edge of a CCW square, traversed left to right: outward is down.
        let v: Vec2<f64> = Vec2::new(1.0, 0.0);
        let n = v.perpendicular_cw();
        assert_eq!(n.x, 0.0);
        assert_eq!(n.y, -1.0);
        assert_eq!(n.dot(v.perpendicular()), -1.0);
    }

    #[test]
    fn test_is_zero() {
        assert!(Vec2::<f64>::zero().is_zero());
        assert!(!Vec2::new(0.0_f64, 1e-300).is_zero());
    }

    #[test]
    fn test_scale() {
        let a: Vec2<f64> = Vec2::new(1.0, 2.0);
        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);
        assert_eq!(scaled.magnitude_squared(), 20.0);
    }
}
