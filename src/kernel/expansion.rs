//! Exact floating-point expansion arithmetic.
//!
//! An expansion is a sum of non-overlapping floating-point components stored
//! in increasing order of magnitude. Sums and products of expansions are
//! computed without rounding error, so the sign of the largest component is
//! the exact sign of the represented value.
//!
//! Only the handful of operations the predicates need are provided. They are
//! the simple `O(mn)` variants; the predicates reach them only when the
//! floating-point filter cannot certify a sign.

use num_traits::Float;

/// Error-free sum: returns `(x, y)` with `x = fl(a + b)` and `a + b = x + y`.
#[inline]
pub(crate) fn two_sum<F: Float>(a: F, b: F) -> (F, F) {
    let x = a + b;
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_round = b - b_virtual;
    let a_round = a - a_virtual;
    (x, a_round + b_round)
}

/// Error-free difference: `a - b = x + y`.
#[inline]
pub(crate) fn two_diff<F: Float>(a: F, b: F) -> (F, F) {
    two_sum(a, -b)
}

/// Error-free product via fused multiply-add: `a * b = x + y`.
#[inline]
pub(crate) fn two_product<F: Float>(a: F, b: F) -> (F, F) {
    let x = a * b;
    (x, a.mul_add(b, -x))
}

/// An exactly represented real number.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expansion<F> {
    components: Vec<F>,
}

impl<F: Float> Expansion<F> {
    pub(crate) fn from_scalar(value: F) -> Self {
        let mut components = Vec::with_capacity(1);
        if value != F::zero() {
            components.push(value);
        }
        Self { components }
    }

    /// The exact value of `a - b`.
    pub(crate) fn from_diff(a: F, b: F) -> Self {
        Self::from_pair(two_diff(a, b))
    }

    /// The exact value of `a * b`.
    pub(crate) fn from_product(a: F, b: F) -> Self {
        Self::from_pair(two_product(a, b))
    }

    fn from_pair((hi, lo): (F, F)) -> Self {
        let mut components = Vec::with_capacity(2);
        if lo != F::zero() {
            components.push(lo);
        }
        if hi != F::zero() {
            components.push(hi);
        }
        Self { components }
    }

    /// Adds a single scalar, keeping the expansion non-overlapping.
    fn grow(&mut self, b: F) {
        let mut q = b;
        let mut out = Vec::with_capacity(self.components.len() + 1);
        for &e in &self.components {
            let (sum, err) = two_sum(q, e);
            if err != F::zero() {
                out.push(err);
            }
            q = sum;
        }
        if q != F::zero() {
            out.push(q);
        }
        self.components = out;
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for &f in &other.components {
            result.grow(f);
        }
        result
    }

    pub(crate) fn sub(&self, other: &Self) -> Self {
        self.add(&other.negated())
    }

    pub(crate) fn negated(&self) -> Self {
        Self {
            components: self.components.iter().map(|&c| -c).collect(),
        }
    }

    pub(crate) fn scale(&self, b: F) -> Self {
        let mut result = Self::from_scalar(F::zero());
        for &e in &self.components {
            result = result.add(&Self::from_product(e, b));
        }
        result
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        let mut result = Self::from_scalar(F::zero());
        for &f in &other.components {
            result = result.add(&self.scale(f));
        }
        result
    }

    /// Sign of the exact value: -1, 0 or 1.
    #[cfg(test)]
    fn sign(&self) -> i8 {
        match self.components.last() {
            Some(&c) if c > F::zero() => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    /// Nearest-ish floating-point approximation, with the exact sign.
    pub(crate) fn estimate(&self) -> F {
        self.components.iter().fold(F::zero(), |acc, &c| acc + c)
    }
}
