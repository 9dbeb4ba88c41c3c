//! Closed real intervals and their arithmetic algebra.
//!
//! An [`Interval`] is the domain representation for scalar variables: the
//! set of values a variable may still take. Every arithmetic operation is a
//! *sound interval extension*: the result encloses the true result for
//! every pair of concrete values drawn from the operands. Division and
//! integer powers carry explicit case splits for operands that touch or
//! straddle zero.
//!
//! Bounds may be infinite (`ALL_VALUES` is the unbounded domain) but never
//! NaN; the lower bound is never `+inf` and the upper bound never `-inf`.
//! An interval with `lower > upper` is empty and represents inconsistency.

use crate::num::{nearly_equal, nearly_ge, nearly_le};
use rand::Rng;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds are clamped to half the representable range before midpoint and
/// random-element computations so that arithmetic on them cannot overflow.
const MAX_PRACTICAL: f64 = f64::MAX * 0.5;
const MIN_PRACTICAL: f64 = f64::MIN * 0.5;

/// A closed interval `[lower, upper]` of reals, possibly unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// Lower bound. Never NaN, never `+inf`.
    pub lower: f64,
    /// Upper bound. Never NaN, never `-inf`.
    pub upper: f64,
}

/// The unbounded interval `(-inf, +inf)`.
pub const ALL_VALUES: Interval = Interval {
    lower: f64::NEG_INFINITY,
    upper: f64::INFINITY,
};

impl Interval {
    /// Creates the interval `[lower, upper]`.
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(!lower.is_nan(), "interval lower bound is NaN");
        debug_assert!(!upper.is_nan(), "interval upper bound is NaN");
        debug_assert!(
            lower != f64::INFINITY,
            "interval lower bound cannot be +inf"
        );
        debug_assert!(
            upper != f64::NEG_INFINITY,
            "interval upper bound cannot be -inf"
        );
        Interval { lower, upper }
    }

    /// Creates the singleton interval `[value, value]`.
    pub fn singleton(value: f64) -> Self {
        Interval::new(value, value)
    }

    /// Creates an interval from two bounds in either order.
    pub fn from_unsorted_bounds(a: f64, b: f64) -> Self {
        if a > b {
            Interval::new(b, a)
        } else {
            Interval::new(a, b)
        }
    }

    /// Whether this interval is a single point.
    pub fn is_unique(&self) -> bool {
        self.lower == self.upper
    }

    /// The single value of a unique interval.
    ///
    /// # Panics
    ///
    /// Panics if the interval is not unique.
    pub fn unique_value(&self) -> f64 {
        assert!(self.is_unique(), "interval value is not unique");
        self.midpoint()
    }

    /// Whether the interval is empty (`lower > upper`), i.e. inconsistent.
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether `other` is entirely inside this interval.
    pub fn contains_interval(&self, other: Interval) -> bool {
        self.lower <= other.lower && self.upper >= other.upper
    }

    /// Like [`contains_interval`](Self::contains_interval) but tolerating
    /// a near-equal overhang of `epsilon` at either bound.
    pub fn nearly_contains(&self, other: Interval, epsilon: f64) -> bool {
        nearly_le(self.lower, other.lower, epsilon) && nearly_ge(self.upper, other.upper, epsilon)
    }

    pub fn contains_zero(&self) -> bool {
        self.lower <= 0.0 && self.upper >= 0.0
    }

    /// Whether zero is strictly interior to the interval.
    pub fn crosses_zero(&self) -> bool {
        self.lower < 0.0 && self.upper > 0.0
    }

    pub fn non_negative(&self) -> bool {
        self.lower >= 0.0
    }

    pub fn non_positive(&self) -> bool {
        self.upper <= 0.0
    }

    pub fn strictly_positive(&self) -> bool {
        self.lower > 0.0
    }

    pub fn strictly_negative(&self) -> bool {
        self.upper < 0.0
    }

    /// Whether this is exactly the interval `[0, 0]`.
    pub fn is_zero(&self) -> bool {
        self.lower == 0.0 && self.upper == 0.0
    }

    /// Whether the interval is non-empty and its bounds are nearly equal.
    pub fn nearly_unique(&self, epsilon: f64) -> bool {
        !self.is_empty() && nearly_equal(self.lower, self.upper, epsilon)
    }

    /// Width of the interval (`upper - lower`); `+inf` when unbounded.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Largest absolute value of the two bounds.
    pub fn abs(&self) -> f64 {
        self.lower.abs().max(self.upper.abs())
    }

    fn practical_lower(&self) -> f64 {
        self.lower.max(MIN_PRACTICAL)
    }

    fn practical_upper(&self) -> f64 {
        self.upper.min(MAX_PRACTICAL)
    }

    /// Midpoint, computed against practically-clamped bounds so that an
    /// infinite bound yields a finite result.
    pub fn midpoint(&self) -> f64 {
        (self.practical_lower() + self.practical_upper()) * 0.5
    }

    /// The sub-interval from the lower bound to the midpoint.
    pub fn lower_half(&self) -> Interval {
        Interval::new(self.lower, self.midpoint())
    }

    /// The sub-interval from the midpoint to the upper bound.
    pub fn upper_half(&self) -> Interval {
        Interval::new(self.midpoint(), self.upper)
    }

    /// A uniformly random element, drawn against practically-clamped bounds.
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let lower = self.practical_lower();
        let range = self.practical_upper() - lower;
        debug_assert!(range.is_finite());
        lower + rng.random_range(0.0..1.0) * range
    }

    /// The intersection of `a` and `b`; may be empty.
    pub fn intersection(a: Interval, b: Interval) -> Interval {
        Interval::new(a.lower.max(b.lower), a.upper.min(b.upper))
    }

    /// The smallest interval containing both `a` and `b`.
    /// An empty operand is ignored.
    pub fn union_bound(a: Interval, b: Interval) -> Interval {
        if a.is_empty() {
            return b;
        }
        if b.is_empty() {
            return a;
        }
        Interval::new(a.lower.min(b.lower), a.upper.max(b.upper))
    }

    /// Bound of `(target ∩ a) ∪ (target ∩ b)`.
    ///
    /// Recombines a narrowing that was computed as two disjoint branches,
    /// e.g. the two halves of a zero-straddling quotient.
    pub fn union_of_intersections(target: Interval, a: Interval, b: Interval) -> Interval {
        Interval::union_bound(
            Interval::intersection(target, a),
            Interval::intersection(target, b),
        )
    }

    /// Multiplicative inverse. The caller handles zero-containing
    /// denominators; see the `Div` impl for the general case split.
    pub fn reciprocal(&self) -> Interval {
        Interval::new(1.0 / self.upper, 1.0 / self.lower)
    }

    /// `self` raised to a non-negative integer exponent.
    ///
    /// Even exponents fold negative sub-ranges through zero; odd exponents
    /// are monotone.
    pub fn pow(&self, exponent: u32) -> Interval {
        match exponent {
            0 => Interval::new(1.0, 1.0),
            1 => *self,
            _ => {
                let e = f64::from(exponent);
                if exponent % 2 == 0 {
                    if self.lower >= 0.0 {
                        Interval::new(self.lower.powf(e), self.upper.powf(e))
                    } else if self.upper < 0.0 {
                        Interval::new(self.upper.powf(e), self.lower.powf(e))
                    } else {
                        Interval::new(0.0, self.upper.powf(e).max(self.lower.powf(e)))
                    }
                } else {
                    Interval::new(self.lower.powf(e), self.upper.powf(e))
                }
            }
        }
    }

    /// Inverse of [`pow`](Self::pow): given `y = x^n`, bound `x`.
    ///
    /// Even exponents require a non-negative pre-image (the caller layers
    /// the sign split on top); odd exponents tolerate negative inputs via
    /// a sign-preserving root.
    pub fn inv_power(a: Interval, exponent: u32) -> Interval {
        if exponent == 1 {
            return a;
        }
        let inv = 1.0 / f64::from(exponent);
        if exponent % 2 == 0 {
            Interval::new(a.lower.max(0.0).powf(inv), a.upper.max(0.0).powf(inv))
        } else {
            Interval::new(
                signed_root(a.lower, inv),
                signed_root(a.upper, inv),
            )
        }
    }

    /// Square of the interval, folding a zero crossing down to zero.
    pub fn square(&self) -> Interval {
        let lower_sq = self.lower * self.lower;
        let upper_sq = self.upper * self.upper;
        if self.crosses_zero() {
            Interval::new(0.0, lower_sq.max(upper_sq))
        } else if self.upper <= 0.0 {
            Interval::new(upper_sq, lower_sq)
        } else {
            Interval::new(lower_sq, upper_sq)
        }
    }

    /// Square root of a non-negative interval (the positive branch).
    pub fn positive_sqrt(a: Interval) -> Interval {
        debug_assert!(a.lower >= 0.0, "square root of a negative interval");
        Interval::new(a.lower.sqrt(), a.upper.sqrt())
    }
}

/// `sign(x) * |x|^e` — odd roots of negative numbers.
fn signed_root(x: f64, exponent: f64) -> f64 {
    x.signum() * x.abs().powf(exponent)
}

/// Bound product treating `0 * ±inf` as 0: an infinite bound stands for
/// arbitrarily large finite values, whose product with zero is zero.
fn mul_bound(a: f64, b: f64) -> f64 {
    let product = a * b;
    if product.is_nan() {
        0.0
    } else {
        product
    }
}

fn min4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.min(b).min(c.min(d))
}

fn max4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.max(b).max(c.max(d))
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        // Opposite-signed infinities cannot meet here: lower bounds are
        // never +inf and upper bounds never -inf.
        Interval::new(self.lower + rhs.lower, self.upper + rhs.upper)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        // Guard against inf - inf producing NaN when both operands are
        // unbounded on the same side.
        let lower = if self.lower == f64::NEG_INFINITY {
            f64::NEG_INFINITY
        } else {
            self.lower - rhs.upper
        };
        let upper = if self.upper == f64::INFINITY {
            f64::INFINITY
        } else {
            self.upper - rhs.lower
        };
        Interval::new(lower, upper)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval::new(-self.upper, -self.lower)
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        let ll = mul_bound(self.lower, rhs.lower);
        let uu = mul_bound(self.upper, rhs.upper);
        let lu = mul_bound(self.lower, rhs.upper);
        let ul = mul_bound(self.upper, rhs.lower);
        Interval::new(min4(ll, uu, lu, ul), max4(ll, uu, lu, ul))
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, k: f64) -> Interval {
        let a = mul_bound(self.lower, k);
        let b = mul_bound(self.upper, k);
        Interval::new(a.min(b), a.max(b))
    }
}

impl Mul<Interval> for f64 {
    type Output = Interval;

    fn mul(self, a: Interval) -> Interval {
        a * self
    }
}

impl Div for Interval {
    type Output = Interval;

    /// Sound quotient with the zero case split.
    ///
    /// A `[0,0]` denominator is treated conservatively as unconstrained
    /// (failure is the caller's call to make); a denominator touching zero
    /// on one side yields a one-sided unbounded interval; a denominator
    /// straddling zero yields the unbounded interval.
    fn div(self, rhs: Interval) -> Interval {
        if rhs.lower == 0.0 {
            if rhs.upper == 0.0 {
                return ALL_VALUES;
            }
            return Interval::new(
                (self.upper / rhs.upper).min(self.lower / rhs.upper),
                f64::INFINITY,
            );
        }

        if rhs.upper == 0.0 {
            return Interval::new(
                f64::NEG_INFINITY,
                (self.lower / rhs.lower).max(self.upper / rhs.lower),
            );
        }

        if rhs.contains(0.0) {
            return ALL_VALUES;
        }

        let ll = self.lower / rhs.lower;
        let uu = self.upper / rhs.upper;
        let lu = self.lower / rhs.upper;
        let ul = self.upper / rhs.lower;
        Interval::new(min4(ll, uu, lu, ul), max4(ll, uu, lu, ul))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Empty")
        } else if self.is_unique() {
            write!(f, "{}", self.unique_value())
        } else {
            write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        assert!(Interval::new(1.0, -1.0).is_empty());
        assert!(!Interval::new(-1.0, 1.0).is_empty());
    }

    #[test]
    fn test_contains_scalar() {
        let i = Interval::new(0.0, 1.0);
        assert!(i.contains(0.0));
        assert!(i.contains(0.5));
        assert!(i.contains(1.0));
        assert!(!i.contains(-1.0));
        assert!(!i.contains(2.0));
    }

    #[test]
    fn test_contains_interval() {
        let i = Interval::new(0.0, 1.0);
        assert!(i.contains_interval(Interval::new(0.0, 1.0)));
        assert!(i.contains_interval(Interval::new(1.0, 1.0)));
        assert!(i.contains_interval(Interval::new(0.25, 0.75)));
        assert!(!i.contains_interval(Interval::new(0.0, 2.0)));
        assert!(!i.contains_interval(Interval::new(-0.25, 0.75)));
    }

    #[test]
    fn test_intersection() {
        let i = |a, b| Interval::new(a, b);
        assert_eq!(Interval::intersection(i(1.0, 2.0), i(0.0, 3.0)), i(1.0, 2.0));
        assert_eq!(Interval::intersection(i(0.0, 2.0), i(1.0, 3.0)), i(1.0, 2.0));
        assert_eq!(Interval::intersection(i(1.0, 2.0), i(2.0, 4.0)), i(2.0, 2.0));
        assert!(Interval::intersection(i(1.0, 2.0), i(3.0, 4.0)).is_empty());
    }

    #[test]
    fn test_union_bound() {
        let i = |a, b| Interval::new(a, b);
        assert_eq!(Interval::union_bound(i(1.0, 2.0), i(0.0, 3.0)), i(0.0, 3.0));
        assert_eq!(Interval::union_bound(i(1.0, 2.0), i(3.0, 4.0)), i(1.0, 4.0));
        // Empty operand is ignored
        assert_eq!(Interval::union_bound(i(1.0, 2.0), i(3.0, -4.0)), i(1.0, 2.0));
    }

    #[test]
    fn test_add_sub() {
        let i = |a, b| Interval::new(a, b);
        assert_eq!(i(0.0, 1.0) + i(1.0, 2.0), i(1.0, 3.0));
        assert_eq!(i(0.0, 1.0) - i(1.0, 2.0), i(-2.0, 0.0));
    }

    #[test]
    fn test_sub_unbounded() {
        let r = ALL_VALUES - ALL_VALUES;
        assert_eq!(r, ALL_VALUES);
    }

    #[test]
    fn test_mul() {
        let i = |a, b| Interval::new(a, b);
        assert_eq!(i(1.0, 2.0) * i(2.0, 3.0), i(2.0, 6.0));
        assert_eq!(i(-1.0, 2.0) * i(2.0, 3.0), i(-3.0, 6.0));
        assert_eq!(i(-2.0, 3.0) * i(-4.0, 1.0), i(-12.0, 8.0));
        assert_eq!(i(-2.0, -1.0) * i(-2.0, -1.0), i(1.0, 4.0));
    }

    #[test]
    fn test_div_zero_handling() {
        let i = |a, b| Interval::new(a, b);
        assert_eq!(i(1.0, 1.0) / i(-1.0, 1.0), ALL_VALUES);
        assert_eq!(i(-1.0, 1.0) / i(-1.0, 1.0), ALL_VALUES);
        assert_eq!(i(2.0, 4.0) / i(1.0, 2.0), i(1.0, 4.0));
        assert_eq!(i(2.0, 4.0) / i(-2.0, -1.0), i(-4.0, -1.0));
        assert_eq!(i(1.0, 2.0) / i(0.0, 1.0), i(1.0, f64::INFINITY));
        assert_eq!(i(1.0, 2.0) / i(-1.0, 0.0), i(f64::NEG_INFINITY, -1.0));
        assert_eq!(i(1.0, 2.0) / i(0.0, 0.0), ALL_VALUES);
    }

    #[test]
    fn test_pow() {
        let neg = Interval::new(-2.0, -1.0);
        let pos = Interval::new(1.0, 2.0);
        let cross = Interval::new(-2.0, 2.0);

        assert_eq!(neg.pow(0), Interval::new(1.0, 1.0));
        assert_eq!(neg.pow(1), neg);
        assert_eq!(neg.pow(2), Interval::new(1.0, 4.0));
        assert_eq!(pos.pow(2), Interval::new(1.0, 4.0));
        assert_eq!(cross.pow(2), Interval::new(0.0, 4.0));
        assert_eq!(neg.pow(3), Interval::new(-8.0, -1.0));
        assert_eq!(pos.pow(3), Interval::new(1.0, 8.0));
    }

    #[test]
    fn test_inv_power() {
        // Even: non-negative pre-image
        let r = Interval::inv_power(Interval::new(4.0, 9.0), 2);
        assert!(nearly_equal(r.lower, 2.0, 1e-9) && nearly_equal(r.upper, 3.0, 1e-9));
        // Even exponent clamps a negative input to zero
        let r = Interval::inv_power(Interval::new(-4.0, 9.0), 2);
        assert_eq!(r.lower, 0.0);
        // Odd: sign-preserving
        let r = Interval::inv_power(Interval::new(-8.0, 8.0), 3);
        assert!(nearly_equal(r.lower, -2.0, 1e-9) && nearly_equal(r.upper, 2.0, 1e-9));
    }

    #[test]
    fn test_square() {
        assert_eq!(Interval::new(-2.0, 2.0).square(), Interval::new(0.0, 4.0));
        assert_eq!(Interval::new(-3.0, -2.0).square(), Interval::new(4.0, 9.0));
        assert_eq!(Interval::new(2.0, 3.0).square(), Interval::new(4.0, 9.0));
    }

    #[test]
    fn test_positive_sqrt() {
        assert_eq!(
            Interval::positive_sqrt(Interval::new(4.0, 9.0)),
            Interval::new(2.0, 3.0)
        );
    }

    #[test]
    fn test_abs() {
        assert_eq!(Interval::new(-3.0, 2.0).abs(), 3.0);
        assert_eq!(Interval::new(1.0, 2.0).abs(), 2.0);
    }

    #[test]
    fn test_midpoint_of_unbounded() {
        let m = ALL_VALUES.midpoint();
        assert!(m.is_finite());
        assert_eq!(Interval::new(0.0, 4.0).midpoint(), 2.0);
    }

    #[test]
    fn test_halves() {
        let i = Interval::new(0.0, 4.0);
        assert_eq!(i.lower_half(), Interval::new(0.0, 2.0));
        assert_eq!(i.upper_half(), Interval::new(2.0, 4.0));
    }

    #[test]
    fn test_union_of_intersections() {
        let target = Interval::new(-10.0, 10.0);
        let a = Interval::new(f64::NEG_INFINITY, -2.0);
        let b = Interval::new(2.0, f64::INFINITY);
        assert_eq!(
            Interval::union_of_intersections(target, a, b),
            Interval::new(-10.0, 10.0)
        );
    }

    #[test]
    fn test_random_element_in_bounds() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let i = Interval::new(-3.0, 5.0);
        for _ in 0..100 {
            let x = i.random_element(&mut rng);
            assert!(i.contains(x));
        }
        // Unbounded domains still produce finite samples
        let x = ALL_VALUES.random_element(&mut rng);
        assert!(x.is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(1.0, -1.0).to_string(), "Empty");
        assert_eq!(Interval::new(2.0, 2.0).to_string(), "2");
        assert_eq!(Interval::new(0.0, 1.0).to_string(), "[0, 1]");
    }

    fn finite_interval() -> impl Strategy<Value = Interval> {
        (-1e6..1e6f64, -1e6..1e6f64)
            .prop_map(|(a, b)| Interval::from_unsorted_bounds(a, b))
    }

    proptest! {
        // Soundness: for a in A and b in B, a op b lands inside A op B.
        #[test]
        fn prop_add_sound((a, b, ta, tb) in (finite_interval(), finite_interval(), 0.0..=1.0f64, 0.0..=1.0f64)) {
            let x = a.lower + ta * a.width();
            let y = b.lower + tb * b.width();
            prop_assert!((a + b).nearly_contains(Interval::singleton(x + y), 1e-9));
        }

        #[test]
        fn prop_mul_sound((a, b, ta, tb) in (finite_interval(), finite_interval(), 0.0..=1.0f64, 0.0..=1.0f64)) {
            let x = a.lower + ta * a.width();
            let y = b.lower + tb * b.width();
            prop_assert!((a * b).nearly_contains(Interval::singleton(x * y), 1e-6));
        }

        #[test]
        fn prop_sub_sound((a, b, ta, tb) in (finite_interval(), finite_interval(), 0.0..=1.0f64, 0.0..=1.0f64)) {
            let x = a.lower + ta * a.width();
            let y = b.lower + tb * b.width();
            prop_assert!((a - b).nearly_contains(Interval::singleton(x - y), 1e-9));
        }

        #[test]
        fn prop_square_sound((a, t) in (finite_interval(), 0.0..=1.0f64)) {
            let x = a.lower + t * a.width();
            prop_assert!(a.square().nearly_contains(Interval::singleton(x * x), 1e-6));
        }

        #[test]
        fn prop_div_sound((a, b, ta, tb) in (finite_interval(), finite_interval(), 0.0..=1.0f64, 0.0..=1.0f64)) {
            let x = a.lower + ta * a.width();
            let y = b.lower + tb * b.width();
            prop_assume!(y != 0.0);
            let q = a / b;
            prop_assert!(q.nearly_contains(Interval::singleton(x / y), 1e-6));
        }
    }
}
