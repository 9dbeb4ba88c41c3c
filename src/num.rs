//! Epsilon-tolerant floating-point comparisons.
//!
//! These predicates are used only for *termination* decisions (is a
//! narrowing a no-op, has an interval collapsed to a point). The interval
//! algebra itself stays exact and never uses them.

/// Default tolerance for near-equality tests.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Whether `a` and `b` are equal up to a relative error of `epsilon`,
/// with an absolute floor near zero.
///
/// Exact equality is a fast path, which also handles matching infinities.
pub fn nearly_equal(a: f64, b: f64, epsilon: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if a == 0.0 || b == 0.0 || diff < f64::EPSILON {
        // Relative error is meaningless next to zero; fall back to an
        // absolute comparison.
        diff < epsilon
    } else {
        diff / (a.abs() + b.abs()) < epsilon
    }
}

/// `a <= b`, tolerating a near-equal overshoot.
pub fn nearly_le(a: f64, b: f64, epsilon: f64) -> bool {
    a <= b || nearly_equal(a, b, epsilon)
}

/// `a >= b`, tolerating a near-equal undershoot.
pub fn nearly_ge(a: f64, b: f64, epsilon: f64) -> bool {
    a >= b || nearly_equal(a, b, epsilon)
}
