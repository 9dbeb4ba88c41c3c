//! Constraints and their propagation rules.
//!
//! Each constraint is a small record in an arena: an operation kind over
//! variable handles plus two pieces of worklist bookkeeping (`queued`,
//! `trigger`). Propagation narrows every argument of the constraint from
//! the current domains of the others, skipping the variable whose change
//! caused the wake-up: that variable's domain is what the wake-up already
//! reflects, and re-narrowing it from stale siblings would loop.

use crate::csp::error::Inconsistent;
use crate::csp::solver::Csp;
use crate::csp::variable::FloatVar;
use crate::interval::Interval;

/// Handle to a constraint in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConstraintId(pub(crate) usize);

/// The operation a constraint enforces between its variables.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ConstraintKind {
    /// `sum = a + b`
    Sum {
        sum: FloatVar,
        a: FloatVar,
        b: FloatVar,
    },
    /// `difference = a - b`
    Difference {
        difference: FloatVar,
        a: FloatVar,
        b: FloatVar,
    },
    /// `product = a * b`
    Product {
        product: FloatVar,
        a: FloatVar,
        b: FloatVar,
    },
    /// `product = k * a`
    ProductConstant {
        product: FloatVar,
        a: FloatVar,
        k: f64,
    },
    /// `quotient = a / b`
    Quotient {
        quotient: FloatVar,
        a: FloatVar,
        b: FloatVar,
    },
    /// `power = a ^ exponent`
    Power {
        power: FloatVar,
        a: FloatVar,
        exponent: u32,
    },
    /// `product = a · b`
    DotProduct {
        product: FloatVar,
        a: [FloatVar; 3],
        b: [FloatVar; 3],
    },
    /// `magnitude = |vector|`
    Magnitude {
        magnitude: FloatVar,
        vector: [FloatVar; 3],
    },
}

impl ConstraintKind {
    /// Every variable the constraint references, with repeats.
    pub(crate) fn variables(&self) -> Vec<FloatVar> {
        match *self {
            ConstraintKind::Sum { sum, a, b } => vec![sum, a, b],
            ConstraintKind::Difference { difference, a, b } => vec![difference, a, b],
            ConstraintKind::Product { product, a, b } => vec![product, a, b],
            ConstraintKind::ProductConstant { product, a, .. } => vec![product, a],
            ConstraintKind::Quotient { quotient, a, b } => vec![quotient, a, b],
            ConstraintKind::Power { power, a, .. } => vec![power, a],
            ConstraintKind::DotProduct { product, a, b } => {
                vec![product, a[0], a[1], a[2], b[0], b[1], b[2]]
            }
            ConstraintKind::Magnitude { magnitude, vector } => {
                vec![magnitude, vector[0], vector[1], vector[2]]
            }
        }
    }
}

/// Arena record for one constraint.
#[derive(Debug)]
pub(crate) struct ConstraintRecord {
    pub(crate) kind: ConstraintKind,
    /// Whether the constraint currently sits on the pending queue.
    pub(crate) queued: bool,
    /// The variable whose narrowing caused the enqueue, if exactly one
    /// did. `None` means "narrow everything".
    pub(crate) trigger: Option<FloatVar>,
}

impl Csp {
    pub(crate) fn add_constraint(&mut self, kind: ConstraintKind) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(ConstraintRecord {
            kind,
            queued: false,
            trigger: None,
        });
        id
    }

    /// Rewrites every constraint through the equality classes and attaches
    /// it to the canonical variables it references. Runs once, at the
    /// configuration→solving transition.
    pub(crate) fn canonicalize_constraints(&mut self) {
        for index in 0..self.constraints.len() {
            let kind = self.canonicalize_kind(self.constraints[index].kind);
            self.constraints[index].kind = kind;
            for v in kind.variables() {
                self.vars[v.0].constraints.push(ConstraintId(index));
            }
        }
    }

    fn canonicalize_kind(&self, kind: ConstraintKind) -> ConstraintKind {
        let c = |v: FloatVar| self.canonical(v);
        match kind {
            ConstraintKind::Sum { sum, a, b } => ConstraintKind::Sum {
                sum: c(sum),
                a: c(a),
                b: c(b),
            },
            ConstraintKind::Difference { difference, a, b } => ConstraintKind::Difference {
                difference: c(difference),
                a: c(a),
                b: c(b),
            },
            ConstraintKind::Product { product, a, b } => ConstraintKind::Product {
                product: c(product),
                a: c(a),
                b: c(b),
            },
            ConstraintKind::ProductConstant { product, a, k } => ConstraintKind::ProductConstant {
                product: c(product),
                a: c(a),
                k,
            },
            ConstraintKind::Quotient { quotient, a, b } => ConstraintKind::Quotient {
                quotient: c(quotient),
                a: c(a),
                b: c(b),
            },
            ConstraintKind::Power { power, a, exponent } => ConstraintKind::Power {
                power: c(power),
                a: c(a),
                exponent,
            },
            ConstraintKind::DotProduct { product, a, b } => ConstraintKind::DotProduct {
                product: c(product),
                a: a.map(c),
                b: b.map(c),
            },
            ConstraintKind::Magnitude { magnitude, vector } => ConstraintKind::Magnitude {
                magnitude: c(magnitude),
                vector: vector.map(c),
            },
        }
    }

    /// Runs one constraint's narrowing rules against the current domains.
    pub(crate) fn propagate(&mut self, c: ConstraintId) -> Result<(), Inconsistent> {
        let kind = self.constraints[c.0].kind;
        let trigger = self.constraints[c.0].trigger;
        match kind {
            ConstraintKind::Sum { sum, a, b } => {
                if trigger != Some(sum) {
                    let r = self.value(a) + self.value(b);
                    self.narrow_to(sum, r)?;
                }
                if trigger != Some(a) {
                    let r = self.value(sum) - self.value(b);
                    self.narrow_to(a, r)?;
                }
                if trigger != Some(b) {
                    let r = self.value(sum) - self.value(a);
                    self.narrow_to(b, r)?;
                }
            }

            ConstraintKind::Difference { difference, a, b } => {
                if trigger != Some(difference) {
                    let r = self.value(a) - self.value(b);
                    self.narrow_to(difference, r)?;
                }
                if trigger != Some(a) {
                    let r = self.value(difference) + self.value(b);
                    self.narrow_to(a, r)?;
                }
                if trigger != Some(b) {
                    let r = self.value(a) - self.value(difference);
                    self.narrow_to(b, r)?;
                }
            }

            ConstraintKind::Product { product, a, b } => {
                if trigger != Some(product) {
                    let r = self.value(a) * self.value(b);
                    self.narrow_to(product, r)?;
                }
                if trigger != Some(a) {
                    let (num, den) = (self.value(product), self.value(b));
                    self.narrow_to_quotient(a, num, den)?;
                }
                if trigger != Some(b) {
                    let (num, den) = (self.value(product), self.value(a));
                    self.narrow_to_quotient(b, num, den)?;
                }
            }

            ConstraintKind::ProductConstant { product, a, k } => {
                if trigger != Some(product) {
                    let r = self.value(a) * k;
                    self.narrow_to(product, r)?;
                }
                if k != 0.0 && trigger != Some(a) {
                    let r = self.value(product) * (1.0 / k);
                    self.narrow_to(a, r)?;
                }
            }

            ConstraintKind::Quotient { quotient, a, b } => {
                if trigger != Some(quotient) {
                    let (num, den) = (self.value(a), self.value(b));
                    self.narrow_to_quotient(quotient, num, den)?;
                }
                if trigger != Some(a) {
                    let r = self.value(quotient) * self.value(b);
                    self.narrow_to(a, r)?;
                }
                if trigger != Some(b) {
                    let (num, den) = (self.value(a), self.value(quotient));
                    self.narrow_to_quotient(b, num, den)?;
                }
            }

            ConstraintKind::Power { power, a, exponent } => {
                if exponent == 0 {
                    // a^0 = 1 regardless of a.
                    return self.narrow_to(power, Interval::singleton(1.0));
                }
                if trigger != Some(power) {
                    let r = self.value(a).pow(exponent);
                    self.narrow_to(power, r)?;
                }
                // The argument is always re-narrowed: for even exponents
                // its restriction depends on its own current sign, which
                // the trigger-skip would miss.
                let p = self.value(power);
                if exponent % 2 == 0 {
                    let root = Interval::inv_power(p, exponent);
                    let av = self.value(a);
                    if av.non_positive() {
                        self.narrow_to(a, -root)?;
                    } else if av.crosses_zero() {
                        self.narrow_to(a, Interval::new(-root.upper, root.upper))?;
                    } else {
                        self.narrow_to(a, root)?;
                    }
                } else {
                    self.narrow_to(a, Interval::inv_power(p, exponent))?;
                }
            }

            ConstraintKind::DotProduct { product, a, b } => {
                let px = self.value(a[0]) * self.value(b[0]);
                let py = self.value(a[1]) * self.value(b[1]);
                let pz = self.value(a[2]) * self.value(b[2]);
                if trigger != Some(product) {
                    self.narrow_to(product, px + py + pz)?;
                }
                if trigger != Some(a[0]) {
                    let (num, den) = (self.value(product) - py - pz, self.value(b[0]));
                    self.narrow_to_quotient(a[0], num, den)?;
                }
                if trigger != Some(a[1]) {
                    let (num, den) = (self.value(product) - px - pz, self.value(b[1]));
                    self.narrow_to_quotient(a[1], num, den)?;
                }
                if trigger != Some(a[2]) {
                    let (num, den) = (self.value(product) - px - py, self.value(b[2]));
                    self.narrow_to_quotient(a[2], num, den)?;
                }
                if trigger != Some(b[0]) {
                    let (num, den) = (self.value(product) - py - pz, self.value(a[0]));
                    self.narrow_to_quotient(b[0], num, den)?;
                }
                if trigger != Some(b[1]) {
                    let (num, den) = (self.value(product) - px - pz, self.value(a[1]));
                    self.narrow_to_quotient(b[1], num, den)?;
                }
                if trigger != Some(b[2]) {
                    let (num, den) = (self.value(product) - px - py, self.value(a[2]));
                    self.narrow_to_quotient(b[2], num, den)?;
                }
            }

            ConstraintKind::Magnitude { magnitude, vector } => {
                let sx = self.value(vector[0]).square();
                let sy = self.value(vector[1]).square();
                let sz = self.value(vector[2]).square();
                if trigger != Some(magnitude) {
                    self.narrow_to(magnitude, Interval::positive_sqrt(sx + sy + sz))?;
                }
                // Components are always re-narrowed for the same
                // sign-dependence reason as the power argument.
                let sm = self.value(magnitude).square();
                self.narrow_to_signed_sqrt(vector[0], sm - sy - sz)?;
                self.narrow_to_signed_sqrt(vector[1], sm - sx - sz)?;
                self.narrow_to_signed_sqrt(vector[2], sm - sx - sy)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::solver::Csp;

    #[test]
    fn test_variables_with_repeats() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        let s = p.add(a, a);
        let kind = ConstraintKind::Sum { sum: s, a, b: a };
        assert_eq!(kind.variables(), vec![s, a, a]);
    }

    #[test]
    fn test_canonicalization_rewrites_through_equalities() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        let b = p.float_var("b", 0.0, 1.0);
        let c = p.float_var("c", 0.0, 2.0);
        let sum = p.add(a, b);
        p.must_equal(sum, c).unwrap();
        p.start_solution_phase();

        let kind = p.constraints[0].kind;
        match kind {
            ConstraintKind::Sum { sum: s, .. } => {
                assert_eq!(s, p.canonical(c));
                assert!(p.is_canonical(s));
            }
            other => panic!("unexpected kind {other:?}"),
        }
        // The canonical sum variable now owns the constraint attachment.
        let cc = p.canonical(c);
        assert_eq!(p.vars[cc.0].constraints.len(), 1);
    }
}
