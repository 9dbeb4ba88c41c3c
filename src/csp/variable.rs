//! Scalar and vector variables: construction, equality classes, narrowing.
//!
//! Variables live in an arena owned by the [`Csp`]; handles are plain
//! indices. Equality between variables is a union-find forwarding link:
//! `must_equal` forwards the left operand's class onto the right operand,
//! and reads always resolve through the chain to the canonical
//! representative, whose domain is the single source of truth.

use crate::csp::constraint::{ConstraintId, ConstraintKind};
use crate::csp::error::{CspError, Inconsistent};
use crate::csp::memo::MemoArg;
use crate::csp::solver::Csp;
use crate::interval::{Interval, ALL_VALUES};
use crate::trail::CellId;

/// Handle to a scalar variable with an [`Interval`] domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatVar(pub(crate) usize);

/// A named triple of scalar variables. Not a distinct domain kind:
/// every vector operation decomposes into scalar constraints over the
/// components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vec3Var {
    pub x: FloatVar,
    pub y: FloatVar,
    pub z: FloatVar,
}

impl Vec3Var {
    pub(crate) fn components(&self) -> [FloatVar; 3] {
        [self.x, self.y, self.z]
    }
}

/// Arena record for one scalar variable.
#[derive(Debug)]
pub(crate) struct VarRecord {
    pub(crate) name: String,
    /// Union-find forwarding link; equals the record's own index when
    /// this variable is the canonical member of its class.
    pub(crate) parent: usize,
    /// Domain storage. `None` once the variable has been forwarded away
    /// by `must_equal`, so stale direct reads cannot happen silently.
    pub(crate) cell: Option<CellId>,
    /// Constraints referencing this variable. Populated for canonical
    /// variables at the configuration→solving transition.
    pub(crate) constraints: Vec<ConstraintId>,
    /// Domain width after initial propagation; basis for the
    /// most-reduced-first heuristic.
    pub(crate) starting_width: f64,
}

impl Csp {
    /// Creates a scalar variable with domain `[lower, upper]`.
    ///
    /// # Panics
    ///
    /// Panics outside the configuration phase.
    pub fn float_var(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> FloatVar {
        self.float_var_in(name, Interval::new(lower, upper))
    }

    /// Creates a scalar variable with the given initial domain.
    ///
    /// # Panics
    ///
    /// Panics outside the configuration phase.
    pub fn float_var_in(&mut self, name: impl Into<String>, domain: Interval) -> FloatVar {
        self.assert_configuration_phase();
        let cell = self.trail.alloc(domain);
        let index = self.vars.len();
        self.vars.push(VarRecord {
            name: name.into(),
            parent: index,
            cell: Some(cell),
            constraints: Vec::new(),
            starting_width: 0.0,
        });
        FloatVar(index)
    }

    /// Creates a scalar variable with the unbounded domain.
    ///
    /// # Panics
    ///
    /// Panics outside the configuration phase.
    pub fn float_var_unbounded(&mut self, name: impl Into<String>) -> FloatVar {
        self.float_var_in(name, ALL_VALUES)
    }

    /// Returns the memoized variable holding the constant `k`.
    ///
    /// # Panics
    ///
    /// Panics outside the configuration phase.
    pub fn constant(&mut self, k: f64) -> FloatVar {
        self.assert_configuration_phase();
        let key = [MemoArg::constant(k)];
        if let Some(index) = self.memo.lookup("constant", &key) {
            return FloatVar(index);
        }
        let v = self.float_var_in(k.to_string(), Interval::singleton(k));
        self.memo.insert("constant", &key, v.0);
        v
    }

    /// The canonical representative of `v`'s equality class.
    pub(crate) fn canonical(&self, v: FloatVar) -> FloatVar {
        let mut index = v.0;
        while self.vars[index].parent != index {
            index = self.vars[index].parent;
        }
        FloatVar(index)
    }

    pub(crate) fn is_canonical(&self, v: FloatVar) -> bool {
        self.vars[v.0].parent == v.0
    }

    /// Current domain of `v`, resolved through its equality class.
    pub fn value(&self, v: FloatVar) -> Interval {
        let canon = self.canonical(v);
        let cell = self.vars[canon.0]
            .cell
            .expect("canonical variable always has domain storage");
        *self.trail.get(cell)
    }

    /// Whether `v`'s domain is a single point.
    pub fn is_unique(&self, v: FloatVar) -> bool {
        self.value(v).is_unique()
    }

    /// The single value of a fully narrowed variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable's domain is not unique.
    pub fn unique_value(&self, v: FloatVar) -> f64 {
        self.value(v).unique_value()
    }

    /// Diagnostic name of `v`.
    pub fn var_name(&self, v: FloatVar) -> &str {
        &self.vars[v.0].name
    }

    /// Intersects `v`'s domain with `bound` before solving begins.
    ///
    /// Fails with [`CspError::OutOfRange`] if the bound is disjoint from
    /// the current domain, and with [`CspError::PhaseViolation`] when
    /// called after solving has started.
    pub fn must_be_contained_in(&mut self, v: FloatVar, bound: Interval) -> Result<(), CspError> {
        if !self.configuration_phase {
            return Err(CspError::PhaseViolation(
                "bounds can only be imposed before solving".into(),
            ));
        }
        let canon = self.canonical(v);
        let current = self.value(canon);
        let intersection = Interval::intersection(current, bound);
        if intersection.is_empty() {
            return Err(CspError::OutOfRange {
                variable: self.vars[canon.0].name.clone(),
                imposed: bound.to_string(),
                domain: current.to_string(),
            });
        }
        let cell = self.vars[canon.0]
            .cell
            .expect("canonical variable always has domain storage");
        self.trail
            .set_initial(cell, intersection)
            .map_err(CspError::PhaseViolation)
    }

    /// Requires `v` to equal the constant `k`.
    pub fn must_equal_constant(&mut self, v: FloatVar, k: f64) -> Result<(), CspError> {
        self.must_be_contained_in(v, Interval::singleton(k))
    }

    /// Requires `a` and `b` to always have the same value.
    ///
    /// Implemented by forwarding `a`'s equality class onto `b`; `b`'s
    /// domain is first intersected with `a`'s so the merged class starts
    /// from a consistent range.
    pub fn must_equal(&mut self, a: FloatVar, b: FloatVar) -> Result<(), CspError> {
        let a_value = self.value(a);
        self.must_be_contained_in(b, a_value)?;
        let ca = self.canonical(a);
        let cb = self.canonical(b);
        if ca == cb {
            return Ok(());
        }
        self.vars[ca.0].parent = cb.0;
        self.vars[ca.0].cell = None;
        Ok(())
    }

    /// Intersects the canonical variable `v`'s domain with `restriction`,
    /// enqueueing its constraints for re-propagation when the domain
    /// shrank materially.
    ///
    /// A unique domain tolerates restrictions that nearly contain it and
    /// fails on any other. A nearly-unique intersection collapses to its
    /// exact midpoint so razor-thin intervals cannot accumulate.
    pub(crate) fn narrow_to(
        &mut self,
        v: FloatVar,
        restriction: Interval,
    ) -> Result<(), Inconsistent> {
        debug_assert!(self.is_canonical(v));
        let epsilon = self.config.epsilon;
        let value = self.value(v);

        if value.is_unique() {
            if restriction.nearly_contains(value, epsilon) {
                return Ok(());
            }
            return Err(Inconsistent);
        }

        if restriction.contains_interval(value) {
            return Ok(());
        }

        let mut new_value = Interval::intersection(value, restriction);
        if new_value.nearly_unique(epsilon) {
            new_value = Interval::singleton(new_value.midpoint());
        }
        if new_value.is_empty() {
            return Err(Inconsistent);
        }

        // Hysteresis: negligible floating-point narrowings are stored but
        // not propagated, bounding the number of re-enqueues.
        let propagate = new_value.width() / value.width() < self.config.narrowing_hysteresis;
        let cell = self.vars[v.0]
            .cell
            .expect("canonical variable always has domain storage");
        self.trail.set(cell, new_value);
        if propagate {
            for i in 0..self.vars[v.0].constraints.len() {
                let c = self.vars[v.0].constraints[i];
                self.queue_propagation(c, v);
            }
        }
        Ok(())
    }

    /// Narrows `v` to the union of `value ∩ a` and `value ∩ b`, where
    /// `value` is the current domain. Recombines a narrowing computed as
    /// two disjoint branches.
    pub(crate) fn narrow_to_union(
        &mut self,
        v: FloatVar,
        a: Interval,
        b: Interval,
    ) -> Result<(), Inconsistent> {
        let value = self.value(v);
        self.narrow_to(v, Interval::union_of_intersections(value, a, b))
    }

    /// Narrows `v` to `numerator / denominator`, with the full case split
    /// for zero-containing denominators.
    pub(crate) fn narrow_to_quotient(
        &mut self,
        v: FloatVar,
        numerator: Interval,
        denominator: Interval,
    ) -> Result<(), Inconsistent> {
        if denominator.is_zero() {
            // x/0 is undefined unless the numerator admits zero, in which
            // case the quotient is unconstrained.
            return if numerator.contains_zero() {
                Ok(())
            } else {
                Err(Inconsistent)
            };
        }

        if numerator.is_zero() {
            if !denominator.contains_zero() {
                return self.narrow_to(v, Interval::singleton(0.0));
            }
            // 0/0 can be anything.
            return Ok(());
        }

        if !denominator.contains_zero() {
            return self.narrow_to(v, numerator * denominator.reciprocal());
        }

        // Denominator touches zero: [0, b], [a, 0], or straddling.
        if denominator.lower == 0.0 {
            if numerator.non_positive() {
                return self.narrow_to(
                    v,
                    Interval::new(f64::NEG_INFINITY, numerator.upper / denominator.upper),
                );
            }
            if numerator.non_negative() {
                return self.narrow_to(
                    v,
                    Interval::new(numerator.lower / denominator.upper, f64::INFINITY),
                );
            }
            // Numerator crosses zero: quotient is all reals.
            return Ok(());
        }

        if denominator.upper == 0.0 {
            if numerator.non_positive() {
                return self.narrow_to(
                    v,
                    Interval::new(numerator.upper / denominator.lower, f64::INFINITY),
                );
            }
            if numerator.non_negative() {
                return self.narrow_to(
                    v,
                    Interval::new(f64::NEG_INFINITY, numerator.lower / denominator.lower),
                );
            }
            return Ok(());
        }

        // Denominator strictly straddles zero: the quotient is two
        // unbounded rays, recombined against the current domain.
        if numerator.strictly_negative() {
            let lower_ray =
                Interval::new(f64::NEG_INFINITY, numerator.upper / denominator.upper);
            let upper_ray = Interval::new(numerator.upper / denominator.lower, f64::INFINITY);
            return self.narrow_to_union(v, lower_ray, upper_ray);
        }
        if numerator.strictly_positive() {
            let lower_ray =
                Interval::new(f64::NEG_INFINITY, numerator.lower / denominator.lower);
            let upper_ray = Interval::new(numerator.lower / denominator.upper, f64::INFINITY);
            return self.narrow_to_union(v, lower_ray, upper_ray);
        }

        // Numerator contains zero: quotient is all reals.
        Ok(())
    }

    /// Narrows `v` to a signed square root of `square`, keeping whichever
    /// sign branches the current domain still admits.
    pub(crate) fn narrow_to_signed_sqrt(
        &mut self,
        v: FloatVar,
        square: Interval,
    ) -> Result<(), Inconsistent> {
        let lower = square.lower.max(0.0);
        let upper = square.upper;
        if upper < 0.0 {
            return Err(Inconsistent);
        }
        let sqrt = Interval::new(lower.sqrt(), upper.sqrt());
        let value = self.value(v);
        let restriction = if value.crosses_zero() {
            Interval::union_of_intersections(value, sqrt, -sqrt)
        } else if value.upper <= 0.0 {
            -sqrt
        } else {
            sqrt
        };
        self.narrow_to(v, restriction)
    }

    /// Builds (or finds in the memo table) a derived variable named
    /// `name` with initial domain `init`, linked to its operands by the
    /// constraint produced by `kind`.
    fn derived(
        &mut self,
        op: &'static str,
        key: &[MemoArg],
        name: &str,
        init: Interval,
        kind: impl FnOnce(FloatVar) -> ConstraintKind,
    ) -> FloatVar {
        self.assert_configuration_phase();
        if let Some(index) = self.memo.lookup(op, key) {
            return FloatVar(index);
        }
        let v = self.float_var_in(name, init);
        self.add_constraint(kind(v));
        self.memo.insert(op, key, v.0);
        v
    }

    /// Derived variable constrained to `a + b`.
    pub fn add(&mut self, a: FloatVar, b: FloatVar) -> FloatVar {
        let init = self.value(a) + self.value(b);
        self.derived(
            "+",
            &[MemoArg::Var(a.0), MemoArg::Var(b.0)],
            "sum",
            init,
            |sum| ConstraintKind::Sum { sum, a, b },
        )
    }

    /// Derived variable constrained to `a - b`.
    pub fn sub(&mut self, a: FloatVar, b: FloatVar) -> FloatVar {
        let init = self.value(a) - self.value(b);
        self.derived(
            "-",
            &[MemoArg::Var(a.0), MemoArg::Var(b.0)],
            "difference",
            init,
            |difference| ConstraintKind::Difference { difference, a, b },
        )
    }

    /// Derived variable constrained to `a * b`.
    pub fn mul(&mut self, a: FloatVar, b: FloatVar) -> FloatVar {
        let init = self.value(a) * self.value(b);
        self.derived(
            "*",
            &[MemoArg::Var(a.0), MemoArg::Var(b.0)],
            "product",
            init,
            |product| ConstraintKind::Product { product, a, b },
        )
    }

    /// Derived variable constrained to `k * a`.
    pub fn scale(&mut self, k: f64, a: FloatVar) -> FloatVar {
        let init = self.value(a) * k;
        self.derived(
            "*",
            &[MemoArg::constant(k), MemoArg::Var(a.0)],
            "product",
            init,
            |product| ConstraintKind::ProductConstant { product, a, k },
        )
    }

    /// Derived variable constrained to `a / b`.
    pub fn div(&mut self, a: FloatVar, b: FloatVar) -> FloatVar {
        let init = self.value(a) / self.value(b);
        self.derived(
            "/",
            &[MemoArg::Var(a.0), MemoArg::Var(b.0)],
            "quotient",
            init,
            |quotient| ConstraintKind::Quotient { quotient, a, b },
        )
    }

    /// Derived variable constrained to `a ^ exponent`.
    pub fn pow(&mut self, a: FloatVar, exponent: u32) -> FloatVar {
        let init = self.value(a).pow(exponent);
        self.derived(
            "^",
            &[MemoArg::Var(a.0), MemoArg::Uint(exponent)],
            "power",
            init,
            |power| ConstraintKind::Power { power, a, exponent },
        )
    }

    /// Creates a vector variable with per-component domains; components
    /// are named `{name}.x`, `{name}.y`, `{name}.z`.
    pub fn vec3_var(
        &mut self,
        name: &str,
        x: Interval,
        y: Interval,
        z: Interval,
    ) -> Vec3Var {
        Vec3Var {
            x: self.float_var_in(format!("{name}.x"), x),
            y: self.float_var_in(format!("{name}.y"), y),
            z: self.float_var_in(format!("{name}.z"), z),
        }
    }

    /// Creates a vector variable fixed at the point `(x, y, z)`.
    pub fn vec3_point(&mut self, name: &str, x: f64, y: f64, z: f64) -> Vec3Var {
        self.vec3_var(
            name,
            Interval::singleton(x),
            Interval::singleton(y),
            Interval::singleton(z),
        )
    }

    /// Componentwise vector sum.
    pub fn vec_add(&mut self, a: Vec3Var, b: Vec3Var) -> Vec3Var {
        Vec3Var {
            x: self.add(a.x, b.x),
            y: self.add(a.y, b.y),
            z: self.add(a.z, b.z),
        }
    }

    /// Componentwise vector difference.
    pub fn vec_sub(&mut self, a: Vec3Var, b: Vec3Var) -> Vec3Var {
        Vec3Var {
            x: self.sub(a.x, b.x),
            y: self.sub(a.y, b.y),
            z: self.sub(a.z, b.z),
        }
    }

    /// Vector scaled by a scalar variable.
    pub fn vec_scale(&mut self, s: FloatVar, v: Vec3Var) -> Vec3Var {
        Vec3Var {
            x: self.mul(s, v.x),
            y: self.mul(s, v.y),
            z: self.mul(s, v.z),
        }
    }

    /// Vector scaled by a constant.
    pub fn vec_scale_const(&mut self, k: f64, v: Vec3Var) -> Vec3Var {
        Vec3Var {
            x: self.scale(k, v.x),
            y: self.scale(k, v.y),
            z: self.scale(k, v.z),
        }
    }

    /// Vector divided componentwise by a scalar variable.
    pub fn vec_div(&mut self, v: Vec3Var, s: FloatVar) -> Vec3Var {
        Vec3Var {
            x: self.div(v.x, s),
            y: self.div(v.y, s),
            z: self.div(v.z, s),
        }
    }

    /// Derived scalar constrained to the dot product of `a` and `b`.
    pub fn dot(&mut self, a: Vec3Var, b: Vec3Var) -> FloatVar {
        let init = self.value(a.x) * self.value(b.x)
            + self.value(a.y) * self.value(b.y)
            + self.value(a.z) * self.value(b.z);
        let key = [
            MemoArg::Var(a.x.0),
            MemoArg::Var(a.y.0),
            MemoArg::Var(a.z.0),
            MemoArg::Var(b.x.0),
            MemoArg::Var(b.y.0),
            MemoArg::Var(b.z.0),
        ];
        self.derived("dot", &key, "dot", init, |product| {
            ConstraintKind::DotProduct {
                product,
                a: a.components(),
                b: b.components(),
            }
        })
    }

    /// Derived scalar constrained to the Euclidean magnitude of `v`.
    pub fn magnitude(&mut self, v: Vec3Var) -> FloatVar {
        let init = Interval::positive_sqrt(
            self.value(v.x).square() + self.value(v.y).square() + self.value(v.z).square(),
        );
        let key = [
            MemoArg::Var(v.x.0),
            MemoArg::Var(v.y.0),
            MemoArg::Var(v.z.0),
        ];
        self.derived("magnitude", &key, "magnitude", init, |magnitude| {
            ConstraintKind::Magnitude {
                magnitude,
                vector: v.components(),
            }
        })
    }

    /// Requires `a` and `b` to be equal componentwise.
    pub fn vec_must_equal(&mut self, a: Vec3Var, b: Vec3Var) -> Result<(), CspError> {
        self.must_equal(a.x, b.x)?;
        self.must_equal(a.y, b.y)?;
        self.must_equal(a.z, b.z)
    }

    /// Requires `a` to be a scalar multiple of `b`.
    pub fn must_be_parallel(&mut self, a: Vec3Var, b: Vec3Var) -> Result<(), CspError> {
        let coefficient = self.float_var_unbounded("parallel_coefficient");
        let scaled = self.vec_scale(coefficient, b);
        self.vec_must_equal(a, scaled)
    }

    /// Requires the dot product of `a` and `b` to be zero.
    pub fn must_be_perpendicular(&mut self, a: Vec3Var, b: Vec3Var) -> Result<(), CspError> {
        let d = self.dot(a, b);
        self.must_equal_constant(d, 0.0)
    }

    /// The components of a fully narrowed vector variable.
    ///
    /// # Panics
    ///
    /// Panics if any component's domain is not unique.
    pub fn vec_unique_value(&self, v: Vec3Var) -> [f64; 3] {
        [
            self.unique_value(v.x),
            self.unique_value(v.y),
            self.unique_value(v.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::solver::Csp;

    #[test]
    fn test_variable_creation_and_value() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        assert_eq!(p.value(a), Interval::new(0.0, 1.0));
        assert_eq!(p.var_name(a), "a");
        assert!(!p.is_unique(a));

        let u = p.float_var_unbounded("u");
        assert_eq!(p.value(u), ALL_VALUES);
    }

    #[test]
    fn test_constant_is_memoized() {
        let mut p = Csp::new();
        let c1 = p.constant(0.5);
        let c2 = p.constant(0.5);
        let c3 = p.constant(0.25);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
        assert!(p.is_unique(c1));
        assert_eq!(p.unique_value(c1), 0.5);
    }

    #[test]
    fn test_smart_constructors_are_memoized() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        let b = p.float_var("b", 0.0, 1.0);
        let s1 = p.add(a, b);
        let s2 = p.add(a, b);
        assert_eq!(s1, s2);
        // Operand order is part of the identity
        let s3 = p.add(b, a);
        assert_ne!(s1, s3);
        // Only two sum constraints were built
        assert_eq!(p.constraint_count(), 2);
    }

    #[test]
    fn test_must_be_contained_in_narrows_initial_domain() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        p.must_be_contained_in(a, Interval::new(0.25, 2.0)).unwrap();
        assert_eq!(p.value(a), Interval::new(0.25, 1.0));
    }

    #[test]
    fn test_disjoint_bound_is_rejected() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        let err = p.must_be_contained_in(a, Interval::new(2.0, 3.0));
        assert!(matches!(err, Err(CspError::OutOfRange { .. })));
    }

    #[test]
    fn test_must_equal_merges_classes() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        let b = p.float_var("b", 0.5, 2.0);
        p.must_equal(a, b).unwrap();
        // b's domain was intersected with a's; a reads through to b.
        assert_eq!(p.value(b), Interval::new(0.5, 1.0));
        assert_eq!(p.value(a), p.value(b));
        assert!(!p.is_canonical(a));
        assert!(p.is_canonical(b));
    }

    #[test]
    fn test_must_equal_self_is_harmless() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        p.must_equal(a, a).unwrap();
        assert!(p.is_canonical(a));
        assert_eq!(p.value(a), Interval::new(0.0, 1.0));
    }

    #[test]
    fn test_narrowing_is_monotonic() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 10.0);
        let mut last_width = p.value(a).width();
        for restriction in [
            Interval::new(1.0, 9.0),
            Interval::new(0.0, 7.0),
            Interval::new(2.0, 100.0),
            Interval::new(2.5, 6.0),
        ] {
            p.narrow_to(a, restriction).unwrap();
            let width = p.value(a).width();
            assert!(width <= last_width);
            last_width = width;
        }
    }

    #[test]
    fn test_narrow_to_empty_fails() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        assert!(p.narrow_to(a, Interval::new(2.0, 3.0)).is_err());
    }

    #[test]
    fn test_narrow_unique_tolerates_containing_restriction() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.5, 0.5);
        assert!(p.narrow_to(a, Interval::new(0.0, 1.0)).is_ok());
        assert!(p.narrow_to(a, Interval::new(0.6, 1.0)).is_err());
    }

    #[test]
    fn test_nearly_unique_collapses_to_midpoint() {
        let mut p = Csp::new();
        let a = p.float_var("a", 0.0, 1.0);
        p.narrow_to(a, Interval::new(0.5, 0.5 + 1e-10)).unwrap();
        assert!(p.is_unique(a));
    }

    #[test]
    fn test_vec3_component_names() {
        let mut p = Csp::new();
        let v = p.vec3_var("v", ALL_VALUES, ALL_VALUES, ALL_VALUES);
        assert_eq!(p.var_name(v.x), "v.x");
        assert_eq!(p.var_name(v.z), "v.z");
    }

    #[test]
    fn test_vec_div_by_constant_scalar() {
        let mut p = Csp::new();
        let v = p.vec3_point("v", 2.0, 4.0, 6.0);
        let two = p.constant(2.0);
        let q = p.vec_div(v, two);
        assert_eq!(p.vec_unique_value(q), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_vec3_point_is_unique() {
        let mut p = Csp::new();
        let v = p.vec3_point("e", 1.0, 0.0, 0.0);
        assert_eq!(p.vec_unique_value(v), [1.0, 0.0, 0.0]);
    }
}
