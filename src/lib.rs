//! Interval-arithmetic constraint solver.
//!
//! Expresses systems of nonlinear numeric constraints over real-valued
//! variables and samples random solutions from them:
//!
//! - **Interval arithmetic**: [`interval::Interval`], closed real
//!   intervals with sound arithmetic, including the zero case splits for
//!   division and inverse powers.
//! - **Trail**: [`trail::Trail`], transactional cell storage with
//!   O(changes) rollback, the undo machinery behind backtracking.
//! - **CSP**: [`csp::Csp`], with variables, derived expressions, equality
//!   classes, worklist propagation, and randomized bisection search.
//!
//! # Example
//!
//! ```
//! use interval_csp::csp::Csp;
//!
//! // Two unknowns a fixed distance apart.
//! let mut p = Csp::new();
//! let x = p.float_var("x", 0.0, 5.0);
//! let y = p.float_var("y", 0.0, 5.0);
//! let gap = p.sub(x, y);
//! p.must_equal_constant(gap, 1.0).unwrap();
//!
//! p.new_solution().unwrap();
//! assert!((p.unique_value(x) - p.unique_value(y) - 1.0).abs() < 1e-3);
//! ```

pub mod csp;
pub mod interval;
pub mod num;
pub mod trail;
