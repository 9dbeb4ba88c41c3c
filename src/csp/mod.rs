//! Numeric constraint satisfaction over interval domains.
//!
//! Models a system of nonlinear arithmetic relations between real-valued
//! unknowns and finds random point solutions for it.
//!
//! # Key Components
//!
//! - **Variables**: [`FloatVar`] and [`Vec3Var`], unknowns with interval
//!   domains created through [`Csp`]
//! - **Expressions**: smart constructors ([`Csp::add`], [`Csp::mul`],
//!   [`Csp::dot`], ...) that build derived variables and the constraints
//!   tying them to their operands, with common subexpressions shared
//! - **Requirements**: [`Csp::must_equal`], [`Csp::must_be_contained_in`]
//!   and friends, imposed during configuration
//! - **Solving**: [`Csp::test_consistency`] for pure propagation,
//!   [`Csp::new_solution`] for a full randomized solve
//!
//! # Design
//!
//! Propagation is worklist-driven arc consistency over sound interval
//! extensions of each operation. Search interleaves propagation with
//! randomized bisection and backtracks chronologically through the trail.
//! Solutions are point assignments; re-calling [`Csp::new_solution`]
//! samples a different one.
//!
//! # References
//!
//! Davis (1987), "Constraint propagation with interval labels"

mod config;
mod constraint;
mod error;
mod memo;
mod solver;
mod variable;

pub use config::{CspConfig, VariableChoice};
pub use error::CspError;
pub use solver::Csp;
pub use variable::{FloatVar, Vec3Var};
