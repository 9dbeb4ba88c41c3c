//! Solver error taxonomy.

use thiserror::Error;

/// Failure reported to the caller by a whole solver operation.
///
/// `StepLimitExceeded`, `DepthLimitExceeded` and `NoSolution` are
/// retryable: the search is randomized, so a fresh attempt may succeed
/// where the last one exhausted its budget.
#[derive(Debug, Clone, Error)]
pub enum CspError {
    /// Propagation emptied a domain before any search choice was made:
    /// the configuration admits no solution at all.
    #[error("initial configuration is unsatisfiable")]
    Unsatisfiable,

    /// The search exhausted every choice point without finding a full
    /// assignment.
    #[error("no solution found")]
    NoSolution,

    /// The global step budget ran out mid-search.
    #[error("solver ran for more than {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },

    /// The search descended past the choice-point ceiling. Carries the
    /// sequence of choices made, for diagnostics.
    #[error("search depth limit of {max_depth} exceeded; choices:\n{}", choices.join("\n"))]
    DepthLimitExceeded {
        max_depth: usize,
        choices: Vec<String>,
    },

    /// A configuration-only operation was attempted during solving, or
    /// vice versa.
    #[error("phase violation: {0}")]
    PhaseViolation(String),

    /// A bound was imposed that is disjoint from the variable's current
    /// domain.
    #[error("bound {imposed} is outside the current domain {domain} of '{variable}'")]
    OutOfRange {
        variable: String,
        imposed: String,
        domain: String,
    },
}

/// Out-of-band signal that a narrowing produced an empty domain.
///
/// Threaded as `Result<(), Inconsistent>` through every narrowing call so
/// a single failure short-circuits the enclosing propagation batch via
/// `?`. Expected and frequent during search; recovered by backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inconsistent;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CspError::Unsatisfiable.to_string(),
            "initial configuration is unsatisfiable"
        );
        let e = CspError::StepLimitExceeded { max_steps: 1000 };
        assert!(e.to_string().contains("1000"));
        let e = CspError::DepthLimitExceeded {
            max_depth: 2,
            choices: vec!["guess x = 1".into(), "lower half of y".into()],
        };
        assert!(e.to_string().contains("guess x = 1"));
    }
}
