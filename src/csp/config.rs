//! Solver configuration.

/// Strategy for picking the next variable to split during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableChoice {
    /// Uniformly random among the non-unique canonical variables.
    ///
    /// Randomized restarts tend to recover well from bad early splits,
    /// so this is the default.
    #[default]
    Random,

    /// The variable whose domain has shrunk least relative to its width
    /// at the start of the search, i.e. the one with the most left to
    /// decide.
    LeastReduced,
}

/// Configuration for a [`Csp`](crate::csp::Csp) instance.
///
/// # Examples
///
/// ```
/// use interval_csp::csp::CspConfig;
///
/// let config = CspConfig::default()
///     .with_max_steps(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspConfig {
    /// Maximum number of search steps before the solver gives up.
    pub max_steps: usize,

    /// Maximum number of outstanding choice points. Exceeding this is a
    /// retryable failure, not a crash.
    pub max_depth: usize,

    /// A narrowing is only propagated to dependents when the new width
    /// divided by the old width falls below this ratio.
    ///
    /// The threshold keeps negligible floating-point narrowings from
    /// triggering propagation storms. It trades termination speed against
    /// solution tightness; calibrate it against the target precision.
    pub narrowing_hysteresis: f64,

    /// Tolerance for collapse-to-point and no-op narrowing tests.
    pub epsilon: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Variable selection strategy for the search.
    pub variable_choice: VariableChoice,
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_depth: 200,
            narrowing_hysteresis: 0.99,
            epsilon: crate::num::DEFAULT_EPSILON,
            seed: None,
            variable_choice: VariableChoice::default(),
        }
    }
}

impl CspConfig {
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_max_depth(mut self, n: usize) -> Self {
        self.max_depth = n;
        self
    }

    pub fn with_narrowing_hysteresis(mut self, ratio: f64) -> Self {
        self.narrowing_hysteresis = ratio;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_variable_choice(mut self, choice: VariableChoice) -> Self {
        self.variable_choice = choice;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 {
            return Err("max_steps must be positive".into());
        }
        if self.max_depth == 0 {
            return Err("max_depth must be positive".into());
        }
        if self.narrowing_hysteresis <= 0.0 || self.narrowing_hysteresis > 1.0 {
            return Err(format!(
                "narrowing_hysteresis must be in (0, 1], got {}",
                self.narrowing_hysteresis
            ));
        }
        if self.epsilon <= 0.0 {
            return Err(format!("epsilon must be positive, got {}", self.epsilon));
        }
        Ok(())
    }
}
