//! The constraint solver: phases, the propagation worklist, and the
//! randomized bisection search.
//!
//! A [`Csp`] lives through two phases. During *configuration* the caller
//! creates variables, composes derived expressions and imposes bounds.
//! The first call to [`Csp::test_consistency`] or [`Csp::new_solution`]
//! switches it permanently to the *solving* phase: equality classes are
//! frozen, constraints are rewritten onto canonical variables, and from
//! then on every domain mutation goes through the trail so search can
//! backtrack. [`Csp::new_solution`] can be called repeatedly; each call
//! rewinds to the initial domains and draws a fresh random solution.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::csp::config::{CspConfig, VariableChoice};
use crate::csp::constraint::{ConstraintId, ConstraintRecord};
use crate::csp::error::{CspError, Inconsistent};
use crate::csp::memo::MemoTable;
use crate::csp::variable::{FloatVar, VarRecord};
use crate::interval::Interval;
use crate::trail::{Mark, Trail};

/// A numeric constraint-satisfaction problem over interval domains.
///
/// # Examples
///
/// ```
/// use interval_csp::csp::Csp;
///
/// let mut p = Csp::new();
/// let a = p.float_var("a", 0.0, 1.0);
/// let b = p.float_var("b", 0.0, 1.0);
/// let sum = p.add(a, b);
/// p.must_equal_constant(sum, 1.0).unwrap();
/// p.new_solution().unwrap();
/// let total = p.unique_value(a) + p.unique_value(b);
/// assert!((total - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct Csp {
    pub(crate) config: CspConfig,
    pub(crate) vars: Vec<VarRecord>,
    pub(crate) constraints: Vec<ConstraintRecord>,
    pub(crate) trail: Trail<Interval>,
    /// FIFO worklist of constraints awaiting propagation; each constraint
    /// appears at most once (guarded by its `queued` flag).
    pending: VecDeque<ConstraintId>,
    /// The constraint currently being propagated, which must not requeue
    /// itself through its own narrowings.
    currently_propagating: Option<ConstraintId>,
    pub(crate) memo: MemoTable,
    pub(crate) configuration_phase: bool,
    canonical_vars: Vec<FloatVar>,
    steps: usize,
    /// Descriptions of the search choices currently in force, for
    /// diagnostics on depth-limit failures.
    choices: Vec<String>,
    rng: StdRng,
}

/// One open choice point on the explicit search stack.
#[derive(Debug)]
struct ChoiceFrame {
    var: FloatVar,
    mark: Mark,
    /// 0 = random point guess, 1 and 2 = the two bisection halves,
    /// 3 = exhausted.
    stage: u8,
    lower_first: bool,
}

impl Csp {
    /// Creates a solver with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CspConfig::default())
    }

    /// Creates a solver with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails validation.
    pub fn with_config(config: CspConfig) -> Self {
        config.validate().expect("invalid CspConfig");
        let seed = config.seed.unwrap_or_else(rand::random);
        Csp {
            rng: StdRng::seed_from_u64(seed),
            config,
            vars: Vec::new(),
            constraints: Vec::new(),
            trail: Trail::new(),
            pending: VecDeque::new(),
            currently_propagating: None,
            memo: MemoTable::new(),
            configuration_phase: true,
            canonical_vars: Vec::new(),
            steps: 0,
            choices: Vec::new(),
        }
    }

    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Search steps consumed by the most recent solve.
    pub fn steps_used(&self) -> usize {
        self.steps
    }

    pub(crate) fn assert_configuration_phase(&self) {
        assert!(
            self.configuration_phase,
            "variables and constraints can only be created before solving starts"
        );
    }

    /// Freezes the configuration: rewrites constraints through the
    /// equality classes and records the canonical variable set. Runs at
    /// most once.
    pub(crate) fn start_solution_phase(&mut self) {
        if !self.configuration_phase {
            return;
        }
        self.configuration_phase = false;
        self.canonicalize_constraints();
        self.canonical_vars = (0..self.vars.len())
            .map(FloatVar)
            .filter(|&v| self.is_canonical(v))
            .collect();
    }

    /// Schedules `constraint` for (re-)propagation because `changed`
    /// narrowed. A constraint never requeues itself mid-propagation, and
    /// a second wake-up while queued widens the trigger to "narrow
    /// everything" rather than adding a duplicate queue entry.
    pub(crate) fn queue_propagation(&mut self, constraint: ConstraintId, changed: FloatVar) {
        if self.currently_propagating == Some(constraint) {
            return;
        }
        let record = &mut self.constraints[constraint.0];
        if record.queued {
            record.trigger = None;
        } else {
            record.queued = true;
            record.trigger = Some(changed);
            self.pending.push_back(constraint);
        }
    }

    fn enqueue_all(&mut self) {
        for index in 0..self.constraints.len() {
            let record = &mut self.constraints[index];
            record.queued = true;
            record.trigger = None;
            self.pending.push_back(ConstraintId(index));
        }
    }

    fn clear_pending(&mut self) {
        while let Some(c) = self.pending.pop_front() {
            self.constraints[c.0].queued = false;
            self.constraints[c.0].trigger = None;
        }
        self.currently_propagating = None;
    }

    /// Drains the worklist to a fixed point (or the first inconsistency).
    fn make_consistent(&mut self) -> Result<(), Inconsistent> {
        while let Some(c) = self.pending.pop_front() {
            self.constraints[c.0].queued = false;
            self.currently_propagating = Some(c);
            let result = self.propagate(c);
            self.currently_propagating = None;
            if result.is_err() {
                // Leftover queue entries belong to the failed state; the
                // caller will backtrack past them.
                self.clear_pending();
                return Err(Inconsistent);
            }
        }
        Ok(())
    }

    /// Runs initial propagation without searching, narrowing every domain
    /// as far as the constraints force. Fails with
    /// [`CspError::Unsatisfiable`] when the configuration admits no
    /// solution at all.
    pub fn test_consistency(&mut self) -> Result<(), CspError> {
        self.start_solution_phase();
        self.clear_pending();
        self.enqueue_all();
        self.make_consistent().map_err(|_| CspError::Unsatisfiable)
    }

    /// Finds a random solution: every canonical variable ends with a
    /// unique value consistent with all constraints.
    ///
    /// Rewinds all search-time narrowing first, so repeated calls draw
    /// independent solutions from the full initial domains.
    pub fn new_solution(&mut self) -> Result<(), CspError> {
        self.start_solution_phase();
        self.choices.clear();
        self.steps = 0;
        self.trail.restore(Mark::BASE);
        self.clear_pending();
        self.enqueue_all();
        self.make_consistent().map_err(|_| CspError::Unsatisfiable)?;
        for index in 0..self.canonical_vars.len() {
            let v = self.canonical_vars[index];
            self.vars[v.0].starting_width = self.value(v).width();
        }
        self.search()
    }

    /// Depth-first search over an explicit stack of choice frames, with
    /// chronological backtracking via trail marks.
    fn search(&mut self) -> Result<(), CspError> {
        let mut frames: Vec<ChoiceFrame> = Vec::new();

        'descend: loop {
            self.steps += 1;
            if self.steps > self.config.max_steps {
                return Err(CspError::StepLimitExceeded {
                    max_steps: self.config.max_steps,
                });
            }

            let var = match self.choose_variable() {
                Some(v) => v,
                // Every canonical variable is unique: full solution.
                None => return Ok(()),
            };

            if frames.len() >= self.config.max_depth {
                return Err(CspError::DepthLimitExceeded {
                    max_depth: self.config.max_depth,
                    choices: self.choices.clone(),
                });
            }

            let lower_first = self.rng.random::<bool>();
            frames.push(ChoiceFrame {
                var,
                mark: self.trail.mark(),
                stage: 0,
                lower_first,
            });

            // Try this frame's candidates; on exhaustion unwind to the
            // parent frame and resume its candidates.
            loop {
                let (var, mark, stage, lower_first) = {
                    let frame = frames.last().expect("at least one open frame");
                    (frame.var, frame.mark, frame.stage, frame.lower_first)
                };

                if stage > 2 {
                    frames.pop();
                    match frames.last() {
                        None => return Err(CspError::NoSolution),
                        Some(parent) => {
                            // Undo the parent's current candidate before
                            // resuming its remaining ones.
                            self.choices.pop();
                            self.trail.restore(parent.mark);
                            continue;
                        }
                    }
                }
                frames.last_mut().expect("frame still open").stage += 1;

                let domain = self.value(var);
                let candidate = match (stage, lower_first) {
                    (0, _) => Interval::singleton(domain.random_element(&mut self.rng)),
                    (1, true) | (2, false) => domain.lower_half(),
                    _ => domain.upper_half(),
                };

                let description = format!("{} in {}", self.vars[var.0].name, candidate);
                self.choices.push(description);

                if self.narrow_to(var, candidate).is_ok() && self.make_consistent().is_ok() {
                    continue 'descend;
                }
                self.choices.pop();
                self.trail.restore(mark);
            }
        }
    }

    /// Picks the next variable to split, or `None` when all canonical
    /// variables are unique.
    fn choose_variable(&mut self) -> Option<FloatVar> {
        let candidates: Vec<FloatVar> = self
            .canonical_vars
            .iter()
            .copied()
            .filter(|&v| !self.value(v).is_unique())
            .collect();
        if candidates.is_empty() {
            return None;
        }
        match self.config.variable_choice {
            VariableChoice::Random => {
                let index = self.rng.random_range(0..candidates.len());
                Some(candidates[index])
            }
            VariableChoice::LeastReduced => {
                let mut best = candidates[0];
                let mut best_measure = 0.0;
                for &v in &candidates {
                    let measure = self.value(v).width() / self.vars[v.0].starting_width;
                    if measure > best_measure {
                        best_measure = measure;
                        best = v;
                    }
                }
                Some(best)
            }
        }
    }
}

impl Default for Csp {
    fn default() -> Self {
        Self::new()
    }
}
