//! `ExactSolver` implementation and its size ceilings.

use std::time::Instant;

use log::{debug, info};
use wayfarer_core::{
    PathSolver, RouteConstraints, RouteProblem, SolveError, SolveOutcome, Strategy,
};

use crate::{held_karp, search};

/// Upper bounds on the number of free nodes each strategy will attempt.
///
/// Constrained search examines `k!` arrangements and Held–Karp fills
/// `2^k * k` table cells for `k` free nodes, so both need a ceiling.
/// Configured values above [`Self::MAX_SEARCH_FREE_NODES`] or
/// [`Self::MAX_DYNAMIC_FREE_NODES`] are capped at those maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverLimits {
    /// Ceiling for [`Strategy::ConstrainedSearch`].
    pub max_search_free_nodes: usize,
    /// Ceiling for [`Strategy::HeldKarp`].
    pub max_dynamic_free_nodes: usize,
}

impl SolverLimits {
    /// Default ceiling for constrained search.
    pub const DEFAULT_MAX_SEARCH_FREE_NODES: usize = 9;
    /// Default ceiling for Held–Karp.
    pub const DEFAULT_MAX_DYNAMIC_FREE_NODES: usize = 16;
    /// Largest ceiling constrained search accepts.
    pub const MAX_SEARCH_FREE_NODES: usize = 11;
    /// Largest ceiling Held–Karp accepts.
    pub const MAX_DYNAMIC_FREE_NODES: usize = 20;

    /// Ceiling that applies to `strategy`, capped at the strategy's maximum.
    #[must_use]
    pub const fn limit_for(&self, strategy: Strategy) -> usize {
        let (configured, maximum) = match strategy {
            Strategy::HeldKarp => (self.max_dynamic_free_nodes, Self::MAX_DYNAMIC_FREE_NODES),
            Strategy::ConstrainedSearch => {
                (self.max_search_free_nodes, Self::MAX_SEARCH_FREE_NODES)
            }
        };
        if configured < maximum {
            configured
        } else {
            maximum
        }
    }
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_search_free_nodes: Self::DEFAULT_MAX_SEARCH_FREE_NODES,
            max_dynamic_free_nodes: Self::DEFAULT_MAX_DYNAMIC_FREE_NODES,
        }
    }
}

/// Exact solver choosing between Held–Karp and constrained search.
///
/// # Examples
/// ```rust
/// use wayfarer_core::{CostMatrix, PathSolver, RouteConstraints, RouteProblem};
/// use wayfarer_solver::ExactSolver;
///
/// let costs = CostMatrix::from_rows(vec![
///     vec![0, 4, 1],
///     vec![4, 0, 2],
///     vec![1, 2, 0],
/// ])?;
/// let constraints = RouteConstraints::unconstrained(3).with_start(0).with_end(1);
/// let problem = RouteProblem::new(costs, constraints)?;
///
/// let outcome = ExactSolver::new().solve(&problem)?;
/// let solution = outcome.solution().expect("unconstrained interior is feasible");
/// assert_eq!(solution.path, vec![0, 2, 1]);
/// assert_eq!(solution.cost, 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver {
    limits: SolverLimits,
}

impl ExactSolver {
    /// Construct a solver with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit limits.
    #[must_use]
    pub const fn with_limits(limits: SolverLimits) -> Self {
        Self { limits }
    }

    /// The configured limits.
    #[must_use]
    pub const fn limits(&self) -> SolverLimits {
        self.limits
    }

    fn admit(&self, constraints: &RouteConstraints) -> Result<Strategy, SolveError> {
        let strategy = Strategy::select(constraints);
        let free_nodes = constraints.free_nodes().len();
        let limit = self.limits.limit_for(strategy);
        if free_nodes > limit {
            return Err(SolveError::TooManyFreeNodes {
                strategy,
                free_nodes,
                limit,
            });
        }
        Ok(strategy)
    }
}

impl PathSolver for ExactSolver {
    fn preflight(&self, constraints: &RouteConstraints) -> Result<(), SolveError> {
        self.admit(constraints).map(|_| ())
    }

    fn solve(&self, problem: &RouteProblem) -> Result<SolveOutcome, SolveError> {
        let constraints = problem.constraints();
        let strategy = self.admit(constraints)?;
        let started_at = Instant::now();

        let outcome = match (strategy, constraints.anchors.start, constraints.anchors.end) {
            (Strategy::HeldKarp, Some(start), Some(end)) => {
                let interior = constraints.free_nodes();
                let solution = held_karp::shortest_path(problem.costs(), start, end, &interior)
                    .ok_or(SolveError::TooManyFreeNodes {
                        strategy,
                        free_nodes: interior.len(),
                        limit: self.limits.limit_for(strategy),
                    })?;
                SolveOutcome::Solved(solution)
            }
            _ => search::constrained_search(problem),
        };

        match &outcome {
            SolveOutcome::Solved(solution) => info!(
                "{strategy} ordered {} nodes at cost {} in {:?}",
                problem.nodes(),
                solution.cost,
                started_at.elapsed()
            ),
            SolveOutcome::Infeasible => debug!(
                "{strategy} found no feasible order for {} nodes",
                problem.nodes()
            ),
        }
        Ok(outcome)
    }
}
