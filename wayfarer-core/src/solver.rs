use log::debug;
use thiserror::Error;

use crate::{ConstraintError, Cost, CostMatrix, NodeIndex, RouteConstraints};

/// A validated ordering problem: costs plus the rules a path must satisfy.
///
/// # Examples
/// ```rust
/// use wayfarer_core::{CostMatrix, RouteConstraints, RouteProblem};
///
/// let costs = CostMatrix::from_rows(vec![vec![0, 1], vec![1, 0]])?;
/// let constraints = RouteConstraints::unconstrained(2).with_start(1);
/// let problem = RouteProblem::new(costs, constraints)?;
/// assert_eq!(problem.nodes(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProblem {
    costs: CostMatrix,
    constraints: RouteConstraints,
}

impl RouteProblem {
    /// Validate `constraints` against the size of `costs`.
    pub fn new(costs: CostMatrix, constraints: RouteConstraints) -> Result<Self, ConstraintError> {
        constraints.validate(costs.len())?;
        Ok(Self { costs, constraints })
    }

    /// The cost matrix.
    pub const fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// The validated constraints.
    pub const fn constraints(&self) -> &RouteConstraints {
        &self.constraints
    }

    /// Number of nodes to order.
    pub const fn nodes(&self) -> usize {
        self.costs.len()
    }
}

/// An optimal feasible ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Every node exactly once, in visiting order.
    pub path: Vec<NodeIndex>,
    /// Sum of consecutive edge costs along `path`.
    pub cost: Cost,
}

/// Outcome of a solve that ran to completion.
///
/// Infeasibility is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A minimum-cost feasible path.
    Solved(Solution),
    /// No permutation satisfies every constraint.
    Infeasible,
}

impl SolveOutcome {
    /// The solution, if one was found.
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Infeasible => None,
        }
    }
}

/// Search strategy chosen from the shape of the constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bitmask dynamic programme over the interior nodes between fixed start
    /// and end anchors, with no pins and no precedence rules.
    HeldKarp,
    /// Exhaustive permutation search honouring every rule.
    ConstrainedSearch,
}

impl Strategy {
    /// Pick the strategy for `constraints`.
    pub fn select(constraints: &RouteConstraints) -> Self {
        let strategy = if constraints.is_unconstrained_interior() {
            Self::HeldKarp
        } else {
            Self::ConstrainedSearch
        };
        debug!(
            "selected {strategy} for {} nodes ({} free)",
            constraints.nodes(),
            constraints.free_nodes().len()
        );
        strategy
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeldKarp => f.write_str("held-karp"),
            Self::ConstrainedSearch => f.write_str("constrained search"),
        }
    }
}

/// Errors returned by [`PathSolver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The request has more free nodes than the chosen strategy allows.
    #[error("{free_nodes} free nodes exceed the {strategy} limit of {limit}")]
    TooManyFreeNodes {
        /// Strategy that would have run.
        strategy: Strategy,
        /// Free nodes in the request.
        free_nodes: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

/// Find a minimum-cost feasible ordering of every node.
///
/// Solvers must be `Send + Sync` to operate safely across threads.
pub trait PathSolver: Send + Sync {
    /// Reject requests the solver will not attempt, before any matrix exists.
    ///
    /// The default accepts everything.
    fn preflight(&self, constraints: &RouteConstraints) -> Result<(), SolveError> {
        let _ = constraints;
        Ok(())
    }

    /// Solve `problem` to optimality or report infeasibility.
    fn solve(&self, problem: &RouteProblem) -> Result<SolveOutcome, SolveError>;
}

impl<T: PathSolver + ?Sized> PathSolver for &T {
    fn preflight(&self, constraints: &RouteConstraints) -> Result<(), SolveError> {
        (**self).preflight(constraints)
    }

    fn solve(&self, problem: &RouteProblem) -> Result<SolveOutcome, SolveError> {
        (**self).solve(problem)
    }
}
