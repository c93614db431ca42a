//! Property-based tests for the exact solver.
//!
//! These tests use `proptest` to assert invariants that must hold for every
//! valid input, complementing the golden route regression tests and BDD
//! behavioural tests.
//!
//! # Invariants tested
//!
//! - **Permutation:** a solved path visits every node exactly once.
//! - **Pins and anchors:** pinned positions and anchors hold in the path.
//! - **Precedence:** every rule is respected.
//! - **Cost:** the reported cost equals the recomputed path cost.
//! - **Optimality:** the cost matches an independent brute-force oracle, and
//!   infeasibility is reported only when the oracle finds nothing.
//! - **Strategy equivalence:** Held–Karp and constrained search agree.

mod proptest_support;

use std::collections::BTreeSet;

use proptest::prelude::*;
use wayfarer_core::{PathSolver, RouteConstraints, RouteProblem, SolveOutcome};
use wayfarer_solver::ExactSolver;
use wayfarer_solver::test_support::reference_cost;

use proptest_support::{anchor_pair_strategy, constraints_strategy, cost_matrix_strategy};

const NODES: usize = 5;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every solved path is a feasible permutation with an honest
    /// cost.
    #[test]
    fn solved_paths_are_feasible_permutations(
        costs in cost_matrix_strategy(NODES, 40),
        constraints in constraints_strategy(NODES),
    ) {
        let problem = RouteProblem::new(costs.clone(), constraints.clone())
            .expect("generated constraints are valid");
        let outcome = ExactSolver::new().solve(&problem).expect("within limits");

        if let SolveOutcome::Solved(solution) = outcome {
            let visited: BTreeSet<_> = solution.path.iter().copied().collect();
            prop_assert_eq!(visited.len(), NODES);
            prop_assert_eq!(solution.path.len(), NODES);
            for (position, node) in constraints.pins.pinned() {
                prop_assert_eq!(solution.path.get(position), Some(&node));
            }
            if let Some(start) = constraints.anchors.start {
                prop_assert_eq!(solution.path.first(), Some(&start));
            }
            if let Some(end) = constraints.anchors.end {
                prop_assert_eq!(solution.path.last(), Some(&end));
            }
            prop_assert!(constraints.is_satisfied_by(&solution.path));
            prop_assert_eq!(costs.path_cost(&solution.path), Some(solution.cost));
        }
    }

    /// Property: the solver is optimal and reports infeasibility exactly when
    /// no feasible permutation exists.
    #[test]
    fn matches_brute_force_oracle(
        costs in cost_matrix_strategy(NODES, 40),
        constraints in constraints_strategy(NODES),
    ) {
        let expected = reference_cost(&costs, &constraints);
        let problem = RouteProblem::new(costs, constraints).expect("valid constraints");
        let outcome = ExactSolver::new().solve(&problem).expect("within limits");
        prop_assert_eq!(outcome.solution().map(|solution| solution.cost), expected);
    }

    /// Property: with only a start and an end, Held–Karp matches exhaustive
    /// enumeration.
    #[test]
    fn held_karp_matches_exhaustive_search(
        costs in cost_matrix_strategy(NODES, 60),
        (start, end) in anchor_pair_strategy(NODES),
    ) {
        let constraints = RouteConstraints::unconstrained(NODES)
            .with_start(start)
            .with_end(end);
        prop_assert!(constraints.is_unconstrained_interior());
        let expected = reference_cost(&costs, &constraints);

        let problem = RouteProblem::new(costs, constraints).expect("valid anchors");
        let outcome = ExactSolver::new().solve(&problem).expect("within limits");
        prop_assert!(expected.is_some());
        prop_assert_eq!(outcome.solution().map(|solution| solution.cost), expected);
    }

    /// Property: solving is deterministic.
    #[test]
    fn repeated_solves_agree(
        costs in cost_matrix_strategy(NODES, 10),
        constraints in constraints_strategy(NODES),
    ) {
        let problem = RouteProblem::new(costs, constraints).expect("valid constraints");
        let solver = ExactSolver::new();
        prop_assert_eq!(solver.solve(&problem), solver.solve(&problem));
    }
}
