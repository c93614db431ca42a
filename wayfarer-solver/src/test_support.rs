//! Test-only utilities for `wayfarer-solver`.
//!
//! The helpers in this module are available to unit tests, behavioural tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use wayfarer_core::{Cost, CostMatrix, NodeIndex, RouteConstraints};

/// Deterministic pseudo-random asymmetric costs in `1..=50`.
///
/// The same `size` and `seed` always produce the same matrix.
///
/// # Examples
/// ```rust
/// use wayfarer_solver::test_support::spread_costs;
///
/// let costs = spread_costs(4, 7);
/// assert_eq!(costs, spread_costs(4, 7));
/// assert_eq!(costs.cost(2, 2), Some(0));
/// ```
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "test helper; callers pass literal non-empty sizes"
)]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "reduces generator output into the cost range"
)]
pub fn spread_costs(size: usize, seed: u64) -> CostMatrix {
    let mut state = seed;
    CostMatrix::from_fn(size, |_, _| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % 50 + 1
    })
    .expect("size must be positive")
}

/// Cheapest cost over every permutation satisfying `constraints`.
///
/// Enumerates all `n!` orderings without using the solver, so it serves as an
/// independent oracle for small instances. Returns `None` when no
/// permutation is feasible.
#[must_use]
pub fn reference_cost(costs: &CostMatrix, constraints: &RouteConstraints) -> Option<Cost> {
    let mut best = None;
    let mut path = Vec::with_capacity(costs.len());
    let mut used = vec![false; costs.len()];
    extend(costs, constraints, &mut path, &mut used, &mut best);
    best
}

fn extend(
    costs: &CostMatrix,
    constraints: &RouteConstraints,
    path: &mut Vec<NodeIndex>,
    used: &mut [bool],
    best: &mut Option<Cost>,
) {
    if path.len() == costs.len() {
        if constraints.is_satisfied_by(path)
            && let Some(cost) = costs.path_cost(path)
            && best.is_none_or(|current| cost < current)
        {
            *best = Some(cost);
        }
        return;
    }
    for node in 0..costs.len() {
        if used.get(node).copied().unwrap_or(true) {
            continue;
        }
        if let Some(flag) = used.get_mut(node) {
            *flag = true;
        }
        path.push(node);
        extend(costs, constraints, path, used, best);
        path.pop();
        if let Some(flag) = used.get_mut(node) {
            *flag = false;
        }
    }
}
