//! Proptest strategies for solver property-based tests.
//!
//! Strategies generate cost matrices together with constraint sets that are
//! valid by construction: pins never collide, anchors differ, and precedence
//! rules always point from a lower to a higher index so they cannot form a
//! cycle.

use proptest::prelude::*;
use wayfarer_core::{Cost, CostMatrix, RouteConstraints};

/// Strategy for an `n x n` matrix with off-diagonal costs in `1..=max_cost`.
#[expect(
    clippy::expect_used,
    reason = "generated rows always have exactly `nodes` cells"
)]
pub fn cost_matrix_strategy(nodes: usize, max_cost: Cost) -> impl Strategy<Value = CostMatrix> {
    proptest::collection::vec(1..=max_cost, nodes * nodes).prop_map(move |cells| {
        let rows = cells
            .chunks(nodes)
            .enumerate()
            .map(|(from, row)| {
                row.iter()
                    .enumerate()
                    .map(|(to, cost)| if from == to { 0 } else { *cost })
                    .collect()
            })
            .collect();
        CostMatrix::from_rows(rows).expect("generated matrix is square")
    })
}

/// Strategy for constraints over `nodes` nodes.
///
/// Pins are drawn as a partial assignment of distinct nodes to distinct
/// positions. Precedence rules are generated over ascending pairs.
pub fn constraints_strategy(nodes: usize) -> impl Strategy<Value = RouteConstraints> {
    let pins = proptest::collection::vec((0..nodes, 0..nodes), 0..=2);
    let precedence = proptest::collection::vec((0..nodes, 0..nodes), 0..=3);
    let anchors = (proptest::option::of(0..nodes), proptest::option::of(0..nodes));
    (pins, precedence, anchors).prop_map(move |(pins, precedence, (start, end))| {
        let mut constraints = RouteConstraints::unconstrained(nodes);
        for (position, node) in pins {
            if let Ok(pinned) = constraints.clone().with_pin(position, node) {
                constraints = pinned;
            }
        }
        for (left, right) in precedence {
            if left != right {
                constraints = constraints.with_precedence(left.min(right), left.max(right));
            }
        }
        if let Some(start) = start {
            constraints = constraints.with_start(start);
        }
        if let Some(end) = end.filter(|end| Some(*end) != start) {
            constraints = constraints.with_end(end);
        }
        constraints
    })
}

/// Strategy for start and end anchors only, distinct.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "wraps the end anchor around the node range"
)]
pub fn anchor_pair_strategy(nodes: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..nodes, 1..nodes).prop_map(move |(start, offset)| (start, (start + offset) % nodes))
}
