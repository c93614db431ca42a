//! Exhaustive search over orderings of the free nodes.
//!
//! Pinned nodes and anchors are placed into a fixed template first. The free
//! nodes are then enumerated in lexicographic order, starting from ascending
//! index order, and each arrangement fills the remaining slots left to right.

use log::debug;
use wayfarer_core::{NodeIndex, PositionSlot, RouteProblem, SolveOutcome, Solution};

/// Fixed slots of the path; `None` marks a slot filled by a free node.
type Template = Vec<Option<NodeIndex>>;

/// Build the template, or `None` when anchors and pins disagree.
fn template(problem: &RouteProblem) -> Option<Template> {
    let constraints = problem.constraints();
    let mut slots: Template = constraints
        .pins
        .slots()
        .iter()
        .copied()
        .map(PositionSlot::node)
        .collect();
    let last = slots.len().checked_sub(1)?;

    let anchors = [
        (constraints.anchors.start, 0),
        (constraints.anchors.end, last),
    ];
    for (node, position) in anchors {
        let Some(node) = node else {
            continue;
        };
        if constraints
            .pins
            .position_of(node)
            .is_some_and(|pinned| pinned != position)
        {
            debug!("node {node} is anchored at {position} but pinned elsewhere");
            return None;
        }
        let slot = slots.get_mut(position)?;
        if let Some(occupant) = *slot
            && occupant != node
        {
            debug!("position {position} is pinned to {occupant}, not anchor {node}");
            return None;
        }
        *slot = Some(node);
    }
    Some(slots)
}

/// Advance `items` to the next lexicographic permutation.
///
/// Returns `false`, leaving `items` untouched, once the last permutation has
/// been reached.
fn next_permutation(items: &mut [NodeIndex]) -> bool {
    let Some(pivot) = items
        .windows(2)
        .rposition(|pair| matches!(pair, [left, right] if left < right))
    else {
        return false;
    };
    let (head, tail) = items.split_at_mut(pivot + 1);
    let Some(pivot_value) = head.last_mut() else {
        return false;
    };
    let threshold = *pivot_value;
    let Some(successor) = tail.iter_mut().rev().find(|item| **item > threshold) else {
        return false;
    };
    std::mem::swap(pivot_value, successor);
    tail.reverse();
    true
}

fn fill(template: &[Option<NodeIndex>], free: &[NodeIndex]) -> Option<Vec<NodeIndex>> {
    let mut remaining = free.iter().copied();
    template
        .iter()
        .map(|slot| slot.or_else(|| remaining.next()))
        .collect()
}

/// Cheapest feasible path, or `Infeasible` when no arrangement satisfies
/// every rule.
///
/// Among equal-cost arrangements the first one enumerated wins.
pub(crate) fn constrained_search(problem: &RouteProblem) -> SolveOutcome {
    let Some(template) = template(problem) else {
        return SolveOutcome::Infeasible;
    };
    let constraints = problem.constraints();
    let mut free = constraints.free_nodes();

    let mut best: Option<Solution> = None;
    let mut examined: u64 = 0;
    loop {
        examined = examined.saturating_add(1);
        if let Some(path) = fill(&template, &free)
            && constraints.is_satisfied_by(&path)
            && let Some(cost) = problem.costs().path_cost(&path)
            && best.as_ref().is_none_or(|current| cost < current.cost)
        {
            best = Some(Solution { path, cost });
        }
        if !next_permutation(&mut free) {
            break;
        }
    }

    debug!(
        "examined {examined} arrangements of {} free nodes",
        free.len()
    );
    best.map_or(SolveOutcome::Infeasible, SolveOutcome::Solved)
}
