//! Held–Karp dynamic programme for paths with fixed endpoints.
//!
//! `best(mask, last)` holds the cheapest cost of leaving `start`, visiting
//! exactly the interior nodes in `mask` and stopping at interior node `last`.
//! Tables are dense, `2^k * k` entries for `k` interior nodes.

use wayfarer_core::{Cost, CostMatrix, NodeIndex, Solution};

const fn bit(index: usize) -> usize {
    1 << index
}

/// Cost and predecessor tables indexed by `(mask, last)`.
struct Table {
    width: usize,
    best: Vec<Option<Cost>>,
    // `None` means the predecessor is the start node.
    previous: Vec<Option<usize>>,
}

impl Table {
    fn new(interior: usize) -> Option<Self> {
        let subsets = 1_usize.checked_shl(u32::try_from(interior).ok()?)?;
        let cells = subsets.checked_mul(interior)?;
        Some(Self {
            width: interior,
            best: vec![None; cells],
            previous: vec![None; cells],
        })
    }

    const fn cell(&self, mask: usize, last: usize) -> usize {
        mask * self.width + last
    }

    fn best(&self, mask: usize, last: usize) -> Option<Cost> {
        self.best.get(self.cell(mask, last)).copied().flatten()
    }

    fn previous(&self, mask: usize, last: usize) -> Option<usize> {
        self.previous.get(self.cell(mask, last)).copied().flatten()
    }

    /// Record `cost` if it strictly improves the cell.
    fn relax(&mut self, mask: usize, last: usize, cost: Cost, previous: Option<usize>) {
        let cell = self.cell(mask, last);
        if let Some(best) = self.best.get_mut(cell)
            && best.is_none_or(|current| cost < current)
        {
            *best = Some(cost);
            if let Some(slot) = self.previous.get_mut(cell) {
                *slot = previous;
            }
        }
    }
}

/// Cheapest path from `start` through every node of `interior` to `end`.
///
/// `interior` must hold distinct in-range nodes other than `start` and `end`.
/// Every ordering of `interior` is a valid path, so a solution always exists.
/// Returns `None` only when the tables cannot be indexed for this many
/// interior nodes.
pub(crate) fn shortest_path(
    costs: &CostMatrix,
    start: NodeIndex,
    end: NodeIndex,
    interior: &[NodeIndex],
) -> Option<Solution> {
    if interior.is_empty() {
        return Some(Solution {
            path: vec![start, end],
            cost: costs.edge(start, end),
        });
    }

    let mut table = Table::new(interior.len())?;
    for (index, node) in interior.iter().enumerate() {
        table.relax(bit(index), index, costs.edge(start, *node), None);
    }

    let full = bit(interior.len()) - 1;
    for mask in 1..=full {
        for (last, from) in interior.iter().enumerate() {
            if mask & bit(last) == 0 {
                continue;
            }
            let Some(base) = table.best(mask, last) else {
                continue;
            };
            for (next, to) in interior.iter().enumerate() {
                if mask & bit(next) != 0 {
                    continue;
                }
                let cost = base.saturating_add(costs.edge(*from, *to));
                table.relax(mask | bit(next), next, cost, Some(last));
            }
        }
    }

    let mut closing: Option<(Cost, usize)> = None;
    for (last, from) in interior.iter().enumerate() {
        let Some(base) = table.best(full, last) else {
            continue;
        };
        let cost = base.saturating_add(costs.edge(*from, end));
        if closing.is_none_or(|(best, _)| cost < best) {
            closing = Some((cost, last));
        }
    }
    let (cost, last) = closing?;

    let mut reversed = Vec::with_capacity(interior.len());
    let mut mask = full;
    let mut cursor = Some(last);
    while let Some(index) = cursor {
        reversed.push(*interior.get(index)?);
        cursor = table.previous(mask, index);
        mask &= !bit(index);
    }

    let mut path = Vec::with_capacity(interior.len() + 2);
    path.push(start);
    path.extend(reversed.into_iter().rev());
    path.push(end);
    Some(Solution { path, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayfarer_core::test_support::symmetric_costs;

    fn square() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0, 2, 9, 10],
            vec![1, 0, 6, 4],
            vec![15, 7, 0, 8],
            vec![6, 3, 12, 0],
        ])
        .expect("square matrix")
    }

    #[rstest]
    fn adjacent_endpoints_need_no_interior() {
        let solution = shortest_path(&square(), 2, 0, &[]).expect("trivial path");
        assert_eq!(solution.path, vec![2, 0]);
        assert_eq!(solution.cost, 15);
    }

    #[rstest]
    fn orders_interior_between_fixed_endpoints() {
        // 0 -> 1 -> 2 -> 3 = 2 + 6 + 8 = 16; 0 -> 2 -> 1 -> 3 = 9 + 7 + 4 = 20.
        let solution = shortest_path(&square(), 0, 3, &[1, 2]).expect("solvable");
        assert_eq!(solution.path, vec![0, 1, 2, 3]);
        assert_eq!(solution.cost, 16);
    }

    #[rstest]
    fn honours_asymmetric_costs() {
        let solution = shortest_path(&square(), 3, 2, &[0, 1]).expect("solvable");
        // 3 -> 1 -> 0 -> 2 = 3 + 1 + 9 = 13; 3 -> 0 -> 1 -> 2 = 6 + 2 + 6 = 14.
        assert_eq!(solution.path, vec![3, 1, 0, 2]);
        assert_eq!(solution.cost, 13);
    }

    #[rstest]
    fn line_graph_visits_in_order() {
        let costs = symmetric_costs(
            5,
            &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1)],
        );
        let solution = shortest_path(&costs, 0, 4, &[1, 2, 3]).expect("solvable");
        assert_eq!(solution.path, vec![0, 1, 2, 3, 4]);
        assert_eq!(solution.cost, 4);
    }

    #[rstest]
    fn unindexable_tables_yield_no_solution() {
        // 64 interior nodes overflow the subset mask.
        let nodes = 66;
        let costs = CostMatrix::from_fn(nodes, |_, _| 1).expect("uniform matrix");
        let interior: Vec<NodeIndex> = (1..nodes - 1).collect();
        assert_eq!(shortest_path(&costs, 0, nodes - 1, &interior), None);
    }

    #[rstest]
    fn uniform_costs_yield_any_optimal_order() {
        let costs = CostMatrix::from_fn(4, |_, _| 1).expect("uniform matrix");
        let solution = shortest_path(&costs, 0, 3, &[1, 2]).expect("solvable");
        assert_eq!(solution.path.first(), Some(&0));
        assert_eq!(solution.path.last(), Some(&3));
        assert_eq!(solution.path.len(), 4);
        assert_eq!(solution.cost, 3);
    }
}
