//! Pairwise precedence rules and cycle detection.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;

use crate::{NodeIndex, ValidationError};

/// `before` must occupy an earlier position than `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Precedence {
    /// Node that must come first.
    pub before: NodeIndex,
    /// Node that must come later.
    pub after: NodeIndex,
}

impl Precedence {
    /// Construct a precedence rule.
    pub const fn new(before: NodeIndex, after: NodeIndex) -> Self {
        Self { before, after }
    }
}

/// The precedence rules contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("precedence constraints form a cycle through nodes {involved:?}")]
pub struct CycleError {
    /// Nodes that could not be ordered, ascending.
    pub involved: Vec<NodeIndex>,
}

/// Set of precedence rules for one request.
///
/// # Examples
/// ```
/// use wayfarer_core::PrecedenceSet;
///
/// let acyclic = PrecedenceSet::from_pairs([(0, 1), (1, 2)]);
/// assert_eq!(acyclic.topological_order()?, vec![0, 1, 2]);
///
/// let cyclic = PrecedenceSet::from_pairs([(0, 1), (1, 2), (2, 0)]);
/// assert!(cyclic.ensure_acyclic().is_err());
/// # Ok::<(), wayfarer_core::CycleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceSet {
    rules: Vec<Precedence>,
}

impl PrecedenceSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(before, after)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(before, after)| Precedence::new(before, after))
                .collect(),
        }
    }

    /// Add a rule.
    pub fn push(&mut self, rule: Precedence) {
        self.rules.push(rule);
    }

    /// The rules in insertion order.
    pub fn rules(&self) -> &[Precedence] {
        &self.rules
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Distinct nodes mentioned by any rule.
    pub fn referenced_nodes(&self) -> BTreeSet<NodeIndex> {
        self.rules
            .iter()
            .flat_map(|rule| [rule.before, rule.after])
            .collect()
    }

    /// Check every referenced node lies in `[0, nodes)`.
    pub fn validate(&self, nodes: usize) -> Result<(), ValidationError> {
        match self.referenced_nodes().into_iter().find(|node| *node >= nodes) {
            Some(node) => Err(ValidationError::NodeOutOfRange { node, nodes }),
            None => Ok(()),
        }
    }

    /// Order the referenced nodes with Kahn's algorithm.
    ///
    /// Nodes with zero in-degree are removed repeatedly in ready-queue order,
    /// with the queue seeded in ascending index order.
    /// If fewer nodes are removed than are referenced, the rules contain a
    /// cycle and the stuck nodes are reported.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>, CycleError> {
        let mut in_degree: BTreeMap<NodeIndex, usize> =
            self.referenced_nodes().into_iter().map(|node| (node, 0)).collect();
        let mut successors: BTreeMap<NodeIndex, Vec<NodeIndex>> = BTreeMap::new();
        for rule in &self.rules {
            successors.entry(rule.before).or_default().push(rule.after);
            *in_degree.entry(rule.after).or_default() += 1;
        }

        let mut ready: VecDeque<NodeIndex> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(node) = ready.pop_front() {
            order.push(node);
            for next in successors.get(&node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(*next);
                    }
                }
            }
        }

        if order.len() < in_degree.len() {
            let involved = in_degree
                .into_iter()
                .filter(|(_, degree)| *degree > 0)
                .map(|(node, _)| node)
                .collect();
            return Err(CycleError { involved });
        }
        Ok(order)
    }

    /// Fail with [`CycleError`] if the rules are cyclic.
    pub fn ensure_acyclic(&self) -> Result<(), CycleError> {
        self.topological_order().map(|_| ())
    }

    /// Whether `positions[node]` honours every rule.
    ///
    /// `positions` maps each node to its index in a candidate path. Rules
    /// naming nodes outside `positions` are reported as unsatisfied.
    pub fn is_satisfied_by(&self, positions: &[usize]) -> bool {
        self.rules.iter().all(|rule| {
            matches!(
                (positions.get(rule.before), positions.get(rule.after)),
                (Some(before), Some(after)) if before < after
            )
        })
    }
}
