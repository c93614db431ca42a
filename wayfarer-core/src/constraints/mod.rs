//! Ordering constraints for a single routing request.
//!
//! A [`RouteConstraints`] bundles the three rule families a path must honour:
//! absolute [`PositionPins`], pairwise [`PrecedenceSet`] rules and optional
//! start/end [`Anchors`]. Validation runs eagerly and fails fast, before any
//! matrix is built or any search starts.

mod pins;
mod precedence;

use thiserror::Error;

use crate::{NodeIndex, ValidationError};

pub use pins::{PositionPins, PositionSlot};
pub use precedence::{CycleError, Precedence, PrecedenceSet};

/// Optional fixed first and last nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    /// Node that must open the path.
    pub start: Option<NodeIndex>,
    /// Node that must close the path.
    pub end: Option<NodeIndex>,
}

impl Anchors {
    /// Whether `node` is the start or end anchor.
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.start == Some(node) || self.end == Some(node)
    }

    fn validate(&self, nodes: usize) -> Result<(), ValidationError> {
        for node in [self.start, self.end].into_iter().flatten() {
            if node >= nodes {
                return Err(ValidationError::NodeOutOfRange { node, nodes });
            }
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) if start == end => {
                Err(ValidationError::StartEqualsEnd { node: start })
            }
            _ => Ok(()),
        }
    }
}

/// Errors raised while validating [`RouteConstraints`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The constraints reference invalid nodes or positions.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The precedence rules are cyclic.
    #[error(transparent)]
    Cycle(#[from] CycleError),
}

/// Every rule a feasible path must satisfy.
///
/// # Examples
/// ```
/// use wayfarer_core::RouteConstraints;
///
/// let constraints = RouteConstraints::unconstrained(4)
///     .with_start(0)
///     .with_end(3)
///     .with_pin(1, 2)?
///     .with_precedence(2, 1);
///
/// assert!(constraints.validate(4).is_ok());
/// assert_eq!(constraints.free_nodes(), vec![1]);
/// assert!(constraints.is_satisfied_by(&[0, 2, 1, 3]));
/// assert!(!constraints.is_satisfied_by(&[0, 1, 2, 3]));
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConstraints {
    /// Absolute position pins, one slot per position.
    pub pins: PositionPins,
    /// Pairwise ordering rules.
    pub precedence: PrecedenceSet,
    /// Optional start and end nodes.
    pub anchors: Anchors,
}

impl RouteConstraints {
    /// No rules at all for a request of `nodes` nodes.
    pub fn unconstrained(nodes: usize) -> Self {
        Self {
            pins: PositionPins::unpinned(nodes),
            precedence: PrecedenceSet::new(),
            anchors: Anchors::default(),
        }
    }

    /// Pin `node` to `position`.
    pub fn with_pin(mut self, position: usize, node: NodeIndex) -> Result<Self, ValidationError> {
        self.pins.pin(position, node)?;
        Ok(self)
    }

    /// Require `before` to precede `after`.
    #[must_use]
    pub fn with_precedence(mut self, before: NodeIndex, after: NodeIndex) -> Self {
        self.precedence.push(Precedence::new(before, after));
        self
    }

    /// Fix the first node.
    #[must_use]
    pub const fn with_start(mut self, node: NodeIndex) -> Self {
        self.anchors.start = Some(node);
        self
    }

    /// Fix the last node.
    #[must_use]
    pub const fn with_end(mut self, node: NodeIndex) -> Self {
        self.anchors.end = Some(node);
        self
    }

    /// Number of positions covered by the pin table.
    pub fn nodes(&self) -> usize {
        self.pins.slots().len()
    }

    /// Validate indices, anchors and acyclicity against `nodes` nodes.
    ///
    /// Index and anchor problems are reported before cycles.
    pub fn validate(&self, nodes: usize) -> Result<(), ConstraintError> {
        if nodes == 0 {
            return Err(ValidationError::EmptySelection.into());
        }
        self.pins.validate(nodes)?;
        self.anchors.validate(nodes)?;
        self.precedence.validate(nodes)?;
        self.precedence.ensure_acyclic()?;
        Ok(())
    }

    /// Nodes with no pin that are neither start nor end, ascending.
    ///
    /// These are the only nodes whose relative order is searched.
    pub fn free_nodes(&self) -> Vec<NodeIndex> {
        (0..self.nodes())
            .filter(|node| self.pins.position_of(*node).is_none() && !self.anchors.contains(*node))
            .collect()
    }

    /// Whether only a start and an end are given, with no pins or precedence.
    pub fn is_unconstrained_interior(&self) -> bool {
        self.pins.is_empty()
            && self.precedence.is_empty()
            && self.anchors.start.is_some()
            && self.anchors.end.is_some()
    }

    /// Whether `path` is a feasible permutation under every rule.
    ///
    /// Checks that `path` visits each node exactly once, that every pinned
    /// position holds its node, that the anchors open and close the path and
    /// that every precedence rule holds.
    pub fn is_satisfied_by(&self, path: &[NodeIndex]) -> bool {
        let nodes = self.nodes();
        if path.len() != nodes {
            return false;
        }
        let mut positions = vec![usize::MAX; nodes];
        for (position, node) in path.iter().enumerate() {
            match positions.get_mut(*node) {
                Some(slot) if *slot == usize::MAX => *slot = position,
                _ => return false,
            }
        }
        let pins_hold = self
            .pins
            .pinned()
            .all(|(position, node)| path.get(position) == Some(&node));
        let start_holds = self
            .anchors
            .start
            .is_none_or(|start| path.first() == Some(&start));
        let end_holds = self
            .anchors
            .end
            .is_none_or(|end| path.last() == Some(&end));
        pins_hold && start_holds && end_holds && self.precedence.is_satisfied_by(&positions)
    }
}
