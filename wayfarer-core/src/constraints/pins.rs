//! Absolute position pins.

use crate::{NodeIndex, ValidationError};

/// State of one position in the final path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PositionSlot {
    /// Any node may occupy the position.
    #[default]
    Free,
    /// The position must hold this node.
    Pinned(NodeIndex),
}

impl PositionSlot {
    /// The pinned node, if any.
    pub const fn node(self) -> Option<NodeIndex> {
        match self {
            Self::Free => None,
            Self::Pinned(node) => Some(node),
        }
    }
}

/// One [`PositionSlot`] per path position.
///
/// # Examples
/// ```
/// use wayfarer_core::{PositionPins, PositionSlot};
///
/// let pins = PositionPins::from_assignments(3, [(2, 0)])?;
/// assert_eq!(pins.slots()[2], PositionSlot::Pinned(0));
/// assert_eq!(pins.position_of(0), Some(2));
/// assert_eq!(pins.node_at(0), None);
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPins {
    slots: Vec<PositionSlot>,
}

impl PositionPins {
    /// A table of `nodes` free positions.
    pub fn unpinned(nodes: usize) -> Self {
        Self {
            slots: vec![PositionSlot::Free; nodes],
        }
    }

    /// Wrap an explicit slot table; checked later by [`PositionPins::validate`].
    pub const fn from_slots(slots: Vec<PositionSlot>) -> Self {
        Self { slots }
    }

    /// Build a table of `nodes` positions from `(position, node)` pairs.
    pub fn from_assignments<I>(nodes: usize, assignments: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (usize, NodeIndex)>,
    {
        let mut pins = Self::unpinned(nodes);
        for (position, node) in assignments {
            pins.pin(position, node)?;
        }
        Ok(pins)
    }

    /// Pin `node` to `position`.
    ///
    /// Re-pinning the same node to the same position is a no-op.
    pub fn pin(&mut self, position: usize, node: NodeIndex) -> Result<(), ValidationError> {
        let nodes = self.slots.len();
        if node >= nodes {
            return Err(ValidationError::NodeOutOfRange { node, nodes });
        }
        if let Some(existing) = self.position_of(node)
            && existing != position
        {
            return Err(ValidationError::NodePinnedTwice { node });
        }
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(ValidationError::PositionOutOfRange { position, nodes })?;
        match *slot {
            PositionSlot::Pinned(first) if first != node => {
                Err(ValidationError::DuplicatePosition {
                    position,
                    first,
                    second: node,
                })
            }
            _ => {
                *slot = PositionSlot::Pinned(node);
                Ok(())
            }
        }
    }

    /// The slot table, one entry per position.
    pub fn slots(&self) -> &[PositionSlot] {
        &self.slots
    }

    /// Node pinned at `position`, if any.
    pub fn node_at(&self, position: usize) -> Option<NodeIndex> {
        match self.slots.get(position) {
            Some(PositionSlot::Pinned(node)) => Some(*node),
            _ => None,
        }
    }

    /// Position `node` is pinned to, if any.
    pub fn position_of(&self, node: NodeIndex) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| *slot == PositionSlot::Pinned(node))
    }

    /// Iterate `(position, node)` for every pinned position.
    pub fn pinned(&self) -> impl Iterator<Item = (usize, NodeIndex)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| match slot {
                PositionSlot::Pinned(node) => Some((position, *node)),
                PositionSlot::Free => None,
            })
    }

    /// Whether no position is pinned.
    pub fn is_empty(&self) -> bool {
        self.pinned().next().is_none()
    }

    /// Check the table against a request of `nodes` nodes.
    pub fn validate(&self, nodes: usize) -> Result<(), ValidationError> {
        if self.slots.len() != nodes {
            return Err(ValidationError::PinTableSize {
                positions: self.slots.len(),
                nodes,
            });
        }
        let mut seen = vec![false; nodes];
        for (_, node) in self.pinned() {
            let flag = seen
                .get_mut(node)
                .ok_or(ValidationError::NodeOutOfRange { node, nodes })?;
            if *flag {
                return Err(ValidationError::NodePinnedTwice { node });
            }
            *flag = true;
        }
        Ok(())
    }
}
