//! Validation errors for malformed routing input.

use thiserror::Error;

use crate::{LocationId, NodeIndex};

/// Malformed input detected before any matrix construction or search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No locations were selected.
    #[error("at least one location must be selected")]
    EmptySelection,
    /// The trip name was provided but contains only whitespace.
    #[error("trip name must not be blank")]
    BlankName,
    /// A caller identifier could not be parsed as a number.
    #[error("location identifier {value:?} is not numeric")]
    NonNumericIdentifier {
        /// The offending identifier text.
        value: String,
    },
    /// A referenced location is not part of the selection.
    #[error("location {id} is not part of the selected locations")]
    UnknownLocation {
        /// The unknown identifier.
        id: LocationId,
    },
    /// A node index lies outside `[0, nodes)`.
    #[error("node {node} is out of range for {nodes} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: NodeIndex,
        /// Number of nodes in the request.
        nodes: usize,
    },
    /// A pinned position lies outside `[0, nodes)`.
    #[error("position {position} is out of range for {nodes} nodes")]
    PositionOutOfRange {
        /// The offending position.
        position: usize,
        /// Number of nodes in the request.
        nodes: usize,
    },
    /// Two different nodes were pinned to the same position.
    #[error("position {position} is pinned to both node {first} and node {second}")]
    DuplicatePosition {
        /// The contested position.
        position: usize,
        /// Node pinned first.
        first: NodeIndex,
        /// Node pinned second.
        second: NodeIndex,
    },
    /// One node was pinned to more than one position.
    #[error("node {node} is pinned to more than one position")]
    NodePinnedTwice {
        /// The node pinned twice.
        node: NodeIndex,
    },
    /// Start and end anchors name the same node.
    #[error("start and end must differ, both are node {node}")]
    StartEqualsEnd {
        /// The node used for both anchors.
        node: NodeIndex,
    },
    /// The pin table length does not match the number of nodes.
    #[error("pin table covers {positions} positions but the request has {nodes} nodes")]
    PinTableSize {
        /// Positions covered by the pin table.
        positions: usize,
        /// Number of nodes in the request.
        nodes: usize,
    },
}
