//! Core domain types for the Wayfarer route-ordering engine.
//!
//! Responsibilities:
//! - Model the nodes, travel matrices and ordering constraints of a single
//!   routing request.
//! - Validate constraints eagerly, including precedence cycle detection.
//! - Define the seams for distance lookups and path solving.
//! - Assemble solved node orders back into caller-facing itineraries.
//!
//! Boundaries:
//! - No network or filesystem access (adapters live in `wayfarer-data`).
//! - No search algorithms (these live in `wayfarer-solver`).
//!
//! Invariants:
//! - Matrices are immutable once constructed and scoped to one request.
//! - A [`RouteProblem`] can only be built from constraints that passed
//!   validation against the matrix size.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod constraints;
pub mod distance;
mod error;
mod itinerary;
mod location;
mod matrix;
mod request;
mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use constraints::{
    Anchors, ConstraintError, CycleError, PositionPins, PositionSlot, Precedence, PrecedenceSet,
    RouteConstraints,
};
pub use distance::{
    DistanceError, DistanceService, Leg, MatrixError, SequentialMatrixBuilder,
    TravelMatrixProvider,
};
pub use error::ValidationError;
pub use itinerary::Itinerary;
pub use location::{Location, LocationId};
pub use matrix::{Cost, CostMatrix, CostMatrixError, DurationMap, NodeIndex, TravelMatrices};
pub use request::{PinSpec, PrecedenceSpec, RawLocationId, ResolvedTrip, TripRequest};
pub use solver::{PathSolver, RouteProblem, Solution, SolveError, SolveOutcome, Strategy};
