//! Facade crate for the Wayfarer route-ordering engine.
//!
//! This crate re-exports the core domain types and exposes the exact solver
//! and the HTTP distance service behind feature flags.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    Anchors, ConstraintError, Cost, CostMatrix, CostMatrixError, CycleError, DistanceError,
    DistanceService, DurationMap, Itinerary, Leg, Location, LocationId, MatrixError, NodeIndex,
    PathSolver, PinSpec, PositionPins, PositionSlot, Precedence, PrecedenceSet, PrecedenceSpec,
    RawLocationId, ResolvedTrip, RouteConstraints, RouteProblem, SequentialMatrixBuilder,
    Solution, SolveError, SolveOutcome, Strategy, TravelMatrices, TravelMatrixProvider,
    TripRequest, ValidationError,
};

#[cfg(feature = "solver")]
pub use wayfarer_solver::{ExactSolver, PlanError, PlanOutcome, SolverLimits, TripPlanner};

#[cfg(feature = "http")]
pub use wayfarer_data::routing::{
    HttpDistanceService, HttpDistanceServiceConfig, ProviderBuildError, RetryPolicy,
};
