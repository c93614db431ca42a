//! End-to-end planning: request in, itinerary out.

use log::{debug, info};
use thiserror::Error;
use wayfarer_core::{
    ConstraintError, CycleError, Itinerary, MatrixError, PathSolver, RouteProblem, SolveError,
    SolveOutcome, TravelMatrixProvider, TripRequest, ValidationError,
};

/// Result of a planning run that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The cheapest feasible itinerary.
    Planned(Itinerary),
    /// No ordering satisfies the request's constraints.
    Infeasible,
}

impl PlanOutcome {
    /// The itinerary, if one was found.
    #[must_use]
    pub const fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            Self::Planned(itinerary) => Some(itinerary),
            Self::Infeasible => None,
        }
    }
}

/// Errors raised while planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The request is malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The precedence rules contain a cycle.
    #[error(transparent)]
    Cycle(#[from] CycleError),
    /// The travel matrices could not be built.
    #[error("failed to build travel matrices: {0}")]
    External(#[from] MatrixError),
    /// The solver refused the request.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl From<ConstraintError> for PlanError {
    fn from(error: ConstraintError) -> Self {
        match error {
            ConstraintError::Validation(inner) => Self::Validation(inner),
            ConstraintError::Cycle(inner) => Self::Cycle(inner),
        }
    }
}

/// Drives a [`TripRequest`] through validation, matrix construction, solving
/// and assembly.
///
/// Every check that needs no network access runs before the matrix provider
/// is called, so malformed, cyclic or oversize requests cost no lookups.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use wayfarer_core::test_support::{FixedMatrixProvider, symmetric_costs};
/// use wayfarer_core::{Location, TripRequest};
/// use wayfarer_solver::{ExactSolver, PlanOutcome, TripPlanner};
///
/// let provider = FixedMatrixProvider::from_costs(symmetric_costs(
///     3,
///     &[(0, 1, 5), (0, 2, 1), (1, 2, 1)],
/// ));
/// let planner = TripPlanner::new(provider, ExactSolver::new());
/// let request = TripRequest {
///     locations: (1..=3)
///         .map(|id| Location::new(id, Coord { x: 0.0, y: 0.0 }))
///         .collect(),
///     start: Some(1.into()),
///     end: Some(2.into()),
///     ..TripRequest::default()
/// };
///
/// let outcome = planner.plan(&request)?;
/// let itinerary = outcome.itinerary().expect("feasible request");
/// assert_eq!(itinerary.stops, vec![1, 3, 2]);
/// assert_eq!(itinerary.total_distance, 2);
/// # Ok::<(), wayfarer_solver::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TripPlanner<M, S> {
    matrices: M,
    solver: S,
}

impl<M, S> TripPlanner<M, S>
where
    M: TravelMatrixProvider,
    S: PathSolver,
{
    /// Combine a matrix provider with a solver.
    pub const fn new(matrices: M, solver: S) -> Self {
        Self { matrices, solver }
    }

    /// Borrow the solver.
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Plan `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Validation`] or [`PlanError::Cycle`] for bad
    /// requests, [`PlanError::Solve`] when the solver refuses the request
    /// size and [`PlanError::External`] when matrix construction fails.
    /// Infeasibility is reported as [`PlanOutcome::Infeasible`].
    pub fn plan(&self, request: &TripRequest) -> Result<PlanOutcome, PlanError> {
        let trip = request.resolve()?;
        trip.constraints.validate(trip.nodes())?;
        self.solver.preflight(&trip.constraints)?;

        debug!("requesting travel matrices for {} locations", trip.nodes());
        let matrices = self.matrices.travel_matrices(&trip.coordinates)?;
        let problem = RouteProblem::new(matrices.costs, trip.constraints.clone())?;

        match self.solver.solve(&problem)? {
            SolveOutcome::Solved(solution) => {
                let itinerary = Itinerary::assemble(&solution, &trip, &matrices.durations)?;
                Ok(PlanOutcome::Planned(itinerary))
            }
            SolveOutcome::Infeasible => {
                info!("no feasible order for {} locations", trip.nodes());
                Ok(PlanOutcome::Infeasible)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExactSolver;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use std::time::Duration;
    use wayfarer_core::test_support::{
        CountingDistanceService, FixedMatrixProvider, UnitDistanceService,
    };
    use wayfarer_core::{
        CostMatrix, DistanceError, Location, PinSpec, PrecedenceSpec, SequentialMatrixBuilder,
    };

    fn costs() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0, 5, 3, 8],
            vec![5, 0, 2, 4],
            vec![3, 2, 0, 6],
            vec![8, 4, 6, 0],
        ])
        .expect("square matrix")
    }

    #[fixture]
    fn request() -> TripRequest {
        TripRequest {
            name: Some("Harbour loop".to_owned()),
            locations: (0..4)
                .map(|i| Location::new(10 + i, Coord { x: 0.0, y: 0.0 }))
                .collect(),
            start: Some(10.into()),
            end: Some(13.into()),
            ..TripRequest::default()
        }
    }

    #[rstest]
    fn plans_the_cheapest_itinerary(request: TripRequest) {
        let planner = TripPlanner::new(FixedMatrixProvider::from_costs(costs()), ExactSolver::new());
        let outcome = planner.plan(&request).expect("plan succeeds");
        let itinerary = outcome.itinerary().expect("feasible");
        assert_eq!(itinerary.stops, vec![10, 12, 11, 13]);
        assert_eq!(itinerary.total_distance, 9);
        assert_eq!(itinerary.total_duration, Duration::from_secs(9));
        assert_eq!(itinerary.name.as_deref(), Some("Harbour loop"));
    }

    #[rstest]
    fn cycles_are_reported_before_any_lookup(mut request: TripRequest) {
        request.precedence = vec![
            PrecedenceSpec {
                before: 11.into(),
                after: 12.into(),
            },
            PrecedenceSpec {
                before: 12.into(),
                after: 11.into(),
            },
        ];
        let service = CountingDistanceService::new(UnitDistanceService);
        let planner = TripPlanner::new(SequentialMatrixBuilder::new(&service), ExactSolver::new());
        let err = planner.plan(&request).expect_err("cycle");
        assert_eq!(
            err,
            PlanError::Cycle(CycleError {
                involved: vec![1, 2]
            })
        );
        assert_eq!(service.calls(), 0);
    }

    #[rstest]
    fn conflicting_rules_are_infeasible(mut request: TripRequest) {
        request.start = None;
        request.end = None;
        request.pins = vec![
            PinSpec {
                position: 0,
                location: 11.into(),
            },
            PinSpec {
                position: 1,
                location: 10.into(),
            },
        ];
        request.precedence = vec![PrecedenceSpec {
            before: 10.into(),
            after: 11.into(),
        }];
        let planner = TripPlanner::new(FixedMatrixProvider::from_costs(costs()), ExactSolver::new());
        assert_eq!(planner.plan(&request), Ok(PlanOutcome::Infeasible));
    }

    #[rstest]
    fn matrix_failures_surface_as_external(request: TripRequest) {
        let failure = MatrixError::Lookup {
            origin: 0,
            destination: 1,
            source: DistanceError::Timeout {
                url: "http://localhost".to_owned(),
                timeout_secs: 5,
            },
        };
        let planner = TripPlanner::new(
            FixedMatrixProvider::with_error(failure.clone()),
            ExactSolver::new(),
        );
        assert_eq!(planner.plan(&request), Err(PlanError::External(failure)));
    }

    #[rstest]
    fn validation_errors_pass_through(mut request: TripRequest) {
        request.end = Some(99.into());
        let planner = TripPlanner::new(FixedMatrixProvider::from_costs(costs()), ExactSolver::new());
        assert_eq!(
            planner.plan(&request),
            Err(PlanError::Validation(ValidationError::UnknownLocation {
                id: 99
            }))
        );
    }
}
