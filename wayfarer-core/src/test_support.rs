//! Deterministic test doubles for distance lookups and travel matrices.
//!
//! Available to unit tests and, behind the `test-support` feature, to other
//! crates' tests and benchmarks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geo::Coord;

use crate::{
    Cost, CostMatrix, DistanceError, DistanceService, DurationMap, Leg, MatrixError,
    TravelMatrices, TravelMatrixProvider,
};

/// `DistanceService` returning one metre and one second for every pair.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitDistanceService;

impl DistanceService for UnitDistanceService {
    fn leg(&self, _origin: Coord<f64>, _destination: Coord<f64>) -> Result<Leg, DistanceError> {
        Ok(Leg::new(1, Duration::from_secs(1)))
    }
}

/// Wraps a `DistanceService` and counts lookups.
#[derive(Debug, Default)]
pub struct CountingDistanceService<D> {
    inner: D,
    calls: AtomicUsize,
}

impl<D> CountingDistanceService<D> {
    /// Wrap `inner` with a zeroed counter.
    pub const fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<D: DistanceService> DistanceService for CountingDistanceService<D> {
    fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.leg(origin, destination)
    }
}

/// `TravelMatrixProvider` returning a pre-configured response.
///
/// The configured matrices are returned regardless of the coordinates, as
/// long as the input is non-empty.
#[derive(Debug, Clone)]
pub struct FixedMatrixProvider {
    response: Result<TravelMatrices, MatrixError>,
}

impl FixedMatrixProvider {
    /// Return `matrices` for every request.
    pub const fn new(matrices: TravelMatrices) -> Self {
        Self {
            response: Ok(matrices),
        }
    }

    /// Return `costs` with every duration equal to the cost in seconds.
    pub fn from_costs(costs: CostMatrix) -> Self {
        let durations = (0..costs.len())
            .flat_map(|i| (0..costs.len()).map(move |j| (i, j)))
            .filter(|(i, j)| i != j)
            .map(|(i, j)| ((i, j), Duration::from_secs(costs.edge(i, j))))
            .collect::<DurationMap>();
        Self::new(TravelMatrices { costs, durations })
    }

    /// Fail every request with `error`.
    pub const fn with_error(error: MatrixError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl TravelMatrixProvider for FixedMatrixProvider {
    fn travel_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError> {
        if coordinates.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        self.response.clone()
    }
}

/// Build a symmetric cost matrix from undirected `(i, j, cost)` edges.
///
/// Unlisted pairs cost [`Cost::MAX`] divided by the node count so that sums
/// along any path stay below saturation.
///
/// # Panics
///
/// Panics if `size` is zero.
#[expect(
    clippy::expect_used,
    reason = "test helper; callers pass literal non-empty sizes"
)]
pub fn symmetric_costs(size: usize, edges: &[(usize, usize, Cost)]) -> CostMatrix {
    let fallback = Cost::MAX / (size.max(1) as Cost);
    CostMatrix::from_fn(size, |i, j| {
        edges
            .iter()
            .find(|(a, b, _)| (*a == i && *b == j) || (*a == j && *b == i))
            .map_or(fallback, |(_, _, cost)| *cost)
    })
    .expect("size must be positive")
}
