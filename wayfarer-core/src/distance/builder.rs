//! Sequential, one-lookup-per-pair matrix construction.

use geo::Coord;
use log::debug;

use super::error::MatrixError;
use super::provider::{DistanceService, TravelMatrixProvider};
use crate::{CostMatrix, DurationMap, TravelMatrices};

/// Builds travel matrices by querying a [`DistanceService`] for every ordered
/// pair of distinct nodes, in row-major order.
///
/// This issues `n * (n - 1)` blocking lookups with no caching, deduplication
/// or retry. The first failure aborts the build.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{
///     DistanceError, DistanceService, Leg, SequentialMatrixBuilder, TravelMatrixProvider,
/// };
///
/// struct Unit;
///
/// impl DistanceService for Unit {
///     fn leg(&self, _: Coord<f64>, _: Coord<f64>) -> Result<Leg, DistanceError> {
///         Ok(Leg::new(1, Duration::from_secs(1)))
///     }
/// }
///
/// let builder = SequentialMatrixBuilder::new(Unit);
/// let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
/// let matrices = builder.travel_matrices(&coords)?;
/// assert_eq!(matrices.costs.cost(0, 1), Some(1));
/// # Ok::<(), wayfarer_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialMatrixBuilder<D> {
    service: D,
}

impl<D: DistanceService> SequentialMatrixBuilder<D> {
    /// Wrap a distance service.
    pub const fn new(service: D) -> Self {
        Self { service }
    }

    /// Borrow the wrapped service.
    pub const fn service(&self) -> &D {
        &self.service
    }
}

impl<D: DistanceService> TravelMatrixProvider for SequentialMatrixBuilder<D> {
    fn travel_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError> {
        if coordinates.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        let size = coordinates.len();
        debug!(
            "building {size}x{size} travel matrix with {} sequential lookups",
            size * (size - 1)
        );

        let mut rows = vec![vec![0; size]; size];
        let mut durations = DurationMap::new();
        for (origin, (row, from)) in rows.iter_mut().zip(coordinates).enumerate() {
            for (destination, (cell, to)) in row.iter_mut().zip(coordinates).enumerate() {
                if origin == destination {
                    continue;
                }
                let leg = self
                    .service
                    .leg(*from, *to)
                    .map_err(|source| MatrixError::Lookup {
                        origin,
                        destination,
                        source,
                    })?;
                *cell = leg.distance;
                durations.insert(origin, destination, leg.duration);
            }
        }

        Ok(TravelMatrices {
            costs: CostMatrix::from_rows(rows)?,
            durations,
        })
    }
}
