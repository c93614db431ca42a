//! Distance lookup traits.

use std::time::Duration;

use geo::Coord;

use super::error::{DistanceError, MatrixError};
use crate::{Cost, TravelMatrices};

/// Result of one directed lookup: travel cost and travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// Travel distance, used as the optimisation cost.
    pub distance: Cost,
    /// Travel time, used for reporting only.
    pub duration: Duration,
}

impl Leg {
    /// Construct a leg from a distance and a duration.
    pub const fn new(distance: Cost, duration: Duration) -> Self {
        Self { distance, duration }
    }
}

/// Look up the directed travel cost between two coordinates.
///
/// One call corresponds to one request against the external service.
/// Implementations must not cache: callers rely on each call reflecting the
/// service's answer for that ordered pair.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{DistanceError, DistanceService, Leg};
///
/// struct Manhattan;
///
/// impl DistanceService for Manhattan {
///     fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError> {
///         let metres = ((origin.x - destination.x).abs() + (origin.y - destination.y).abs())
///             * 1000.0;
///         Ok(Leg::new(metres as u64, Duration::from_secs(metres as u64)))
///     }
/// }
///
/// let leg = Manhattan.leg(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 2.0 })?;
/// assert_eq!(leg.distance, 3000);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceService {
    /// Return the leg from `origin` to `destination`.
    fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError>;
}

impl<T: DistanceService + ?Sized> DistanceService for &T {
    fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError> {
        (**self).leg(origin, destination)
    }
}

/// Produce the travel matrices for an ordered list of coordinates.
///
/// Implementers must return an `n x n` [`crate::CostMatrix`] where
/// `n == coordinates.len()` and record a duration for every ordered pair of
/// distinct nodes. Implementations must return
/// `Err(MatrixError::EmptyInput)` when `coordinates` is empty and must never
/// return a partially populated matrix.
pub trait TravelMatrixProvider {
    /// Build the matrices for `coordinates`; index `i` is node `i`.
    fn travel_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError>;
}

impl<T: TravelMatrixProvider + ?Sized> TravelMatrixProvider for &T {
    fn travel_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError> {
        (**self).travel_matrices(coordinates)
    }
}
