//! Test utilities for distance services.
//!
//! This module provides [`StubDistanceService`], a deterministic test double
//! for [`DistanceService`] that returns pre-configured responses without
//! making actual HTTP requests.

use std::time::Duration;

use geo::Coord;
use wayfarer_core::{DistanceError, DistanceService, Leg};

/// Stub `DistanceService` for testing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{DistanceService, Leg};
/// use wayfarer_data::routing::test_support::StubDistanceService;
///
/// let service = StubDistanceService::with_leg(Leg::new(120, Duration::from_secs(60)));
/// let leg = service.leg(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// assert_eq!(leg, Ok(Leg::new(120, Duration::from_secs(60))));
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceService {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Leg(Leg),
    Manhattan,
    Error(DistanceError),
}

impl StubDistanceService {
    /// Return `leg` for every lookup.
    #[must_use]
    pub const fn with_leg(leg: Leg) -> Self {
        Self {
            response: StubResponse::Leg(leg),
        }
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: DistanceError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Return the Manhattan distance between integer-valued coordinates as
    /// both metres and seconds.
    #[must_use]
    pub const fn manhattan() -> Self {
        Self {
            response: StubResponse::Manhattan,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "stub coordinates are small non-negative integers"
)]
fn manhattan(origin: Coord<f64>, destination: Coord<f64>) -> u64 {
    let dx = (origin.x - destination.x).abs();
    let dy = (origin.y - destination.y).abs();
    (dx + dy).round() as u64
}

impl DistanceService for StubDistanceService {
    fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError> {
        match &self.response {
            StubResponse::Leg(leg) => Ok(*leg),
            StubResponse::Manhattan => {
                let distance = manhattan(origin, destination);
                Ok(Leg::new(distance, Duration::from_secs(distance)))
            }
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
