//! Solved routes in caller-facing form.
//!
//! Maps a solved node order back to location identifiers and aggregates the
//! duration metric along the path.

use std::time::Duration;

use crate::{Cost, DurationMap, LocationId, ResolvedTrip, Solution, ValidationError};

/// An ordered trip ready for hand-off to persistence or display.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{DurationMap, Itinerary, Location, Solution, TripRequest};
///
/// let request = TripRequest {
///     locations: vec![
///         Location::new(7, Coord { x: 0.0, y: 0.0 }),
///         Location::new(9, Coord { x: 1.0, y: 0.0 }),
///     ],
///     ..TripRequest::default()
/// };
/// let trip = request.resolve()?;
/// let durations: DurationMap = [((1, 0), Duration::from_secs(90))].into_iter().collect();
/// let solution = Solution { path: vec![1, 0], cost: 400 };
///
/// let itinerary = Itinerary::assemble(&solution, &trip, &durations)?;
/// assert_eq!(itinerary.stops, vec![9, 7]);
/// assert_eq!(itinerary.total_distance, 400);
/// assert_eq!(itinerary.total_duration, Duration::from_secs(90));
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// Display name from the request.
    pub name: Option<String>,
    /// Location identifiers in visiting order.
    pub stops: Vec<LocationId>,
    /// Total travel cost along the route.
    pub total_distance: Cost,
    /// Total travel time along the route; unknown legs count as zero.
    pub total_duration: Duration,
    /// Requested start location, if any.
    pub start: Option<LocationId>,
    /// Requested end location, if any.
    pub end: Option<LocationId>,
}

impl Itinerary {
    /// Assemble an itinerary from a solved path.
    ///
    /// Fails if the path names a node outside the resolved trip.
    pub fn assemble(
        solution: &Solution,
        trip: &ResolvedTrip,
        durations: &DurationMap,
    ) -> Result<Self, ValidationError> {
        let to_id = |node: usize| {
            trip.ids
                .get(node)
                .copied()
                .ok_or(ValidationError::NodeOutOfRange {
                    node,
                    nodes: trip.nodes(),
                })
        };
        let stops = solution
            .path
            .iter()
            .map(|node| to_id(*node))
            .collect::<Result<Vec<_>, _>>()?;
        let anchors = trip.constraints.anchors;
        Ok(Self {
            name: trip.name.clone(),
            stops,
            total_distance: solution.cost,
            total_duration: durations.path_duration(&solution.path),
            start: anchors.start.map(to_id).transpose()?,
            end: anchors.end.map(to_id).transpose()?,
        })
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the itinerary has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
