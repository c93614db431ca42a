use geo::Coord;

/// Caller-facing identifier of a selected location.
pub type LocationId = u64;

/// A location selected for a trip.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The order in
/// which locations are supplied fixes their node indices for one request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::Location;
///
/// let location = Location::new(42, Coord { x: 106.70, y: 10.77 });
///
/// assert_eq!(location.id, 42);
/// assert_eq!(location.coordinate.y, 10.77);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Caller-facing identifier.
    pub id: LocationId,
    /// Position used for distance lookups.
    pub coordinate: Coord<f64>,
}

impl Location {
    /// Construct a `Location`.
    pub const fn new(id: LocationId, coordinate: Coord<f64>) -> Self {
        Self { id, coordinate }
    }
}
