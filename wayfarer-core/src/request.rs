//! Caller-facing trip requests and their resolution to node indices.
//!
//! A [`TripRequest`] refers to locations by caller identifiers. Resolution
//! fixes node indices from the order of the location list and translates every
//! pin, precedence rule and anchor into index space.

use std::collections::HashMap;

use geo::Coord;
use log::debug;

use crate::{Location, LocationId, NodeIndex, PositionPins, PrecedenceSet, RouteConstraints};
use crate::{Anchors, ValidationError};

/// A location reference as supplied by the caller.
///
/// Callers may send identifiers as numbers or as numeric strings; anything
/// else is rejected during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawLocationId {
    /// A numeric identifier.
    Numeric(LocationId),
    /// An identifier in text form.
    Text(String),
}

impl RawLocationId {
    /// Parse the identifier.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::RawLocationId;
    ///
    /// assert_eq!(RawLocationId::Text(" 17 ".into()).parse(), Ok(17));
    /// assert!(RawLocationId::Text("museum".into()).parse().is_err());
    /// ```
    pub fn parse(&self) -> Result<LocationId, ValidationError> {
        match self {
            Self::Numeric(id) => Ok(*id),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| ValidationError::NonNumericIdentifier {
                        value: text.clone(),
                    })
            }
        }
    }
}

impl From<LocationId> for RawLocationId {
    fn from(id: LocationId) -> Self {
        Self::Numeric(id)
    }
}

/// Pin a location to a 0-based position in the final path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinSpec {
    /// Target position, 0-based.
    pub position: usize,
    /// Location to place there.
    pub location: RawLocationId,
}

/// Require one location to be visited before another.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecedenceSpec {
    /// Location visited first.
    pub before: RawLocationId,
    /// Location visited later.
    pub after: RawLocationId,
}

/// A request to order a set of selected locations.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Location, TripRequest};
///
/// let request = TripRequest {
///     locations: vec![
///         Location::new(10, Coord { x: 0.0, y: 0.0 }),
///         Location::new(20, Coord { x: 1.0, y: 0.0 }),
///     ],
///     start: Some(20.into()),
///     ..TripRequest::default()
/// };
/// let trip = request.resolve()?;
/// assert_eq!(trip.constraints.anchors.start, Some(1));
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    /// Optional display name carried through to the itinerary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Selected locations; list order fixes node indices.
    pub locations: Vec<Location>,
    /// Absolute position pins.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pins: Vec<PinSpec>,
    /// Pairwise precedence rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub precedence: Vec<PrecedenceSpec>,
    /// Location that must open the path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<RawLocationId>,
    /// Location that must close the path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<RawLocationId>,
}

/// A [`TripRequest`] translated into node-index space.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrip {
    /// Trimmed display name.
    pub name: Option<String>,
    /// Caller identifier of each node.
    pub ids: Vec<LocationId>,
    /// Coordinate of each node.
    pub coordinates: Vec<Coord<f64>>,
    /// Constraints in index space, not yet checked for cycles.
    pub constraints: RouteConstraints,
}

impl ResolvedTrip {
    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.ids.len()
    }
}

impl TripRequest {
    /// Translate the request into node indices.
    ///
    /// Repeated locations keep their first occurrence. Fails on an empty
    /// selection, a blank name, non-numeric or unknown identifiers, and
    /// out-of-range or conflicting pins.
    pub fn resolve(&self) -> Result<ResolvedTrip, ValidationError> {
        let name = match &self.name {
            Some(name) if name.trim().is_empty() => return Err(ValidationError::BlankName),
            Some(name) => Some(name.trim().to_owned()),
            None => None,
        };

        let mut index: HashMap<LocationId, NodeIndex> = HashMap::new();
        let mut ids = Vec::with_capacity(self.locations.len());
        let mut coordinates = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            if index.contains_key(&location.id) {
                debug!("ignoring repeated location {}", location.id);
                continue;
            }
            index.insert(location.id, ids.len());
            ids.push(location.id);
            coordinates.push(location.coordinate);
        }
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let lookup = |raw: &RawLocationId| -> Result<NodeIndex, ValidationError> {
            let id = raw.parse()?;
            index
                .get(&id)
                .copied()
                .ok_or(ValidationError::UnknownLocation { id })
        };

        let mut pins = PositionPins::unpinned(ids.len());
        for pin in &self.pins {
            pins.pin(pin.position, lookup(&pin.location)?)?;
        }
        let precedence = self
            .precedence
            .iter()
            .map(|rule| Ok((lookup(&rule.before)?, lookup(&rule.after)?)))
            .collect::<Result<Vec<_>, ValidationError>>()
            .map(PrecedenceSet::from_pairs)?;
        let anchors = Anchors {
            start: self.start.as_ref().map(lookup).transpose()?,
            end: self.end.as_ref().map(lookup).transpose()?,
        };

        Ok(ResolvedTrip {
            name,
            ids,
            coordinates,
            constraints: RouteConstraints {
                pins,
                precedence,
                anchors,
            },
        })
    }
}
