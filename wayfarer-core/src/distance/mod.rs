//! Pairwise distance lookups and travel-matrix construction.
//!
//! [`DistanceService`] abstracts one point-to-point lookup against an external
//! service. [`TravelMatrixProvider`] produces the full request-scoped
//! [`TravelMatrices`](crate::TravelMatrices); [`SequentialMatrixBuilder`] is
//! the plain implementation issuing one lookup per ordered pair.
//!
//! Matrix construction is all-or-nothing: the first failed lookup aborts the
//! build and no partial matrix is ever returned.

mod builder;
mod error;
mod provider;

pub use builder::SequentialMatrixBuilder;
pub use error::{DistanceError, MatrixError};
pub use provider::{DistanceService, Leg, TravelMatrixProvider};
