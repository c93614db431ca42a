//! HTTP-based distance lookups for travel matrix construction.
//!
//! This module provides [`HttpDistanceService`], an implementation of both
//! [`wayfarer_core::DistanceService`] and
//! [`wayfarer_core::TravelMatrixProvider`] backed by a distance-matrix style
//! web API.
//!
//! # Architecture
//!
//! Each ordered pair of locations is looked up with one `GET` request carrying
//! `origins` and `destinations` as `lat,lng` strings. Matrix construction
//! issues those lookups concurrently through a bounded pool and retries
//! transient failures with exponential backoff. The synchronous core traits
//! are implemented by blocking on the async HTTP calls internally, keeping the
//! core library embeddable in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use wayfarer_core::TravelMatrixProvider;
//! use wayfarer_data::routing::{HttpDistanceService, HttpDistanceServiceConfig};
//!
//! let config = HttpDistanceServiceConfig::default()
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_concurrency(4);
//! let service = HttpDistanceService::with_config(config)?;
//!
//! let coordinates = [
//!     Coord { x: 106.7009, y: 10.7769 },
//!     Coord { x: 106.6953, y: 10.7798 },
//! ];
//! let matrices = service.travel_matrices(&coordinates)?;
//! println!("0 -> 1 costs {:?}", matrices.costs.cost(0, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod distance_matrix;
mod provider;
mod retry;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDistanceService, HttpDistanceServiceConfig,
    ProviderBuildError,
};
pub use retry::RetryPolicy;
