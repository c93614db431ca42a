use thiserror::Error;

use crate::{CostMatrixError, NodeIndex};

/// Errors from [`crate::distance::DistanceService::leg`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported a failure status in its payload.
    #[error("distance service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Optional explanation from the service.
        message: String,
    },
    /// The response payload could not be decoded.
    #[error("failed to parse distance response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}

impl DistanceError {
    /// Whether retrying the same lookup may succeed.
    ///
    /// Network failures, timeouts, rate limiting and server-side HTTP errors
    /// are transient; everything else is permanent.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } => true,
            Self::HttpError { status, .. } => *status == 429 || *status >= 500,
            Self::ServiceError { .. } | Self::ParseError { .. } => false,
        }
    }
}

/// Errors from [`crate::distance::TravelMatrixProvider::travel_matrices`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No coordinates were provided.
    #[error("at least one location is required to build a travel matrix")]
    EmptyInput,
    /// A single pair lookup failed, aborting the whole build.
    #[error("distance lookup from node {origin} to node {destination} failed: {source}")]
    Lookup {
        /// Origin node of the failed lookup.
        origin: NodeIndex,
        /// Destination node of the failed lookup.
        destination: NodeIndex,
        /// Underlying lookup failure.
        #[source]
        source: DistanceError,
    },
    /// The collected costs did not form a valid matrix.
    #[error(transparent)]
    Shape(#[from] CostMatrixError),
}
