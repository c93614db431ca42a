//! HTTP-based `DistanceService` and `TravelMatrixProvider`.
//!
//! This module provides [`HttpDistanceService`], which looks up one origin
//! and destination pair per request against a distance-matrix style API and
//! assembles full travel matrices from those lookups.
//!
//! # Architecture
//!
//! The core traits are synchronous to keep the core library embeddable in
//! synchronous contexts. This service bridges the async HTTP calls to the
//! sync interface by blocking on a Tokio runtime internally.

use std::future::Future;
use std::time::Duration;

use futures_util::{StreamExt, stream};
use geo::Coord;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use wayfarer_core::{
    CostMatrix, DistanceError, DistanceService, DurationMap, Leg, MatrixError, TravelMatrices,
    TravelMatrixProvider,
};

use super::distance_matrix::DistanceMatrixResponse;
use super::retry::RetryPolicy;

/// Error type for [`HttpDistanceService`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default endpoint of the distance service.
pub const DEFAULT_BASE_URL: &str = "https://api-v2.distancematrix.ai/maps/api/distancematrix/json";

/// Default user agent for distance requests.
pub const DEFAULT_USER_AGENT: &str = "wayfarer-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of lookups in flight during matrix construction.
const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for [`HttpDistanceService`].
#[derive(Clone)]
pub struct HttpDistanceServiceConfig {
    /// Full endpoint URL, queried with `origins`, `destinations` and `key`.
    pub base_url: String,
    /// API key sent as the `key` query parameter, if any.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum lookups in flight while building a matrix; at least one.
    pub concurrency: usize,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl std::fmt::Debug for HttpDistanceServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("concurrency", &self.concurrency)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for HttpDistanceServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            concurrency: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpDistanceServiceConfig {
    /// Create a new configuration with the given endpoint URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of concurrent lookups; zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// HTTP-based distance service for a distance-matrix style API.
///
/// The service owns a Tokio runtime that is reused across calls, avoiding the
/// overhead of creating a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the service uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the service
/// falls back to its own internal runtime. This may deadlock if the caller's
/// runtime is driving IO or timers that the request depends on.
pub struct HttpDistanceService {
    client: Client,
    config: HttpDistanceServiceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpDistanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceService")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDistanceService {
    /// Create a new service with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDistanceServiceConfig::new(base_url))
    }

    /// Create a new service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDistanceServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The active configuration.
    pub const fn config(&self) -> &HttpDistanceServiceConfig {
        &self.config
    }

    /// Query parameters for one lookup.
    ///
    /// Coordinates are sent as `lat,lng`, i.e. `y,x`.
    fn query(&self, origin: Coord<f64>, destination: Coord<f64>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origins", format!("{},{}", origin.y, origin.x)),
            ("destinations", format!("{},{}", destination.y, destination.x)),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    /// Fetch one leg without retrying.
    async fn fetch_leg_once(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<Leg, DistanceError> {
        let url = self.config.base_url.as_str();
        let response = self
            .client
            .get(url)
            .query(&self.query(origin, destination))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body: DistanceMatrixResponse =
            response
                .json()
                .await
                .map_err(|err| DistanceError::ParseError {
                    message: err.to_string(),
                })?;
        body.into_leg()
    }

    /// Fetch one leg, retrying transient failures.
    async fn fetch_leg(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<Leg, DistanceError> {
        let service = self;
        self.config
            .retry
            .run(move || service.fetch_leg_once(origin, destination))
            .await
    }

    /// Build both matrices with a bounded number of lookups in flight.
    ///
    /// The first exhausted failure aborts the build and drops the remaining
    /// lookups.
    async fn fetch_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError> {
        let size = coordinates.len();
        let pairs: Vec<_> = coordinates
            .iter()
            .enumerate()
            .flat_map(|(origin, from)| {
                coordinates
                    .iter()
                    .enumerate()
                    .filter(move |(destination, _)| *destination != origin)
                    .map(move |(destination, to)| (origin, destination, *from, *to))
            })
            .collect();
        debug!(
            "building {size}x{size} travel matrix with {} lookups, {} in flight",
            pairs.len(),
            self.config.concurrency.max(1)
        );

        let mut lookups = stream::iter(pairs)
            .map(move |(origin, destination, from, to)| async move {
                self.fetch_leg(from, to)
                    .await
                    .map(|leg| (origin, destination, leg))
                    .map_err(|source| MatrixError::Lookup {
                        origin,
                        destination,
                        source,
                    })
            })
            .buffer_unordered(self.config.concurrency.max(1));

        let mut rows = vec![vec![0; size]; size];
        let mut durations = DurationMap::new();
        while let Some(result) = lookups.next().await {
            let (origin, destination, leg) = result?;
            if let Some(cell) = rows.get_mut(origin).and_then(|row| row.get_mut(destination)) {
                *cell = leg.distance;
            }
            durations.insert(origin, destination, leg.duration);
        }

        Ok(TravelMatrices {
            costs: CostMatrix::from_rows(rows)?,
            durations,
        })
    }

    /// Convert a reqwest error to a `DistanceError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DistanceError {
        if error.is_timeout() {
            return DistanceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DistanceError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DistanceError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        // block_in_place requires a multi-threaded runtime; for current_thread
        // runtimes we fall back to our own stored runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl DistanceService for HttpDistanceService {
    /// Look up one leg, retrying transient failures.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`).
    fn leg(&self, origin: Coord<f64>, destination: Coord<f64>) -> Result<Leg, DistanceError> {
        self.block_on(self.fetch_leg(origin, destination))
    }
}

impl TravelMatrixProvider for HttpDistanceService {
    /// Build travel matrices with `n * (n - 1)` concurrent lookups.
    ///
    /// # Runtime requirements
    ///
    /// As for [`DistanceService::leg`].
    fn travel_matrices(&self, coordinates: &[Coord<f64>]) -> Result<TravelMatrices, MatrixError> {
        if coordinates.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        self.block_on(self.fetch_matrices(coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn query_sends_latitude_first() {
        let service = HttpDistanceService::new("http://localhost:9").expect("service should build");
        let params = service.query(Coord { x: 106.7, y: 10.77 }, Coord { x: 106.69, y: 10.78 });
        assert_eq!(
            params,
            vec![
                ("origins", "10.77,106.7".to_owned()),
                ("destinations", "10.78,106.69".to_owned()),
            ]
        );
    }

    #[rstest]
    fn query_includes_api_key_when_configured() {
        let config = HttpDistanceServiceConfig::new("http://localhost:9").with_api_key("secret");
        let service = HttpDistanceService::with_config(config).expect("service should build");
        let params = service.query(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        assert_eq!(params.last(), Some(&("key", "secret".to_owned())));
    }

    #[rstest]
    fn empty_input_returns_error() {
        let service = HttpDistanceService::new("http://localhost:9").expect("service should build");
        assert_eq!(service.travel_matrices(&[]), Err(MatrixError::EmptyInput));
    }

    #[rstest]
    fn single_location_needs_no_requests() {
        // Nothing listens on the discard port; any request would fail.
        let service = HttpDistanceService::new("http://127.0.0.1:9").expect("service should build");
        let matrices = service
            .travel_matrices(&[Coord { x: 0.0, y: 0.0 }])
            .expect("no lookups needed");
        assert_eq!(matrices.costs.len(), 1);
        assert!(matrices.durations.is_empty());
    }

    #[rstest]
    fn config_builder_pattern() {
        let retry = RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(10),
        };
        let config = HttpDistanceServiceConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0")
            .with_concurrency(2)
            .with_retry(retry);

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.retry, retry);
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let config = HttpDistanceServiceConfig::default().with_api_key("hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
