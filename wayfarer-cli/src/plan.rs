//! Plan command implementation for the Wayfarer CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{Cost, LocationId, TravelMatrixProvider, TripRequest};
use wayfarer_data::routing::{HttpDistanceService, HttpDistanceServiceConfig, RetryPolicy};
use wayfarer_fs::{open_utf8_file, write_atomic};
use wayfarer_solver::{ExactSolver, PlanOutcome, SolverLimits, TripPlanner};

use crate::{
    ARG_PLAN_API_KEY, ARG_PLAN_CONCURRENCY, ARG_PLAN_MAX_DYNAMIC, ARG_PLAN_MAX_SEARCH,
    ARG_PLAN_OUTPUT, ARG_PLAN_REQUEST, ARG_PLAN_RETRIES, ARG_PLAN_SERVICE_URL, ARG_PLAN_TIMEOUT,
    CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the cheapest visiting order for the locations in a \
                 JSON-encoded TripRequest. Pairwise distances are looked up \
                 from a distance-matrix service; position pins, precedence \
                 rules and start/end anchors are honoured exactly.",
    about = "Plan a constrained trip"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a TripRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Endpoint of the distance-matrix service.
    #[arg(long = ARG_PLAN_SERVICE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) service_url: Option<String>,
    /// API key sent with every distance lookup.
    #[arg(long = ARG_PLAN_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Maximum distance lookups in flight.
    #[arg(long = ARG_PLAN_CONCURRENCY, value_name = "n")]
    #[serde(default)]
    pub(crate) concurrency: Option<usize>,
    /// Retries for each failed lookup on transient errors.
    #[arg(long = ARG_PLAN_RETRIES, value_name = "n")]
    #[serde(default)]
    pub(crate) retries: Option<u32>,
    /// Free-node ceiling for the constrained permutation search (at most 11).
    #[arg(long = ARG_PLAN_MAX_SEARCH, value_name = "n")]
    #[serde(default)]
    pub(crate) max_search_free_nodes: Option<usize>,
    /// Free-node ceiling for the Held-Karp dynamic programme (at most 20).
    #[arg(long = ARG_PLAN_MAX_DYNAMIC, value_name = "n")]
    #[serde(default)]
    pub(crate) max_dynamic_free_nodes: Option<usize>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Distance service client settings.
    pub(crate) service: ServiceSettings,
    /// Free-node ceilings for the solver.
    pub(crate) limits: SolverLimits,
    /// Report destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

/// Distance service settings in comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceSettings {
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) concurrency: usize,
    pub(crate) retry: RetryPolicy,
}

impl ServiceSettings {
    fn client_config(&self) -> HttpDistanceServiceConfig {
        let config = HttpDistanceServiceConfig::new(self.base_url.clone())
            .with_timeout(self.timeout)
            .with_concurrency(self.concurrency)
            .with_retry(self.retry);
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match wayfarer_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn positive<T: Default + PartialEq>(
    value: Option<T>,
    field: &'static str,
) -> Result<Option<T>, CliError> {
    match value {
        Some(inner) if inner == T::default() => Err(CliError::InvalidSetting {
            field,
            reason: "must be greater than zero",
        }),
        other => Ok(other),
    }
}

fn at_most(
    value: Option<usize>,
    maximum: usize,
    field: &'static str,
) -> Result<Option<usize>, CliError> {
    match value {
        Some(inner) if inner > maximum => Err(CliError::InvalidSetting {
            field,
            reason: "exceeds the solver's supported maximum",
        }),
        other => Ok(other),
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let defaults = HttpDistanceServiceConfig::default();
        let timeout = positive(args.timeout_secs, ARG_PLAN_TIMEOUT)?
            .map_or(defaults.timeout, Duration::from_secs);
        let concurrency =
            positive(args.concurrency, ARG_PLAN_CONCURRENCY)?.unwrap_or(defaults.concurrency);
        let retry = args.retries.map_or(defaults.retry, |max_retries| RetryPolicy {
            max_retries,
            ..defaults.retry
        });
        let service = ServiceSettings {
            base_url: args.service_url.unwrap_or(defaults.base_url),
            api_key: args.api_key.filter(|key| !key.trim().is_empty()),
            timeout,
            concurrency,
            retry,
        };

        let fallback = SolverLimits::default();
        let limits = SolverLimits {
            max_search_free_nodes: at_most(
                args.max_search_free_nodes,
                SolverLimits::MAX_SEARCH_FREE_NODES,
                ARG_PLAN_MAX_SEARCH,
            )?
            .unwrap_or(fallback.max_search_free_nodes),
            max_dynamic_free_nodes: at_most(
                args.max_dynamic_free_nodes,
                SolverLimits::MAX_DYNAMIC_FREE_NODES,
                ARG_PLAN_MAX_DYNAMIC,
            )?
            .unwrap_or(fallback.max_dynamic_free_nodes),
        };

        Ok(Self {
            request_path,
            service,
            limits,
            output: args.output,
        })
    }
}

/// JSON report written for every completed planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    /// Whether any order satisfies the request's rules.
    pub(crate) feasible: bool,
    /// Display name from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    /// Location identifiers in visiting order; empty when infeasible.
    #[serde(default)]
    pub(crate) stops: Vec<LocationId>,
    /// Total travel distance in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) total_distance: Option<Cost>,
    /// Total travel time in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) total_duration_secs: Option<u64>,
    /// Requested start location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) start: Option<LocationId>,
    /// Requested end location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) end: Option<LocationId>,
}

impl PlanReport {
    pub(crate) fn new(request: &TripRequest, outcome: &PlanOutcome) -> Self {
        match outcome {
            PlanOutcome::Planned(itinerary) => Self {
                feasible: true,
                name: itinerary.name.clone(),
                stops: itinerary.stops.clone(),
                total_distance: Some(itinerary.total_distance),
                total_duration_secs: Some(itinerary.total_duration.as_secs()),
                start: itinerary.start,
                end: itinerary.end,
            },
            PlanOutcome::Infeasible => Self {
                feasible: false,
                name: request.name.clone(),
                stops: Vec::new(),
                total_distance: None,
                total_duration_secs: None,
                start: None,
                end: None,
            },
        }
    }
}

/// Builds the travel matrix provider for the current plan invocation.
pub(crate) trait MatrixProviderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TravelMatrixProvider>, CliError>;
}

pub(crate) struct HttpMatrixProviderBuilder;

impl MatrixProviderBuilder for HttpMatrixProviderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TravelMatrixProvider>, CliError> {
        let service = HttpDistanceService::with_config(config.service.client_config()).map_err(
            |source| CliError::BuildDistanceService {
                base_url: config.service.base_url.clone(),
                source,
            },
        )?;
        Ok(Box::new(service))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &HttpMatrixProviderBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn MatrixProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let report = execute_plan(&config, builder)?;
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseReport)?;
    match &config.output {
        Some(path) => write_report_file(path, &payload),
        None => write_report(writer, &payload),
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn MatrixProviderBuilder,
) -> Result<PlanReport, CliError> {
    let request = load_trip_request(&config.request_path)?;
    let provider = builder.build(config)?;
    let planner = TripPlanner::new(&*provider, ExactSolver::with_limits(config.limits));
    let outcome = planner
        .plan(&request)
        .map_err(|source| CliError::Plan {
            path: config.request_path.clone(),
            source,
        })?;
    match &outcome {
        PlanOutcome::Planned(itinerary) => info!(
            "planned {} stops with total distance {}",
            itinerary.stops.len(),
            itinerary.total_distance
        ),
        PlanOutcome::Infeasible => info!("request {} has no feasible order", config.request_path),
    }
    Ok(PlanReport::new(&request, &outcome))
}

/// Loads a JSON-encoded [`TripRequest`] from disk.
pub(crate) fn load_trip_request(path: &Utf8Path) -> Result<TripRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenTripRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn write_report_file(path: &Utf8Path, payload: &str) -> Result<(), CliError> {
    let mut contents = payload.to_owned();
    contents.push('\n');
    write_atomic(path, contents.as_bytes()).map_err(|source| CliError::WriteOutputFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote plan report to {path}");
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
