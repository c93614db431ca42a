//! Error types emitted by the Wayfarer CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfarer_data::routing::ProviderBuildError;
use wayfarer_solver::PlanError;

/// Errors emitted by the Wayfarer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A setting holds a value the planner cannot use.
    #[error("invalid {field}: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the trip request file failed.
    #[error("failed to open trip request at {path:?}: {source}")]
    OpenTripRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Trip request JSON could not be decoded.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseTripRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the distance service client failed.
    #[error("failed to build distance service for {base_url:?}: {source}")]
    BuildDistanceService {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Planning the request failed.
    #[error("failed to plan trip request {path:?}: {source}")]
    Plan {
        path: Utf8PathBuf,
        #[source]
        source: PlanError,
    },
    /// Serialising the plan report failed.
    #[error("failed to serialise plan report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the plan report to standard output failed.
    #[error("failed to write plan report: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the plan report to a file failed; the target is unchanged.
    #[error("failed to write plan report to {path:?}: {source}")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
