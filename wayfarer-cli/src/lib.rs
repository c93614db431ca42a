//! Command-line interface for planning constrained trips.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::PlanArgs;
#[cfg(test)]
use plan::{
    MatrixProviderBuilder, PlanConfig, PlanReport, config_from_layers_for_test, load_trip_request,
    run_plan_with,
};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_SERVICE_URL: &str = "service-url";
const ARG_PLAN_API_KEY: &str = "api-key";
const ARG_PLAN_TIMEOUT: &str = "timeout-secs";
const ARG_PLAN_CONCURRENCY: &str = "concurrency";
const ARG_PLAN_RETRIES: &str = "retries";
const ARG_PLAN_MAX_SEARCH: &str = "max-search-free-nodes";
const ARG_PLAN_MAX_DYNAMIC: &str = "max-dynamic-free-nodes";
const ARG_PLAN_OUTPUT: &str = "output";
const ENV_PLAN_REQUEST: &str = "WAYFARER_CMDS_PLAN_REQUEST_PATH";

/// Run the Wayfarer CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Order the stops of a trip under position and precedence rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan the cheapest visiting order for a trip request.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
