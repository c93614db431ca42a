#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden route regression tests for the exact solver.
//!
//! Each test loads a trip request and a distance matrix from JSON, plans it
//! through [`TripPlanner`] with a fixed matrix provider, and verifies the
//! itinerary exactly. Ties are part of the contract, so stop order is
//! compared verbatim.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use rstest::rstest;
use serde::Deserialize;
use wayfarer_core::test_support::FixedMatrixProvider;
use wayfarer_core::{Cost, CostMatrix, LocationId, TripRequest};
use wayfarer_solver::{ExactSolver, PlanOutcome, TripPlanner};

/// Deserialised golden route test case.
#[derive(Debug, Deserialize)]
struct GoldenRoute {
    name: String,
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    distance_matrix: Vec<Vec<Cost>>,
    request: TripRequest,
    expected: ExpectedResult,
}

/// Expected result from JSON.
#[derive(Debug, Deserialize)]
struct ExpectedResult {
    feasible: bool,
    #[serde(default)]
    stops: Vec<LocationId>,
    #[serde(default)]
    total_distance: Cost,
}

/// Load a golden route from the data directory.
fn load_golden_route(filename: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(filename);
    let content = fs::read_to_string(&path).expect("failed to read golden route file");
    serde_json::from_str(&content).expect("failed to parse golden route JSON")
}

#[rstest]
#[case("anchored_four_stops.json")]
#[case("pinned_middle_tie.json")]
#[case("precedence_reverses_line.json")]
#[case("pin_blocks_precedence.json")]
#[case("reversed_pair.json")]
#[case("single_location.json")]
fn golden_route_regression(#[case] filename: &str) {
    let golden = load_golden_route(filename);
    let costs = CostMatrix::from_rows(golden.distance_matrix).expect("square matrix");
    let planner = TripPlanner::new(FixedMatrixProvider::from_costs(costs), ExactSolver::new());

    let outcome = planner
        .plan(&golden.request)
        .expect("golden route should plan successfully");

    match outcome {
        PlanOutcome::Planned(itinerary) => {
            assert!(golden.expected.feasible, "{}: expected infeasible", golden.name);
            assert_eq!(
                itinerary.stops, golden.expected.stops,
                "{}: stop order mismatch",
                golden.name
            );
            assert_eq!(
                itinerary.total_distance, golden.expected.total_distance,
                "{}: distance mismatch",
                golden.name
            );
            // Fixed providers report one second per unit of distance.
            assert_eq!(
                itinerary.total_duration,
                Duration::from_secs(golden.expected.total_distance),
                "{}: duration mismatch",
                golden.name
            );
        }
        PlanOutcome::Infeasible => {
            assert!(!golden.expected.feasible, "{}: expected a route", golden.name);
        }
    }
}
