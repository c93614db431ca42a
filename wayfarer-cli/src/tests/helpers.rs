//! Test helpers for composing plan requests on disk and stub providers.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use tempfile::TempDir;
use wayfarer_core::test_support::FixedMatrixProvider;
use wayfarer_core::{CostMatrix, Location, PinSpec, PrecedenceSpec, TravelMatrixProvider, TripRequest};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write file");
}

/// Temporary directory holding a request file path.
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request_path: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");
        Self {
            _tmp: tmp,
            root,
            request_path,
        }
    }

    pub(super) fn write_request(&self, request: &TripRequest) {
        let payload = serde_json::to_string_pretty(request).expect("serialise request");
        write_utf8(&self.request_path, payload.as_bytes());
    }
}

/// Four stops on a line of longitudes; ids 10 to 13.
pub(super) fn harbour_request() -> TripRequest {
    TripRequest {
        name: Some("Harbour loop".to_owned()),
        locations: (0..4)
            .map(|i| {
                Location::new(
                    10 + i,
                    Coord {
                        x: 106.70 + 0.01 * i as f64,
                        y: 10.77,
                    },
                )
            })
            .collect(),
        start: Some(10.into()),
        end: Some(13.into()),
        ..TripRequest::default()
    }
}

/// The harbour stops with pins that contradict a precedence rule.
pub(super) fn contradictory_request() -> TripRequest {
    TripRequest {
        start: None,
        end: None,
        pins: vec![
            PinSpec {
                position: 0,
                location: 11.into(),
            },
            PinSpec {
                position: 1,
                location: 10.into(),
            },
        ],
        precedence: vec![PrecedenceSpec {
            before: 10.into(),
            after: 11.into(),
        }],
        ..harbour_request()
    }
}

/// The harbour stops with two precedence rules forming a cycle.
pub(super) fn cyclic_request() -> TripRequest {
    TripRequest {
        precedence: vec![
            PrecedenceSpec {
                before: 11.into(),
                after: 12.into(),
            },
            PrecedenceSpec {
                before: 12.into(),
                after: 11.into(),
            },
        ],
        ..harbour_request()
    }
}

/// Distances for the harbour stops; the cheapest anchored order is
/// 10, 12, 11, 13 with total 9.
pub(super) fn harbour_costs() -> CostMatrix {
    CostMatrix::from_rows(vec![
        vec![0, 5, 3, 8],
        vec![5, 0, 2, 4],
        vec![3, 2, 0, 6],
        vec![8, 4, 6, 0],
    ])
    .expect("square matrix")
}

/// Supplies a fixed provider in place of the HTTP client.
pub(super) struct FixedProviderBuilder {
    pub(super) provider: FixedMatrixProvider,
}

impl FixedProviderBuilder {
    pub(super) fn harbour() -> Self {
        Self {
            provider: FixedMatrixProvider::from_costs(harbour_costs()),
        }
    }
}

impl MatrixProviderBuilder for FixedProviderBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn TravelMatrixProvider>, CliError> {
        Ok(Box::new(self.provider.clone()))
    }
}

pub(super) fn plan_args(request_path: &Utf8Path) -> PlanArgs {
    PlanArgs {
        request_path: Some(request_path.to_path_buf()),
        ..PlanArgs::default()
    }
}
