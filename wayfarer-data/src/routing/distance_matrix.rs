//! Distance-matrix API response types.
//!
//! Only the first element of the first row is read; every request carries a
//! single origin and a single destination.

use std::time::Duration;

use serde::Deserialize;
use wayfarer_core::{DistanceError, Leg};

const STATUS_OK: &str = "OK";

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub(crate) struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Row {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Element {
    pub status: String,
    #[serde(default)]
    pub distance: Option<Measure>,
    #[serde(default)]
    pub duration: Option<Measure>,
}

/// A measured quantity; metres for distance, seconds for duration.
#[derive(Debug, Deserialize)]
pub(crate) struct Measure {
    pub value: u64,
}

impl DistanceMatrixResponse {
    /// Extract the single leg this response describes.
    pub(crate) fn into_leg(self) -> Result<Leg, DistanceError> {
        if self.status != STATUS_OK {
            return Err(DistanceError::ServiceError {
                code: self.status,
                message: self.error_message.unwrap_or_default(),
            });
        }
        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| DistanceError::ParseError {
                message: "response has no elements".to_owned(),
            })?;
        if element.status != STATUS_OK {
            return Err(DistanceError::ServiceError {
                code: element.status,
                message: "no route between origin and destination".to_owned(),
            });
        }
        let distance = element.distance.ok_or_else(|| DistanceError::ParseError {
            message: "element missing distance".to_owned(),
        })?;
        let duration = element.duration.ok_or_else(|| DistanceError::ParseError {
            message: "element missing duration".to_owned(),
        })?;
        Ok(Leg::new(distance.value, Duration::from_secs(duration.value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(json: &str) -> Result<Leg, DistanceError> {
        serde_json::from_str::<DistanceMatrixResponse>(json)
            .expect("valid json")
            .into_leg()
    }

    #[rstest]
    fn reads_first_element() {
        let leg = parse(
            r#"{
                "status": "OK",
                "origin_addresses": ["A"],
                "destination_addresses": ["B"],
                "rows": [{ "elements": [{
                    "status": "OK",
                    "distance": { "text": "1.2 km", "value": 1234 },
                    "duration": { "text": "4 mins", "value": 245 }
                }]}]
            }"#,
        )
        .expect("valid leg");
        assert_eq!(leg, Leg::new(1234, Duration::from_secs(245)));
    }

    #[rstest]
    fn top_level_status_maps_to_service_error() {
        let err = parse(r#"{ "status": "REQUEST_DENIED", "error_message": "bad key" }"#)
            .expect_err("denied");
        assert_eq!(
            err,
            DistanceError::ServiceError {
                code: "REQUEST_DENIED".to_owned(),
                message: "bad key".to_owned(),
            }
        );
    }

    #[rstest]
    fn element_status_maps_to_service_error() {
        let err = parse(r#"{ "status": "OK", "rows": [{ "elements": [{ "status": "ZERO_RESULTS" }] }] }"#)
            .expect_err("no route");
        assert!(matches!(err, DistanceError::ServiceError { code, .. } if code == "ZERO_RESULTS"));
    }

    #[rstest]
    #[case(r#"{ "status": "OK", "rows": [] }"#)]
    #[case(r#"{ "status": "OK", "rows": [{ "elements": [] }] }"#)]
    #[case(r#"{ "status": "OK", "rows": [{ "elements": [{ "status": "OK", "duration": { "value": 3 } }] }] }"#)]
    #[case(r#"{ "status": "OK", "rows": [{ "elements": [{ "status": "OK", "distance": { "value": 3 } }] }] }"#)]
    fn missing_fields_map_to_parse_error(#[case] json: &str) {
        assert!(matches!(parse(json), Err(DistanceError::ParseError { .. })));
    }
}
