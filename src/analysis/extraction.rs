//! Extraction of numeric metrics from raw test entries
//!
//! Every test entry is a JSON object produced by the player instrumentation.
//! A [`FieldPath`] names the metric to pull out of it (e.g. `states2s.currentBitrate`),
//! and [`extract_series`] collects that metric for each network profile, scaled by a divisor.

use super::profiles::{NetworkProfile, ProfileSeries};
use crate::common::TestReport;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while extracting metrics from test entries
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Results contain no tests for network profile {0}")]
    MissingProfile(NetworkProfile),

    #[error("Test #{index} of {profile} has no field '{path}'")]
    MissingField {
        profile: NetworkProfile,
        index: usize,
        path: FieldPath,
    },

    #[error("Field '{path}' of test #{index} of {profile} is not numeric: {value}")]
    NotNumeric {
        profile: NetworkProfile,
        index: usize,
        path: FieldPath,
        value: String,
    },
}

type Result<T> = core::result::Result<T, ExtractionError>;

/// Path to a metric inside a test entry: a top level field, optionally followed by a nested one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    field: &'static str,
    nested: Option<&'static str>,
}

impl FieldPath {
    /// A field stored directly on the test entry (e.g. `joinTime`)
    pub const fn top(field: &'static str) -> Self {
        Self {
            field,
            nested: None,
        }
    }

    /// A field stored on a sub-object of the test entry (e.g. `states2s.currentBitrate`)
    pub const fn nested(field: &'static str, nested: &'static str) -> Self {
        Self {
            field,
            nested: Some(nested),
        }
    }

    /// Looks up the value this path points at
    pub fn resolve<'a>(&self, entry: &'a Value) -> Option<&'a Value> {
        let value = entry.get(self.field)?;
        match self.nested {
            Some(nested) => value.get(nested),
            None => Some(value),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nested {
            Some(nested) => write!(f, "{}.{}", self.field, nested),
            None => f.write_str(self.field),
        }
    }
}

/// Collects the metric at `path` for every test of every profile, divided by `divisor`
///
/// # Arguments
/// * `report` - The parsed test results
/// * `path` - Location of the metric inside each test entry
/// * `divisor` - Value each raw sample is divided by (see [`crate::analysis::constants`])
///
/// # Returns
/// * `Ok(ProfileSeries)` - Scaled samples, in test order, for each profile
/// * `Err(ExtractionError)` - If a profile or field is missing, or a value is not numeric
pub fn extract_series(report: &TestReport, path: FieldPath, divisor: f64) -> Result<ProfileSeries> {
    let mut series = ProfileSeries::new();

    for profile in NetworkProfile::ALL {
        let tests = report
            .datas
            .get(profile.key())
            .ok_or(ExtractionError::MissingProfile(profile))?;

        let samples = tests
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let value = path.resolve(entry).ok_or(ExtractionError::MissingField {
                    profile,
                    index,
                    path,
                })?;

                as_number(value)
                    .map(|raw| raw / divisor)
                    .filter(|scaled| scaled.is_finite())
                    .ok_or_else(|| ExtractionError::NotNumeric {
                        profile,
                        index,
                        path,
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        series.set(profile, samples);
    }

    Ok(series)
}

/// Arithmetic mean of the samples, or [`None`] if there are none
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

// Instrumentation occasionally serializes numbers as strings.
// Non-finite values cannot be placed on an axis.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::constants::{BUFFER_MS_DIVISOR, KBPS_DIVISOR, UNSCALED};
    use rstest::rstest;
    use serde_json::json;

    fn report_from(datas: Value) -> TestReport {
        serde_json::from_value(json!({
            "available_qualities": [{"id": 0, "bitrate": 250000}],
            "datas": datas
        }))
        .unwrap()
    }

    fn entry(join_time: f64, bitrate: f64, buffer: f64) -> Value {
        json!({
            "joinTime": join_time,
            "states2s": {"currentBitrate": bitrate, "videoBufferLength": buffer}
        })
    }

    fn full_report() -> TestReport {
        report_from(json!({
            "SLOW_3G": [entry(4.25, 250000.0, 1.5), entry(3.75, 500000.0, 2.25)],
            "GOOD_3G": [entry(2.5, 1000000.0, 4.0)],
            "REGULAR_4G": [entry(1.0, 2500000.0, 6.5)],
            "WIFI": [entry(0.5, 5000000.0, 8.0)],
            "OFFLINE": [{"unrelated": true}]
        }))
    }

    #[test]
    fn join_time_is_unscaled() {
        let series =
            extract_series(&full_report(), FieldPath::top("joinTime"), UNSCALED).unwrap();

        assert_eq!(series.get(NetworkProfile::Slow3G), &[4.25, 3.75]);
        assert_eq!(series.get(NetworkProfile::Good3G), &[2.5]);
        assert_eq!(series.get(NetworkProfile::Regular4G), &[1.0]);
        assert_eq!(series.get(NetworkProfile::Wifi), &[0.5]);
    }

    #[test]
    fn bitrate_is_converted_to_kbps() {
        let path = FieldPath::nested("states2s", "currentBitrate");
        let series = extract_series(&full_report(), path, KBPS_DIVISOR).unwrap();

        assert_eq!(series.get(NetworkProfile::Slow3G), &[250.0, 500.0]);
        assert_eq!(series.get(NetworkProfile::Wifi), &[5000.0]);
    }

    #[test]
    fn buffer_length_is_converted_to_milliseconds() {
        let path = FieldPath::nested("states2s", "videoBufferLength");
        let series = extract_series(&full_report(), path, BUFFER_MS_DIVISOR).unwrap();

        let expected = [1500.0, 2250.0];
        for (actual, expected) in series.get(NetworkProfile::Slow3G).iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
        assert!((series.get(NetworkProfile::Wifi)[0] - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let report = report_from(json!({
            "SLOW_3G": [{"joinTime": "1.5"}],
            "GOOD_3G": [],
            "REGULAR_4G": [],
            "WIFI": []
        }));

        let series = extract_series(&report, FieldPath::top("joinTime"), UNSCALED).unwrap();
        assert_eq!(series.get(NetworkProfile::Slow3G), &[1.5]);
        assert!(series.get(NetworkProfile::Wifi).is_empty());
    }

    #[test]
    fn missing_profile_is_reported() {
        let report = report_from(json!({
            "SLOW_3G": [],
            "GOOD_3G": [],
            "WIFI": []
        }));

        let result = extract_series(&report, FieldPath::top("joinTime"), UNSCALED);
        assert!(matches!(
            result,
            Err(ExtractionError::MissingProfile(NetworkProfile::Regular4G))
        ));
    }

    #[rstest]
    #[case::top_level(FieldPath::top("startupTime"))]
    #[case::missing_parent(FieldPath::nested("states22s", "currentBitrate"))]
    #[case::missing_child(FieldPath::nested("states2s", "droppedFrames"))]
    fn missing_field_is_reported(#[case] path: FieldPath) {
        let result = extract_series(&full_report(), path, UNSCALED);
        match result {
            Err(ExtractionError::MissingField {
                profile,
                index,
                path: reported,
            }) => {
                assert_eq!(profile, NetworkProfile::Slow3G);
                assert_eq!(index, 0);
                assert_eq!(reported, path);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[rstest]
    #[case::boolean(json!(true))]
    #[case::null(json!(null))]
    #[case::text(json!("fast"))]
    #[case::object(json!({"value": 1}))]
    #[case::infinity(json!("inf"))]
    #[case::negative_infinity(json!("-Infinity"))]
    #[case::not_a_number(json!("NaN"))]
    fn non_numeric_value_is_reported(#[case] value: Value) {
        let report = report_from(json!({
            "SLOW_3G": [{"joinTime": 1.0}],
            "GOOD_3G": [{"joinTime": value}],
            "REGULAR_4G": [],
            "WIFI": []
        }));

        let result = extract_series(&report, FieldPath::top("joinTime"), UNSCALED);
        assert!(matches!(
            result,
            Err(ExtractionError::NotNumeric {
                profile: NetworkProfile::Good3G,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn overflowing_scale_is_reported() {
        let report = report_from(json!({
            "SLOW_3G": [{"joinTime": 1.0e307}],
            "GOOD_3G": [],
            "REGULAR_4G": [],
            "WIFI": []
        }));

        let result = extract_series(&report, FieldPath::top("joinTime"), BUFFER_MS_DIVISOR);
        assert!(matches!(result, Err(ExtractionError::NotNumeric { index: 0, .. })));
    }

    #[test]
    fn field_path_display() {
        assert_eq!(FieldPath::top("joinTime").to_string(), "joinTime");
        assert_eq!(
            FieldPath::nested("states12s", "videoBufferLength").to_string(),
            "states12s.videoBufferLength"
        );
    }

    #[test]
    fn mean_of_samples() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0]), Some(2.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }
}
