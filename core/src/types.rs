//! Wire entities for the run log service.
//!
//! # Design
//! `StatusCode` is a closed enum: it serializes as its integer value and
//! deserializing an integer outside the known set fails instead of being
//! coerced. `Run` and `Version` mirror the JSON field names (camelCase).
//! These types are defined independently from the mock-server crate;
//! integration tests catch schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome code attached to every reported run.
///
/// Codes are grouped by category: `11xx` document problems, `12xx` network
/// problems, `20xx` analysis problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum StatusCode {
    Success,
    NoDocument,
    NoDom,
    NoCss,
    NoNetwork,
    InvalidScore,
    AnalysisTimeout,
    FailureNotSpecified,
    /// Reserved for runs produced by test suites.
    TestRun,
}

impl StatusCode {
    pub const ALL: [StatusCode; 9] = [
        StatusCode::Success,
        StatusCode::NoDocument,
        StatusCode::NoDom,
        StatusCode::NoCss,
        StatusCode::NoNetwork,
        StatusCode::InvalidScore,
        StatusCode::AnalysisTimeout,
        StatusCode::FailureNotSpecified,
        StatusCode::TestRun,
    ];

    pub const fn code(self) -> i64 {
        match self {
            StatusCode::Success => 0,
            StatusCode::NoDocument => 1100,
            StatusCode::NoDom => 1101,
            StatusCode::NoCss => 1102,
            StatusCode::NoNetwork => 1200,
            StatusCode::InvalidScore => 2000,
            StatusCode::AnalysisTimeout => 2001,
            StatusCode::FailureNotSpecified => 9999,
            StatusCode::TestRun => 10000,
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

/// An integer that is not a member of [`StatusCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code {0}")]
pub struct UnknownStatusCode(pub i64);

impl TryFrom<i64> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        StatusCode::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(UnknownStatusCode(value))
    }
}

impl From<StatusCode> for i64 {
    fn from(code: StatusCode) -> Self {
        code.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One reported plugin execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub score: f64,
    pub status_code: StatusCode,
    /// Conventionally present only for failure codes; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub browser_name: String,
    pub browser_version: String,
    pub plugin_name: String,
    pub plugin_version: String,
    pub extension_version: String,
    pub url: String,
    pub path: String,
}

/// Body of a `/log` request: a single run or an ordered batch.
///
/// Serializes untagged, so `One` is a JSON object and `Many` a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunPayload {
    One(Run),
    Many(Vec<Run>),
}

impl RunPayload {
    pub fn len(&self) -> usize {
        match self {
            RunPayload::One(_) => 1,
            RunPayload::Many(runs) => runs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Run> for RunPayload {
    fn from(run: Run) -> Self {
        RunPayload::One(run)
    }
}

impl From<Vec<Run>> for RunPayload {
    fn from(runs: Vec<Run>) -> Self {
        RunPayload::Many(runs)
    }
}

/// Service identity returned by `/version`. Only produced by decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
}

/// Request payload for endpoints that send no body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoData;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_run() -> Run {
        Run {
            score: 0.87,
            status_code: StatusCode::Success,
            error_message: None,
            browser_name: "firefox".to_string(),
            browser_version: "128.0".to_string(),
            plugin_name: "contrast".to_string(),
            plugin_version: "1.2.0".to_string(),
            extension_version: "0.4.1".to_string(),
            url: "https://example.org".to_string(),
            path: "/index.html".to_string(),
        }
    }

    #[test]
    fn status_codes_match_wire_values() {
        let codes: Vec<i64> = StatusCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![0, 1100, 1101, 1102, 1200, 2000, 2001, 9999, 10000]);
    }

    #[test]
    fn status_code_try_from_rejects_unknown() {
        assert_eq!(StatusCode::try_from(1101), Ok(StatusCode::NoDom));
        assert_eq!(StatusCode::try_from(999_999), Err(UnknownStatusCode(999_999)));
        assert_eq!(StatusCode::try_from(-1), Err(UnknownStatusCode(-1)));
    }

    #[test]
    fn status_code_serializes_as_integer() {
        let json = serde_json::to_value(StatusCode::AnalysisTimeout).unwrap();
        assert_eq!(json, serde_json::json!(2001));
        let err = serde_json::from_str::<StatusCode>("42");
        assert!(err.is_err());
    }

    #[test]
    fn run_serializes_camel_case_without_absent_message() {
        let json = serde_json::to_value(sample_run()).unwrap();
        assert_eq!(json["statusCode"], 0);
        assert_eq!(json["browserName"], "firefox");
        assert_eq!(json["extensionVersion"], "0.4.1");
        assert!(json.get("errorMessage").is_none());
    }

    #[test]
    fn payload_is_untagged() {
        let one = serde_json::to_value(RunPayload::from(sample_run())).unwrap();
        assert!(one.is_object());
        let many = serde_json::to_value(RunPayload::from(vec![sample_run()])).unwrap();
        assert_eq!(many.as_array().map(Vec::len), Some(1));
        assert_eq!(many[0], one);
    }

    #[test]
    fn payload_len() {
        assert_eq!(RunPayload::from(sample_run()).len(), 1);
        assert!(RunPayload::Many(Vec::new()).is_empty());
    }
}
