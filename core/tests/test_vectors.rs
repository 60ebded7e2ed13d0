//! Verify build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes the expected request for one endpoint, then a
//! list of cases with simulated responses and expected results or errors.
//! Bodies are compared as decoded values, not raw strings, so field order
//! and number formatting do not matter.

use runlog_core::{
    validate_run_payload, ApiError, GetVersion, HttpMethod, HttpResponse, Log, LogClient, NoData, RunPayload, Version,
};
use serde_json::Value;

const DOMAIN: &str = "localhost:3000";

fn client() -> LogClient {
    LogClient::new(DOMAIN)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn expected_headers(expected_req: &Value) -> Vec<(String, String)> {
    expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(sim["status"].as_u64().unwrap() as u16, sim["body"].as_str().unwrap())
}

fn assert_error_kind(name: &str, err: &ApiError, expected: &str) {
    let matched = match expected {
        "Network" => matches!(err, ApiError::Network { .. }),
        "Decode" => matches!(err, ApiError::Decode { .. }),
        "Validation" => matches!(err, ApiError::Validation { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

#[test]
fn version_test_vectors() {
    let raw = include_str!("../../test-vectors/version.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let expected_req = &vectors["expected_request"];

    let c = client();
    let req = c.build::<GetVersion>(&NoData).unwrap();
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()));
    assert_eq!(req.url, format!("http://{DOMAIN}{}", expected_req["path"].as_str().unwrap()));
    assert_eq!(req.headers, expected_headers(expected_req));
    assert!(req.body.is_none());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = c.parse::<GetVersion>(simulated_response(case));

        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Version = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

#[test]
fn log_test_vectors() {
    let raw = include_str!("../../test-vectors/log.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let expected_req = &vectors["expected_request"];

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = validate_run_payload(&case["input"]).unwrap_or_else(|e| panic!("{name}: {e}"));

        // Verify build
        let req = c.build::<Log>(&input).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.url,
            format!("http://{DOMAIN}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");

        let sent: RunPayload = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        let expected: RunPayload = serde_json::from_value(case["input"].clone()).unwrap();
        assert_eq!(sent, expected, "{name}: body");
        assert_eq!(sent.len(), expected.len(), "{name}: run count");

        // Verify parse
        let result = c.parse::<Log>(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
