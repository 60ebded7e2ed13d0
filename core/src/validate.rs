//! Schema validation for untyped JSON values.
//!
//! # Design
//! Validators walk a `serde_json::Value` field by field instead of relying on
//! serde's derive, so a failure names the offending field and the JSON type
//! that was found there. They are pure and total: no I/O, same answer for
//! the same input. Unknown fields are ignored.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{Run, RunPayload, StatusCode, Version};

/// Check that `value` is a known status code.
pub fn validate_status_code(value: &Value) -> Result<StatusCode, ValidationError> {
    let code = value
        .as_i64()
        .ok_or_else(|| ValidationError::new("", "an integer status code", describe(value)))?;
    StatusCode::try_from(code).map_err(|_| ValidationError::new("", "a known status code", code.to_string()))
}

/// Check that `value` is a JSON object shaped like a [`Run`].
pub fn validate_run(value: &Value) -> Result<Run, ValidationError> {
    let obj = as_object(value)?;

    let score = match obj.get("score") {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|s| s.is_finite())
            .ok_or_else(|| ValidationError::new("score", "a finite number", n.to_string()))?,
        other => return Err(ValidationError::new("score", "a number", describe_field(other))),
    };

    let status_code = match obj.get("statusCode") {
        Some(v) => validate_status_code(v).map_err(|e| e.within("statusCode"))?,
        None => return Err(ValidationError::new("statusCode", "a status code", "nothing")),
    };

    let error_message = match obj.get("errorMessage") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(ValidationError::new("errorMessage", "a string", describe(other))),
    };

    Ok(Run {
        score,
        status_code,
        error_message,
        browser_name: require_string(obj, "browserName")?,
        browser_version: require_string(obj, "browserVersion")?,
        plugin_name: require_string(obj, "pluginName")?,
        plugin_version: require_string(obj, "pluginVersion")?,
        extension_version: require_string(obj, "extensionVersion")?,
        url: require_string(obj, "url")?,
        path: require_string(obj, "path")?,
    })
}

/// Check a `/log` body: either one run object or an array of run objects.
pub fn validate_run_payload(value: &Value) -> Result<RunPayload, ValidationError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_run(item).map_err(|e| e.within(&format!("[{i}]"))))
            .collect::<Result<Vec<_>, _>>()
            .map(RunPayload::Many),
        Value::Object(_) => validate_run(value).map(RunPayload::One),
        other => Err(ValidationError::new("", "a run object or an array of runs", describe(other))),
    }
}

/// Check that `value` is a JSON object with a string `version` field.
pub fn validate_version(value: &Value) -> Result<Version, ValidationError> {
    let obj = as_object(value)?;
    Ok(Version {
        version: require_string(obj, "version")?,
    })
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new("", "an object", describe(value)))
}

fn require_string(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(ValidationError::new(field, "a string", describe_field(other))),
    }
}

fn describe_field(value: Option<&Value>) -> String {
    value.map_or_else(|| "nothing".to_string(), describe)
}

/// Short name of a JSON value's type, with the value for scalars.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
