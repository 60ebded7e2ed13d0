//! Endpoint registry.
//!
//! # Design
//! Transport settings for every endpoint live in one static table indexed by
//! [`EndpointId`]. The [`Endpoint`] trait pins each endpoint to its request
//! and response types, so `LogClient::call(Log, ..)` only accepts run
//! payloads and `LogClient::call(GetVersion, ..)` only accepts [`NoData`].
//! A mismatched pair does not compile.

use serde_json::Value;

use crate::error::{ApiError, ValidationError};
use crate::http::{HttpMethod, HttpResponse};
use crate::types::{NoData, RunPayload, Version};
use crate::validate::{validate_run_payload, validate_version};

/// Identifier of a registered endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointId {
    Log,
    Version,
}

/// Method, path and headers for one endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub id: EndpointId,
    pub path: &'static str,
    pub method: HttpMethod,
    pub headers: &'static [(&'static str, &'static str)],
}

impl EndpointDescriptor {
    pub fn owned_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

static REGISTRY: [EndpointDescriptor; 2] = [
    EndpointDescriptor {
        id: EndpointId::Log,
        path: "/log",
        method: HttpMethod::Post,
        headers: &[("Content-Type", "application/json")],
    },
    EndpointDescriptor {
        id: EndpointId::Version,
        path: "/version",
        method: HttpMethod::Get,
        headers: &[],
    },
];

impl EndpointId {
    pub const ALL: [EndpointId; 2] = [EndpointId::Log, EndpointId::Version];

    pub fn descriptor(self) -> &'static EndpointDescriptor {
        match self {
            EndpointId::Log => &REGISTRY[0],
            EndpointId::Version => &REGISTRY[1],
        }
    }

    pub fn path(self) -> &'static str {
        self.descriptor().path
    }

    pub fn from_path(path: &str) -> Option<Self> {
        REGISTRY.iter().find(|d| d.path == path).map(|d| d.id)
    }
}

/// An endpoint with its request payload and decoded response types.
pub trait Endpoint {
    type Request;
    type Response;

    const ID: EndpointId;

    fn descriptor() -> &'static EndpointDescriptor {
        Self::ID.descriptor()
    }

    /// Serialize `payload` as the request body; `None` sends no body.
    fn encode(payload: &Self::Request) -> Result<Option<Value>, serde_json::Error>;

    /// Schema check applied to an encoded body before it is sent.
    fn validate(_body: &Value) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Turn a 2xx response into the endpoint's result.
    fn decode(response: &HttpResponse) -> Result<Self::Response, ApiError>;
}

/// `POST /log`: report one run or a batch of runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log;

impl Endpoint for Log {
    type Request = RunPayload;
    type Response = ();

    const ID: EndpointId = EndpointId::Log;

    fn encode(payload: &RunPayload) -> Result<Option<Value>, serde_json::Error> {
        serde_json::to_value(payload).map(Some)
    }

    fn validate(body: &Value) -> Result<(), ValidationError> {
        validate_run_payload(body).map(|_| ())
    }

    // The body is never read.
    fn decode(_response: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

/// `GET /version`: the service's reported version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetVersion;

impl Endpoint for GetVersion {
    type Request = NoData;
    type Response = Version;

    const ID: EndpointId = EndpointId::Version;

    fn encode(_payload: &NoData) -> Result<Option<Value>, serde_json::Error> {
        Ok(None)
    }

    fn decode(response: &HttpResponse) -> Result<Version, ApiError> {
        let path = Self::ID.path();
        let value: Value = serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
            path,
            message: e.to_string(),
        })?;
        validate_version(&value).map_err(|source| ApiError::Validation { path, source })
    }
}
