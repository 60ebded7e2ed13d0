//! Validated client for the run log service.
//!
//! # Overview
//! Reports plugin runs to `POST /log` and reads the service version from
//! `GET /version`. Only payloads that pass schema validation cross the
//! network boundary in either direction.
//!
//! # Design
//! - `types` defines the wire entities; `StatusCode` is a closed enum.
//! - `validate` checks untyped JSON against those entities with field-level
//!   errors.
//! - `endpoint` is the static registry: each endpoint marker type pins its
//!   method, headers, request type and response decoder.
//! - `client` dispatches one typed call per invocation through a
//!   `transport`, split into `build` and `parse` so the I/O boundary stays
//!   explicit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::LogClient;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EndpointDescriptor, EndpointId, GetVersion, Log};
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{NoData, Run, RunPayload, StatusCode, UnknownStatusCode, Version};
pub use validate::{validate_run, validate_run_payload, validate_status_code, validate_version};
