//! Executes an [`HttpRequest`] and hands back the [`HttpResponse`].
//!
//! # Design
//! A transport reports every HTTP status as data. Interpreting the status is
//! the client's job; only failures below HTTP (DNS, connect, I/O) become
//! `ApiError::Transport`. The default `UreqTransport` runs ureq's blocking
//! call on tokio's blocking pool, so it needs a tokio runtime.

use std::future::Future;

use tracing::warn;

use crate::error::ApiError;
use crate::http::{reason_phrase, HttpMethod, HttpRequest, HttpResponse};

/// One HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a preconfigured agent. It must be built with
    /// `http_status_as_error(false)` or non-2xx responses surface as
    /// transport errors instead of `ApiError::Network`.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?
        }
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match &request.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    // Invalid UTF-8 is replaced; an unreadable body is passed on empty.
    let body = match response.body_mut().read_to_vec() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "could not read response body");
            String::new()
        }
    };

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: reason_phrase(status.as_u16()).to_string(),
        headers,
        body,
    })
}
