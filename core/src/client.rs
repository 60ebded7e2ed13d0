//! Typed dispatcher for the run log API.
//!
//! # Design
//! `LogClient` holds the base URL, the outbound-validation flag and a
//! transport, none of which change after construction, so one client can
//! serve concurrent calls without locking. A call is split into `build`
//! (payload to `HttpRequest`) and `parse` (`HttpResponse` to result); `call`
//! glues them around exactly one `Transport::execute`. Nothing is retried.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, GetVersion, Log};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NoData, Run, Version};

/// Client for the run log service.
#[derive(Debug, Clone)]
pub struct LogClient<T = UreqTransport> {
    base_url: String,
    validate_outbound: bool,
    transport: T,
}

impl LogClient<UreqTransport> {
    /// Client for `domain` over plain HTTP unless `domain` names a scheme.
    pub fn new(domain: &str) -> Self {
        Self::with_transport(domain, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.domain).validate_outbound(config.validate_outbound)
    }
}

impl<T> LogClient<T> {
    pub fn with_transport(domain: &str, transport: T) -> Self {
        Self {
            base_url: normalize_base_url(domain),
            validate_outbound: true,
            transport,
        }
    }

    /// Turn schema validation of outgoing run payloads on or off.
    pub fn validate_outbound(mut self, enabled: bool) -> Self {
        self.validate_outbound = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for endpoint `E` without sending it.
    pub fn build<E: Endpoint>(&self, payload: &E::Request) -> Result<HttpRequest, ApiError> {
        let descriptor = E::descriptor();
        let body = E::encode(payload)?;
        if self.validate_outbound {
            if let Some(body) = &body {
                E::validate(body).map_err(|source| ApiError::Validation {
                    path: descriptor.path,
                    source,
                })?;
            }
        }
        Ok(HttpRequest {
            method: descriptor.method,
            url: format!("{}{}", self.base_url, descriptor.path),
            headers: descriptor.owned_headers(),
            body: body.map(|b| b.to_string()),
        })
    }

    /// Decode a response for endpoint `E`. Non-2xx responses are rejected
    /// before the endpoint's decoder runs.
    pub fn parse<E: Endpoint>(&self, response: HttpResponse) -> Result<E::Response, ApiError> {
        check_status::<E>(&response)?;
        E::decode(&response).inspect_err(|e| warn!(path = E::ID.path(), error = %e, "response rejected"))
    }
}

impl<T: Transport> LogClient<T> {
    /// Perform one request/response cycle against endpoint `E`.
    ///
    /// ```no_run
    /// use runlog_core::{GetVersion, LogClient, NoData};
    ///
    /// # async fn demo() -> Result<(), runlog_core::ApiError> {
    /// let client = LogClient::new("localhost:3000");
    /// let version = client.call(GetVersion, NoData).await?;
    /// println!("{}", version.version);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// The payload type is fixed by the endpoint:
    ///
    /// ```compile_fail
    /// use runlog_core::{GetVersion, LogClient, Run};
    ///
    /// async fn demo(client: LogClient, run: Run) {
    ///     let _ = client.call(GetVersion, run).await;
    /// }
    /// ```
    pub async fn call<E: Endpoint>(
        &self,
        _endpoint: E,
        payload: impl Into<E::Request>,
    ) -> Result<E::Response, ApiError> {
        let request = self.build::<E>(&payload.into())?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, path = E::ID.path(), "received response");
        self.parse::<E>(response)
    }

    /// Report a single run.
    pub async fn log_run(&self, run: Run) -> Result<(), ApiError> {
        self.call(Log, run).await
    }

    /// Report a batch of runs in one request.
    pub async fn log_runs(&self, runs: Vec<Run>) -> Result<(), ApiError> {
        self.call(Log, runs).await
    }

    pub async fn version(&self) -> Result<Version, ApiError> {
        self.call(GetVersion, NoData).await
    }
}

/// Map a non-2xx status to `ApiError::Network`.
fn check_status<E: Endpoint>(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let path = E::ID.path();
    warn!(path, status = response.status, status_text = %response.status_text, "request failed");
    Err(ApiError::Network {
        path,
        status: response.status,
        status_text: response.status_text.clone(),
    })
}

fn normalize_base_url(domain: &str) -> String {
    let trimmed = domain.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
