//! HTTP requests and responses as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and decodes `HttpResponse` values
//! without touching the network; a [`Transport`](crate::transport::Transport)
//! performs the actual round-trip. This keeps building and decoding
//! deterministic and testable without a server.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `LogClient::build`. `url` is absolute: the client's base URL
/// joined with the endpoint path.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status`, e.g. `Not Found`.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with the canonical reason phrase for `status` and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Canonical reason phrase for `status`, or `""` when it has none.
pub fn reason_phrase(status: u16) -> &'static str {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn new_fills_reason_phrase() {
        assert_eq!(HttpResponse::new(404, "").status_text, "Not Found");
        assert_eq!(HttpResponse::new(422, "").status_text, "Unprocessable Entity");
        assert_eq!(HttpResponse::new(599, "").status_text, "");
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
