//! Client configuration.

use serde::Deserialize;

/// Settings for a [`LogClient`](crate::client::LogClient).
///
/// Deserializable so hosts can embed it in their own config files:
///
/// ```
/// let config = runlog_core::ClientConfig::from_json(r#"{"domain": "logs.local:8080"}"#).unwrap();
/// assert!(config.validate_outbound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Host (optionally with port and scheme) of the log service.
    pub domain: String,
    /// Validate run payloads before sending them.
    #[serde(default = "default_validate_outbound")]
    pub validate_outbound: bool,
}

fn default_validate_outbound() -> bool {
    true
}

impl ClientConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            validate_outbound: default_validate_outbound(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
