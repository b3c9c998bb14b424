//! HTTP client configuration.

use serde::Deserialize;

/// Configuration for the camera HTTP client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds. `None` keeps the client default,
    /// which never times out.
    pub timeout_secs: Option<u64>,
}
