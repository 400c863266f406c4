//! REST API connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the childcare REST API lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (0 = wait indefinitely).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// The request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}
