//! VVM backend configuration

use serde::{Deserialize, Serialize};

/// Configuration for the VVM departure-monitor backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VvmConfig {
    /// Base URL the `XML_*_REQUEST` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://mobile.defas-fgi.de/vvmapp".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for VvmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VvmConfig {
    /// Create a configuration pointing at a different server (e.g. a mock)
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
        }
    }

    /// Full URL of an endpoint below the base URL
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
