//! Conduit connection configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Contents of a `phorge.toml` configuration file. Every field is optional
/// so the environment can fill in what the file leaves out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConduitConfigFile {
    /// Base URL of the Phorge install, e.g. `https://phorge.example.com`.
    pub host: Option<Url>,
    /// Conduit API token (`api-xxxxxx`).
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Validated credentials and transport settings.
#[derive(Clone)]
pub struct ConduitConfig {
    pub host: Url,
    pub token: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ConduitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConduitConfig")
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConduitConfig {
    pub fn new(host: Url, token: impl Into<String>) -> Self {
        Self { host, token: token.into(), timeout_secs: default_timeout() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !matches!(self.host.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "host must be an http(s) URL, got '{}'",
                self.host
            )));
        }
        if self.token.trim().is_empty() {
            return Err(AppError::config_error("token must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// URL of a Conduit method, e.g. `<host>/api/maniphest.search`.
    pub fn method_url(&self, method: &str) -> Result<Url, AppError> {
        let base = self.host.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/api/{}", base, method))
            .map_err(|e| AppError::config_error(format!("Invalid Conduit URL: {}", e)))
    }
}

pub(crate) fn default_timeout() -> u64 {
    30
}
