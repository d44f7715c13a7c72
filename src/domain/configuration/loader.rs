//! Configuration loading.

use std::path::Path;

use url::Url;

use super::conduit_config::{ConduitConfig, ConduitConfigFile, default_timeout};
use crate::domain::AppError;

pub const HOST_ENV: &str = "PHORGE_HOST";
pub const TOKEN_ENV: &str = "PHORGE_API_TOKEN";

/// Load configuration from an optional TOML file, then let `PHORGE_HOST` and
/// `PHORGE_API_TOKEN` override it.
pub fn load_config(path: Option<&Path>) -> Result<ConduitConfig, AppError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(parse_config_content(&std::fs::read_to_string(path)?)?)
        }
        None => None,
    };
    resolve_config(file, |name| std::env::var(name).ok())
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ConduitConfigFile, AppError> {
    Ok(toml::from_str(content)?)
}

/// Merge file values with environment lookups and validate the result.
pub fn resolve_config(
    file: Option<ConduitConfigFile>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConduitConfig, AppError> {
    let file = file.unwrap_or_default();

    let host = match env(HOST_ENV).filter(|v| !v.trim().is_empty()) {
        Some(raw) => Url::parse(raw.trim()).map_err(|e| {
            AppError::config_error(format!("{} is not a valid URL: {}", HOST_ENV, e))
        })?,
        None => file.host.ok_or_else(|| {
            AppError::config_error(format!(
                "Phorge host is not configured. Set {} or `host` in the config file.",
                HOST_ENV
            ))
        })?,
    };

    let token = env(TOKEN_ENV).filter(|v| !v.trim().is_empty()).or(file.token).ok_or_else(|| {
        AppError::config_error(format!(
            "Conduit API token is not configured. Set {} or `token` in the config file.",
            TOKEN_ENV
        ))
    })?;

    let config = ConduitConfig {
        host,
        token,
        timeout_secs: file.timeout_secs.unwrap_or_else(default_timeout),
    };
    config.validate()?;
    Ok(config)
}
