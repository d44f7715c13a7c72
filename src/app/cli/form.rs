//! `--form <json>` loading shared by every command.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::AppError;

/// Read a form from a JSON file using the camelCase field names, or start
/// from an empty form.
pub fn load_form<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, AppError> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::config_error(format!("Failed to read form file {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Overwrite `slot` when a flag was given.
pub fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
