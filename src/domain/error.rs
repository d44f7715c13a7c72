use std::io;

use thiserror::Error;

use super::phid::PhidKind;

/// Library-wide error type for phorge-flow operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A comma-separated PHID field contained a token of the wrong shape.
    #[error(
        "PHIDs must be a comma-separated list of valid {kind} PHIDs, e.g., {} (got '{value}')",
        .kind.example()
    )]
    InvalidPhid { kind: PhidKind, value: String },

    /// A field required by the operation was not supplied.
    #[error("{0}")]
    MissingField(String),

    /// A numeric field could not be parsed.
    #[error("Field '{field}' expects an integer, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// An object identifier is neither a numeric ID nor a PHID.
    #[error("Invalid object identifier '{0}': expected a numeric ID (123) or a PHID (PHID-TASK-xxxxxx)")]
    InvalidIdentifier(String),

    /// A field only accepts a fixed set of values.
    #[error("Invalid value '{value}' for '{field}': must be one of {expected}")]
    InvalidOption { field: String, value: String, expected: String },

    /// Attachment name not offered by the resource.
    #[error("Unknown {resource} attachment '{name}'. Available: {available}")]
    InvalidAttachment { resource: String, name: String, available: String },

    /// Client or credential construction failed.
    #[error("Failed to connect to Phorge Server ({resource}): {message}")]
    Connection { resource: String, message: String },

    /// A remote call failed; `context` names the operation ("Error fetching tasks").
    #[error("{context}: {message}")]
    Operation { context: String, message: String },

    /// Raw failure reported by the Conduit endpoint or the HTTP transport.
    #[error("{message}")]
    ConduitApi { message: String, code: Option<String>, status: Option<u16> },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Wrap a failure of a remote call with an operation-specific prefix.
    ///
    /// Validation errors raised before the call are returned unchanged so the
    /// caller still sees the expected-format message.
    pub fn operation(context: &str, error: AppError) -> Self {
        if error.is_user_input() {
            return error;
        }
        let message = match error {
            AppError::ConduitApi { message, .. } => message,
            AppError::Operation { message, .. } => message,
            other => other.to_string(),
        };
        AppError::Operation { context: context.to_string(), message }
    }

    /// True for errors caused by the values a user supplied rather than by the
    /// remote system or the environment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            AppError::InvalidPhid { .. }
                | AppError::MissingField(_)
                | AppError::InvalidNumber { .. }
                | AppError::InvalidIdentifier(_)
                | AppError::InvalidOption { .. }
                | AppError::InvalidAttachment { .. }
        )
    }
}
