//! Conduit API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::form_encoding::encode_params;
use crate::domain::{
    AppError, ConduitConfig, ConduitObject, EditResult, ObjectIdentifier, ProjectConstraints,
    TaskConstraints, Transaction, UserConstraints,
};
use crate::ports::{ConduitClient, SearchRequest};

const TOKEN_PARAM: &str = "api.token";
const DEFAULT_STATUS_MESSAGE: &str = "Conduit request failed";

/// HTTP transport for the Conduit API.
///
/// Every call is a form-encoded `POST <host>/api/<method>` carrying the API
/// token in the body.
#[derive(Clone)]
pub struct HttpConduitClient {
    config: ConduitConfig,
    client: Client,
}

impl std::fmt::Debug for HttpConduitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConduitClient")
            .field("host", &self.config.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpConduitClient {
    pub fn new(config: &ConduitConfig) -> Result<Self, AppError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Connection {
                resource: config.host.to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { config: config.clone(), client })
    }

    /// Invoke a Conduit method and decode its `result`.
    pub fn call<P, R>(&self, method: &str, params: &P) -> Result<R, AppError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let url = self.config.method_url(method)?;
        let mut form = vec![(TOKEN_PARAM.to_string(), self.config.token.clone())];
        form.extend(encode_params(&serde_json::to_value(params)?));

        debug!(method, fields = form.len() - 1, "calling conduit");

        let response = self.client.post(url).form(&form).send().map_err(|e| {
            AppError::ConduitApi {
                message: format!("HTTP request failed: {}", e),
                code: None,
                status: None,
            }
        })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();
        debug!(method, status = status.as_u16(), "conduit responded");

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if !body_text.trim().is_empty() {
                    body_text.clone()
                } else if status.is_server_error() {
                    "Server error".to_string()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            return Err(AppError::ConduitApi { message, code: None, status: Some(status.as_u16()) });
        }

        let envelope: Envelope<R> =
            serde_json::from_str(&body_text).map_err(|e| AppError::ConduitApi {
                message: format!("Failed to parse response: {}", e),
                code: None,
                status: Some(status.as_u16()),
            })?;

        if let Some(code) = envelope.error_code {
            let info = envelope.error_info.unwrap_or_default();
            return Err(AppError::ConduitApi {
                message: format!("{}: {}", code, info),
                code: Some(code),
                status: Some(status.as_u16()),
            });
        }

        envelope.result.ok_or_else(|| AppError::ConduitApi {
            message: format!("No result in {} response", method),
            code: None,
            status: Some(status.as_u16()),
        })
    }

    /// Run a `*.search` call, following `cursor.after` until the last page.
    ///
    /// A request with an explicit `limit` reads only the first page.
    fn search<C: Serialize>(
        &self,
        method: &str,
        request: &SearchRequest<C>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        let mut objects = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let page: SearchPage =
                self.call(method, &PageParams { request, after: after.as_deref() })?;
            objects.extend(page.data);

            if request.limit.is_some() {
                return Ok(objects);
            }
            match page.cursor.next() {
                Some(next) if after.as_deref() != Some(next.as_str()) => {
                    debug!(method, after = %next, fetched = objects.len(), "fetching next page");
                    after = Some(next);
                }
                _ => return Ok(objects),
            }
        }
    }

    fn edit(
        &self,
        identifier: Option<&ObjectIdentifier>,
        transactions: &[Transaction],
    ) -> Result<EditResult, AppError> {
        self.call("maniphest.edit", &EditParams { transactions, object_identifier: identifier })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<R> {
    result: Option<R>,
    error_code: Option<String>,
    error_info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<ConduitObject>,
    #[serde(default)]
    cursor: Cursor,
}

#[derive(Debug, Default, Deserialize)]
struct Cursor {
    #[serde(default)]
    after: Option<Value>,
}

impl Cursor {
    /// Token for the next page, if the server reported one.
    fn next(&self) -> Option<String> {
        match self.after.as_ref()? {
            Value::String(token) if !token.is_empty() => Some(token.clone()),
            Value::Number(token) => Some(token.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PageParams<'a, C> {
    #[serde(flatten)]
    request: &'a SearchRequest<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditParams<'a> {
    transactions: &'a [Transaction],
    #[serde(skip_serializing_if = "Option::is_none")]
    object_identifier: Option<&'a ObjectIdentifier>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;
    parsed.get("error_info").and_then(Value::as_str).map(ToOwned::to_owned)
}

impl ConduitClient for HttpConduitClient {
    fn search_tasks(
        &self,
        request: &SearchRequest<TaskConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.search("maniphest.search", request)
    }

    fn create_task(&self, transactions: &[Transaction]) -> Result<EditResult, AppError> {
        self.edit(None, transactions)
    }

    fn update_task(
        &self,
        identifier: &ObjectIdentifier,
        transactions: &[Transaction],
    ) -> Result<EditResult, AppError> {
        self.edit(Some(identifier), transactions)
    }

    fn search_projects(
        &self,
        request: &SearchRequest<ProjectConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.search("project.search", request)
    }

    fn search_users(
        &self,
        request: &SearchRequest<UserConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.search("user.search", request)
    }

    fn whoami(&self) -> Result<Value, AppError> {
        self.call("user.whoami", &serde_json::Map::new())
    }
}
