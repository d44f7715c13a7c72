//! Conduit API client port definition.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    AppError, AttachmentFlags, ConduitObject, EditResult, FilterSpec, ObjectIdentifier,
    ProjectConstraints, TaskConstraints, Transaction, UserConstraints,
};

/// Parameters of a `*.search` call.
///
/// Empty constraints and empty attachment selections are omitted rather than
/// sent as empty objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest<C> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<AttachmentFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl<C: FilterSpec> SearchRequest<C> {
    pub fn new(constraints: C, attachments: Option<AttachmentFlags>) -> Self {
        Self { constraints: constraints.into_option(), attachments, limit: None }
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }
}

impl<C> Default for SearchRequest<C> {
    fn default() -> Self {
        Self { constraints: None, attachments: None, limit: None }
    }
}

/// Port for Conduit API operations.
///
/// Searches without a `limit` return every page of results; all other
/// methods perform exactly one remote call.
pub trait ConduitClient {
    /// `maniphest.search`
    fn search_tasks(
        &self,
        request: &SearchRequest<TaskConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError>;

    /// `maniphest.edit` without an object identifier.
    fn create_task(&self, transactions: &[Transaction]) -> Result<EditResult, AppError>;

    /// `maniphest.edit` against an existing task.
    fn update_task(
        &self,
        identifier: &ObjectIdentifier,
        transactions: &[Transaction],
    ) -> Result<EditResult, AppError>;

    /// `project.search`
    fn search_projects(
        &self,
        request: &SearchRequest<ProjectConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError>;

    /// `user.search`
    fn search_users(
        &self,
        request: &SearchRequest<UserConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError>;

    /// `user.whoami`, used as a credential liveness check.
    fn whoami(&self) -> Result<Value, AppError>;
}
