use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::domain::record::{EditedObject, TransactionRef};
use crate::domain::{
    AppError, ConduitObject, EditResult, ObjectIdentifier, ProjectConstraints, TaskConstraints,
    Transaction, UserConstraints,
};
use crate::ports::{ConduitClient, SearchRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    SearchTasks(SearchRequest<TaskConstraints>),
    CreateTask(Vec<Transaction>),
    UpdateTask(ObjectIdentifier, Vec<Transaction>),
    SearchProjects(SearchRequest<ProjectConstraints>),
    SearchUsers(SearchRequest<UserConstraints>),
    WhoAmI,
}

/// In-memory Conduit client returning canned objects and recording every call.
#[derive(Clone, Default)]
pub struct FakeConduitClient {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    failure: Arc<Mutex<Option<String>>>,
    tasks: Vec<ConduitObject>,
    projects: Vec<ConduitObject>,
    users: Vec<ConduitObject>,
}

impl FakeConduitClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(mut self, tasks: Vec<ConduitObject>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_projects(mut self, projects: Vec<ConduitObject>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_users(mut self, users: Vec<ConduitObject>) -> Self {
        self.users = users;
        self
    }

    /// Make every subsequent call fail with `message`; `None` restores success.
    pub fn fail_with(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => {
                Err(AppError::ConduitApi { message: message.clone(), code: None, status: None })
            }
            None => Ok(()),
        }
    }

    fn edit_result(id: u64, transactions: &[Transaction]) -> EditResult {
        EditResult {
            object: EditedObject { id, phid: format!("PHID-TASK-fake{}", id) },
            transactions: (0..transactions.len())
                .map(|n| TransactionRef { phid: format!("PHID-XACT-TASK-fake{}", n) })
                .collect(),
        }
    }
}

impl ConduitClient for FakeConduitClient {
    fn search_tasks(
        &self,
        request: &SearchRequest<TaskConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.record(RecordedCall::SearchTasks(request.clone()))?;
        Ok(self.tasks.clone())
    }

    fn create_task(&self, transactions: &[Transaction]) -> Result<EditResult, AppError> {
        self.record(RecordedCall::CreateTask(transactions.to_vec()))?;
        Ok(Self::edit_result(100, transactions))
    }

    fn update_task(
        &self,
        identifier: &ObjectIdentifier,
        transactions: &[Transaction],
    ) -> Result<EditResult, AppError> {
        self.record(RecordedCall::UpdateTask(identifier.clone(), transactions.to_vec()))?;
        let id = match identifier {
            ObjectIdentifier::Id(id) => *id,
            ObjectIdentifier::Phid(_) => 1,
        };
        Ok(Self::edit_result(id, transactions))
    }

    fn search_projects(
        &self,
        request: &SearchRequest<ProjectConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.record(RecordedCall::SearchProjects(request.clone()))?;
        Ok(self.projects.clone())
    }

    fn search_users(
        &self,
        request: &SearchRequest<UserConstraints>,
    ) -> Result<Vec<ConduitObject>, AppError> {
        self.record(RecordedCall::SearchUsers(request.clone()))?;
        Ok(self.users.clone())
    }

    fn whoami(&self) -> Result<Value, AppError> {
        self.record(RecordedCall::WhoAmI)?;
        Ok(json!({ "phid": "PHID-USER-fake", "userName": "fake" }))
    }
}

/// A search result entry with a `name` field.
pub fn conduit_object(kind: &str, id: u64, name: &str) -> ConduitObject {
    ConduitObject {
        id,
        object_type: kind.to_string(),
        phid: format!("PHID-{}-obj{}", kind, id),
        fields: json!({ "name": name }),
        attachments: json!({}),
    }
}
