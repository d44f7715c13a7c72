//! Action dispatch: build the request, make one remote call, map the result.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::project_options::{ProjectOption, ProjectOptionCache, RefreshPolicy};
use crate::adapters::HttpConduitClient;
use crate::domain::{
    AppError, ConduitConfig, ObjectIdentifier, PhidKind, ProjectAttachment, ProjectSearchForm,
    Record, TaskAttachment, TaskMutation, TaskMutationForm, TaskSearchForm, UserAttachment,
    UserSearchForm, attachment_flags,
};
use crate::ports::{ConduitClient, SearchRequest};

/// One user-triggered operation against the remote API.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SearchTasks { form: TaskSearchForm, attachments: Vec<String>, limit: Option<u32> },
    SearchProjects { form: ProjectSearchForm, attachments: Vec<String>, limit: Option<u32> },
    SearchUsers { form: UserSearchForm, attachments: Vec<String>, limit: Option<u32> },
    CreateTask(TaskMutationForm),
    EditTask { identifier: String, form: TaskMutationForm },
    CommentTask { identifier: String, comment: String },
}

impl Action {
    /// Prefix used when the remote call fails.
    pub fn error_context(&self) -> &'static str {
        match self {
            Action::SearchTasks { .. } => "Error fetching tasks",
            Action::SearchProjects { .. } => "Error fetching projects",
            Action::SearchUsers { .. } => "Error fetching users",
            Action::CreateTask(_) => "Error creating task",
            Action::EditTask { .. } => "Error updating task",
            Action::CommentTask { .. } => "Error commenting on task",
        }
    }
}

pub struct Dispatcher<C: ConduitClient> {
    client: C,
    resource: String,
    project_options: ProjectOptionCache,
}

impl<C: ConduitClient> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            resource: "Conduit".to_string(),
            project_options: ProjectOptionCache::default(),
        }
    }

    /// Name of the server used in connection errors.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.project_options = ProjectOptionCache::new(policy);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run an action and return one record per result.
    ///
    /// Input errors surface unchanged; remote failures are prefixed with the
    /// action's error context.
    pub fn execute(&self, action: Action) -> Result<Vec<Record>, AppError> {
        let context = action.error_context();
        self.run(action).map_err(|err| AppError::operation(context, err))
    }

    fn run(&self, action: Action) -> Result<Vec<Record>, AppError> {
        match action {
            Action::SearchTasks { form, attachments, limit } => {
                let request = SearchRequest::new(
                    form.build_constraints()?,
                    attachment_flags::<TaskAttachment>(&attachments)?,
                )
                .with_limit(limit);
                debug!(?request, "searching tasks");
                let tasks = self.client.search_tasks(&request)?;
                info!(count = tasks.len(), "fetched tasks");
                to_records(&tasks)
            }
            Action::SearchProjects { form, attachments, limit } => {
                let request = SearchRequest::new(
                    form.build_constraints()?,
                    attachment_flags::<ProjectAttachment>(&attachments)?,
                )
                .with_limit(limit);
                debug!(?request, "searching projects");
                to_records(&self.client.search_projects(&request)?)
            }
            Action::SearchUsers { form, attachments, limit } => {
                let request = SearchRequest::new(
                    form.build_constraints()?,
                    attachment_flags::<UserAttachment>(&attachments)?,
                )
                .with_limit(limit);
                debug!(?request, "searching users");
                to_records(&self.client.search_users(&request)?)
            }
            Action::CreateTask(form) => {
                let transactions = TaskMutation::for_create(&form)?.to_transactions();
                debug!(count = transactions.len(), "creating task");
                let created = self.client.create_task(&transactions)?;
                info!(id = created.object.id, "created task");
                to_records(&[created])
            }
            Action::EditTask { identifier, form } => {
                let identifier = task_identifier(&identifier)?;
                let transactions = TaskMutation::for_edit(&form)?.to_transactions();
                debug!(%identifier, count = transactions.len(), "updating task");
                to_records(&[self.client.update_task(&identifier, &transactions)?])
            }
            Action::CommentTask { identifier, comment } => {
                let identifier = task_identifier(&identifier)?;
                let transactions = TaskMutation::comment(&comment)?.to_transactions();
                debug!(%identifier, "commenting on task");
                to_records(&[self.client.update_task(&identifier, &transactions)?])
            }
        }
    }

    /// Call `user.whoami` to confirm the credentials are accepted.
    pub fn verify_credentials(&self) -> Result<Record, AppError> {
        self.client.whoami().map_err(|err| AppError::Connection {
            resource: self.resource.clone(),
            message: err.to_string(),
        })
    }

    /// All projects as picker options, minus the PHIDs already `selected`.
    pub fn project_options(&mut self, selected: &[String]) -> Result<Vec<ProjectOption>, AppError> {
        let client = &self.client;
        let options = self
            .project_options
            .get_or_refresh(Instant::now(), || {
                let projects = client.search_projects(&SearchRequest::default())?;
                Ok(projects.iter().map(ProjectOption::from).collect())
            })
            .map_err(|err| AppError::operation("Error fetching projects", err))?;

        Ok(options.iter().filter(|option| !selected.contains(&option.value)).cloned().collect())
    }

    pub fn invalidate_project_options(&mut self) {
        self.project_options.invalidate();
    }
}

/// Build a dispatcher backed by the HTTP client.
pub fn connect(config: &ConduitConfig) -> Result<Dispatcher<HttpConduitClient>, AppError> {
    Ok(Dispatcher::new(http_client(config)?).with_resource(config.host.to_string()))
}

/// Build the HTTP client, reporting any failure as a connection error naming
/// the configured host.
pub fn http_client(config: &ConduitConfig) -> Result<HttpConduitClient, AppError> {
    HttpConduitClient::new(config).map_err(|err| match err {
        AppError::Connection { .. } => err,
        other => AppError::Connection {
            resource: config.host.to_string(),
            message: other.to_string(),
        },
    })
}

fn task_identifier(input: &str) -> Result<ObjectIdentifier, AppError> {
    if input.trim().is_empty() {
        return Err(AppError::MissingField(
            "Task PHID or ID is required to update a task".to_string(),
        ));
    }
    ObjectIdentifier::for_kind(input, PhidKind::Task)
}

pub(crate) fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<Record>, AppError> {
    items.iter().map(|item| Ok(serde_json::to_value(item)?)).collect()
}
