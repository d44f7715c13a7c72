//! Task (Maniphest) search constraints.

use serde::{Deserialize, Serialize};

use super::{FilterSpec, list, number, numbers, phids, text};
use crate::domain::AppError;
use crate::domain::phid::{Phid, PhidKind};

/// Raw task search form as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TaskSearchForm {
    pub ids: Option<String>,
    pub phids: Option<String>,
    pub assigned: Option<String>,
    #[serde(rename = "authorPHIDs")]
    pub author_phids: Option<String>,
    pub status: Option<String>,
    pub priorities: Option<String>,
    pub subtype: Option<String>,
    #[serde(rename = "columnPHIDs")]
    pub column_phids: Option<String>,
    pub has_parents: Option<bool>,
    pub has_subtasks: Option<bool>,
    #[serde(rename = "parentIDs")]
    pub parent_ids: Option<String>,
    #[serde(rename = "subtaskIDs")]
    pub subtask_ids: Option<String>,
    pub group: Option<String>,
    pub created_before: Option<String>,
    pub created_after: Option<String>,
    pub modified_before: Option<String>,
    pub modified_after: Option<String>,
    pub closed_start: Option<String>,
    pub closed_end: Option<String>,
    #[serde(rename = "closerPHIDs")]
    pub closer_phids: Option<String>,
    pub query: Option<String>,
    pub subscribers: Option<String>,
    pub projects: Option<String>,
}

/// Filter object for `maniphest.search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phids: Option<Vec<Phid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Vec<String>>,
    #[serde(rename = "authorPHIDs", skip_serializing_if = "Option::is_none")]
    pub author_phids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<String>>,
    #[serde(rename = "columnPHIDs", skip_serializing_if = "Option::is_none")]
    pub column_phids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_parents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_subtasks: Option<bool>,
    #[serde(rename = "parentIDs", skip_serializing_if = "Option::is_none")]
    pub parent_ids: Option<Vec<i64>>,
    #[serde(rename = "subtaskIDs", skip_serializing_if = "Option::is_none")]
    pub subtask_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_end: Option<i64>,
    #[serde(rename = "closerPHIDs", skip_serializing_if = "Option::is_none")]
    pub closer_phids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
}

impl FilterSpec for TaskConstraints {}

/// Group value meaning "no grouping"; treated as unspecified.
const GROUP_NONE: &str = "none";

impl TaskSearchForm {
    /// Build the `maniphest.search` constraints.
    ///
    /// Fails when `phids` holds anything but TASK PHIDs or when a numeric
    /// field holds a non-integer token.
    pub fn build_constraints(&self) -> Result<TaskConstraints, AppError> {
        Ok(TaskConstraints {
            ids: numbers("ids", &self.ids)?,
            phids: phids(&self.phids, PhidKind::Task)?,
            assigned: list(&self.assigned),
            author_phids: list(&self.author_phids),
            statuses: list(&self.status),
            priorities: numbers("priorities", &self.priorities)?,
            subtypes: list(&self.subtype),
            column_phids: list(&self.column_phids),
            has_parents: self.has_parents,
            has_subtasks: self.has_subtasks,
            parent_ids: numbers("parentIDs", &self.parent_ids)?,
            subtask_ids: numbers("subtaskIDs", &self.subtask_ids)?,
            group: text(&self.group)
                .map(|group| group.trim().to_string())
                .filter(|group| group != GROUP_NONE),
            created_start: number("createdAfter", &self.created_after)?,
            created_end: number("createdBefore", &self.created_before)?,
            modified_start: number("modifiedAfter", &self.modified_after)?,
            modified_end: number("modifiedBefore", &self.modified_before)?,
            closed_start: number("closedStart", &self.closed_start)?,
            closed_end: number("closedEnd", &self.closed_end)?,
            closer_phids: list(&self.closer_phids),
            query: text(&self.query),
            subscribers: list(&self.subscribers),
            projects: list(&self.projects),
        })
    }
}

/// Filters accepted by the task poller.
///
/// A subset of [`TaskSearchForm`]: the time window is owned by the poller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TaskTriggerForm {
    pub assigned: Option<String>,
    #[serde(rename = "authorPHIDs")]
    pub author_phids: Option<String>,
    pub status: Option<String>,
    pub priorities: Option<String>,
    pub subtype: Option<String>,
    #[serde(rename = "columnPHIDs")]
    pub column_phids: Option<String>,
    pub has_parents: Option<bool>,
    pub has_subtasks: Option<bool>,
    #[serde(rename = "parentIDs")]
    pub parent_ids: Option<String>,
    #[serde(rename = "subtaskIDs")]
    pub subtask_ids: Option<String>,
    #[serde(rename = "closerPHIDs")]
    pub closer_phids: Option<String>,
    pub query: Option<String>,
    pub subscribers: Option<String>,
    pub projects: Option<String>,
}

impl TaskTriggerForm {
    pub fn build_constraints(&self) -> Result<TaskConstraints, AppError> {
        TaskSearchForm::from(self.clone()).build_constraints()
    }
}

impl From<TaskTriggerForm> for TaskSearchForm {
    fn from(form: TaskTriggerForm) -> Self {
        TaskSearchForm {
            assigned: form.assigned,
            author_phids: form.author_phids,
            status: form.status,
            priorities: form.priorities,
            subtype: form.subtype,
            column_phids: form.column_phids,
            has_parents: form.has_parents,
            has_subtasks: form.has_subtasks,
            parent_ids: form.parent_ids,
            subtask_ids: form.subtask_ids,
            closer_phids: form.closer_phids,
            query: form.query,
            subscribers: form.subscribers,
            projects: form.projects,
            ..TaskSearchForm::default()
        }
    }
}
