//! Task transaction building for `maniphest.edit`.
//!
//! [`TaskMutation`] is the canonical, keyed form of a create/edit request.
//! It is sent over the wire as an ordered list of `{type, value}` entries.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AppError;
use super::parse::{specified, split_list};

/// Raw create/edit form. Relation fields take comma-separated PHID lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TaskMutationForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub edit_policy: Option<String>,
    pub view_policy: Option<String>,
    pub column: Option<String>,
    pub comment: Option<String>,
    pub mfa: Option<bool>,
    pub owner: Option<String>,
    pub parent: Option<String>,
    pub priority: Option<String>,
    pub space: Option<String>,
    pub status: Option<String>,
    pub subtype: Option<String>,
    pub add_commits: Option<String>,
    pub remove_commits: Option<String>,
    pub set_commits: Option<String>,
    pub add_parents: Option<String>,
    pub remove_parents: Option<String>,
    pub set_parents: Option<String>,
    pub add_projects: Option<String>,
    pub remove_projects: Option<String>,
    pub set_projects: Option<String>,
    pub add_subscribers: Option<String>,
    pub remove_subscribers: Option<String>,
    pub set_subscribers: Option<String>,
    pub add_subtasks: Option<String>,
    pub remove_subtasks: Option<String>,
    pub set_subtasks: Option<String>,
}

/// Add/remove/set lists for one relation.
///
/// `set` replaces the whole relation; combining it with `add`/`remove` is
/// passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationEdit {
    pub add: Option<Vec<String>>,
    pub remove: Option<Vec<String>>,
    pub set: Option<Vec<String>>,
}

impl RelationEdit {
    fn from_fields(
        add: &Option<String>,
        remove: &Option<String>,
        set: &Option<String>,
    ) -> Option<Self> {
        let edit = RelationEdit { add: ids(add), remove: ids(remove), set: ids(set) };
        if edit == RelationEdit::default() { None } else { Some(edit) }
    }
}

fn ids(value: &Option<String>) -> Option<Vec<String>> {
    specified(value).map(split_list).filter(|tokens| !tokens.is_empty())
}

fn text(value: &Option<String>) -> Option<String> {
    specified(value).map(str::to_string)
}

/// Canonical set of changes applied to one task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMutation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub edit_policy: Option<String>,
    pub view_policy: Option<String>,
    pub column: Option<String>,
    pub comment: Option<String>,
    pub mfa: bool,
    pub owner: Option<String>,
    pub parent: Option<String>,
    pub priority: Option<String>,
    pub space: Option<String>,
    pub status: Option<String>,
    pub subtype: Option<String>,
    pub commits: Option<RelationEdit>,
    pub parents: Option<RelationEdit>,
    pub projects: Option<RelationEdit>,
    pub subscribers: Option<RelationEdit>,
    pub subtasks: Option<RelationEdit>,
}

impl TaskMutation {
    /// Build the mutation for a new task. Title and description are required.
    pub fn for_create(form: &TaskMutationForm) -> Result<Self, AppError> {
        let (Some(title), Some(description)) = (text(&form.title), text(&form.description))
        else {
            return Err(AppError::MissingField(
                "Title and a Description is required to create a task".to_string(),
            ));
        };

        Ok(TaskMutation { title: Some(title), description: Some(description), ..Self::fields(form) })
    }

    /// Build the mutation for an existing task.
    ///
    /// Title and description are not part of edit transactions and are
    /// ignored when present.
    pub fn for_edit(form: &TaskMutationForm) -> Result<Self, AppError> {
        if text(&form.title).is_some() || text(&form.description).is_some() {
            warn!("Ignoring title/description on task edit; they are only applied on create");
        }
        let mutation = Self::fields(form);
        if mutation.is_empty() {
            return Err(AppError::MissingField(
                "At least one field is required to update a task".to_string(),
            ));
        }
        Ok(mutation)
    }

    /// A mutation that only adds a comment.
    pub fn comment(text: &str) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::MissingField(
                "A comment is required to comment on a task".to_string(),
            ));
        }
        Ok(TaskMutation { comment: Some(text.to_string()), ..Default::default() })
    }

    fn fields(form: &TaskMutationForm) -> Self {
        TaskMutation {
            title: None,
            description: None,
            edit_policy: text(&form.edit_policy),
            view_policy: text(&form.view_policy),
            column: text(&form.column),
            comment: text(&form.comment),
            mfa: form.mfa.unwrap_or(false),
            owner: text(&form.owner),
            parent: text(&form.parent),
            priority: text(&form.priority),
            space: text(&form.space),
            status: text(&form.status),
            subtype: text(&form.subtype),
            commits: RelationEdit::from_fields(
                &form.add_commits,
                &form.remove_commits,
                &form.set_commits,
            ),
            parents: RelationEdit::from_fields(
                &form.add_parents,
                &form.remove_parents,
                &form.set_parents,
            ),
            projects: RelationEdit::from_fields(
                &form.add_projects,
                &form.remove_projects,
                &form.set_projects,
            ),
            subscribers: RelationEdit::from_fields(
                &form.add_subscribers,
                &form.remove_subscribers,
                &form.set_subscribers,
            ),
            subtasks: RelationEdit::from_fields(
                &form.add_subtasks,
                &form.remove_subtasks,
                &form.set_subtasks,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskMutation::default()
    }

    /// Ordered `{type, value}` list: title, description, scalar fields, then
    /// each relation's add, remove and set.
    pub fn to_transactions(&self) -> Vec<Transaction> {
        let mut out = Vec::new();

        let scalars = [
            ("title", &self.title),
            ("description", &self.description),
            ("edit", &self.edit_policy),
            ("view", &self.view_policy),
            ("column", &self.column),
            ("comment", &self.comment),
        ];
        for (kind, value) in scalars {
            if let Some(value) = value {
                out.push(Transaction::text(kind, value));
            }
        }

        if self.mfa {
            out.push(Transaction { kind: "mfa".to_string(), value: TransactionValue::Flag(true) });
        }

        let scalars = [
            ("owner", &self.owner),
            ("parent", &self.parent),
            ("priority", &self.priority),
            ("space", &self.space),
            ("status", &self.status),
            ("subtype", &self.subtype),
        ];
        for (kind, value) in scalars {
            if let Some(value) = value {
                out.push(Transaction::text(kind, value));
            }
        }

        let relations = [
            ("commits", &self.commits),
            ("parents", &self.parents),
            ("projects", &self.projects),
            ("subscribers", &self.subscribers),
            ("subtasks", &self.subtasks),
        ];
        for (relation, edit) in relations {
            let Some(edit) = edit else { continue };
            for (op, values) in [("add", &edit.add), ("remove", &edit.remove), ("set", &edit.set)]
            {
                if let Some(values) = values {
                    out.push(Transaction {
                        kind: format!("{}.{}", relation, op),
                        value: TransactionValue::List(values.clone()),
                    });
                }
            }
        }

        out
    }
}

/// One entry of the `transactions` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: TransactionValue,
}

impl Transaction {
    fn text(kind: &str, value: &str) -> Self {
        Transaction { kind: kind.to_string(), value: TransactionValue::Text(value.to_string()) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransactionValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}
