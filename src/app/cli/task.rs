//! Task commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use super::form::{load_form, set};
use crate::app::Action;
use crate::domain::{AppError, TaskMutationForm, TaskSearchForm};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Search tasks
    #[clap(visible_alias = "s")]
    Search(TaskSearchArgs),
    /// Create a task (title and description are required)
    #[clap(visible_alias = "c")]
    Create(TaskMutationArgs),
    /// Edit an existing task
    #[clap(visible_alias = "e")]
    Edit {
        /// Task ID (123) or PHID (PHID-TASK-...)
        identifier: String,
        #[command(flatten)]
        args: TaskMutationArgs,
    },
    /// Add a comment to a task
    Comment {
        /// Task ID (123) or PHID (PHID-TASK-...)
        identifier: String,
        /// Comment text
        text: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct TaskSearchArgs {
    /// JSON file with search fields
    #[arg(long)]
    form: Option<PathBuf>,
    /// Comma-separated task IDs
    #[arg(long)]
    ids: Option<String>,
    /// Comma-separated task PHIDs
    #[arg(long)]
    phids: Option<String>,
    /// Comma-separated assignee user PHIDs
    #[arg(long)]
    assigned: Option<String>,
    /// Comma-separated author user PHIDs
    #[arg(long)]
    author_phids: Option<String>,
    /// Comma-separated statuses (open, resolved, ...)
    #[arg(long)]
    status: Option<String>,
    /// Comma-separated numeric priorities
    #[arg(long)]
    priorities: Option<String>,
    #[arg(long)]
    subtype: Option<String>,
    #[arg(long)]
    column_phids: Option<String>,
    #[arg(long, value_name = "BOOL")]
    has_parents: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    has_subtasks: Option<bool>,
    /// Comma-separated parent task IDs
    #[arg(long)]
    parent_ids: Option<String>,
    /// Comma-separated subtask IDs
    #[arg(long)]
    subtask_ids: Option<String>,
    /// priority, status, project or none
    #[arg(long)]
    group: Option<String>,
    /// Unix timestamp upper bound on creation time
    #[arg(long)]
    created_before: Option<String>,
    /// Unix timestamp lower bound on creation time
    #[arg(long)]
    created_after: Option<String>,
    #[arg(long)]
    modified_before: Option<String>,
    #[arg(long)]
    modified_after: Option<String>,
    #[arg(long)]
    closed_start: Option<String>,
    #[arg(long)]
    closed_end: Option<String>,
    #[arg(long)]
    closer_phids: Option<String>,
    /// Full-text query
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    subscribers: Option<String>,
    /// Comma-separated project PHIDs
    #[arg(long)]
    projects: Option<String>,
    /// Attachments to include: columns, projects, subscribers
    #[arg(long = "attach", value_delimiter = ',')]
    attachments: Vec<String>,
    /// Maximum number of results
    #[arg(long)]
    limit: Option<u32>,
}

impl TaskSearchArgs {
    fn into_action(self) -> Result<Action, AppError> {
        let mut form: TaskSearchForm = load_form(self.form.as_deref())?;
        set(&mut form.ids, self.ids);
        set(&mut form.phids, self.phids);
        set(&mut form.assigned, self.assigned);
        set(&mut form.author_phids, self.author_phids);
        set(&mut form.status, self.status);
        set(&mut form.priorities, self.priorities);
        set(&mut form.subtype, self.subtype);
        set(&mut form.column_phids, self.column_phids);
        set(&mut form.has_parents, self.has_parents);
        set(&mut form.has_subtasks, self.has_subtasks);
        set(&mut form.parent_ids, self.parent_ids);
        set(&mut form.subtask_ids, self.subtask_ids);
        set(&mut form.group, self.group);
        set(&mut form.created_before, self.created_before);
        set(&mut form.created_after, self.created_after);
        set(&mut form.modified_before, self.modified_before);
        set(&mut form.modified_after, self.modified_after);
        set(&mut form.closed_start, self.closed_start);
        set(&mut form.closed_end, self.closed_end);
        set(&mut form.closer_phids, self.closer_phids);
        set(&mut form.query, self.query);
        set(&mut form.subscribers, self.subscribers);
        set(&mut form.projects, self.projects);
        Ok(Action::SearchTasks { form, attachments: self.attachments, limit: self.limit })
    }
}

/// Mutation flags shared by `create` and `edit`. Relation flags take
/// comma-separated PHIDs.
#[derive(Args, Debug, Default)]
pub struct TaskMutationArgs {
    /// JSON file with mutation fields
    #[arg(long)]
    form: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Edit policy PHID or name
    #[arg(long)]
    edit_policy: Option<String>,
    /// View policy PHID or name
    #[arg(long)]
    view_policy: Option<String>,
    /// Workboard column PHID
    #[arg(long)]
    column: Option<String>,
    #[arg(long)]
    comment: Option<String>,
    /// Require MFA for this edit
    #[arg(long, value_name = "BOOL")]
    mfa: Option<bool>,
    /// Owner user PHID
    #[arg(long)]
    owner: Option<String>,
    /// Parent task PHID
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    /// Space PHID
    #[arg(long)]
    space: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    subtype: Option<String>,
    #[arg(long)]
    add_commits: Option<String>,
    #[arg(long)]
    remove_commits: Option<String>,
    #[arg(long)]
    set_commits: Option<String>,
    #[arg(long)]
    add_parents: Option<String>,
    #[arg(long)]
    remove_parents: Option<String>,
    #[arg(long)]
    set_parents: Option<String>,
    #[arg(long)]
    add_projects: Option<String>,
    #[arg(long)]
    remove_projects: Option<String>,
    #[arg(long)]
    set_projects: Option<String>,
    #[arg(long)]
    add_subscribers: Option<String>,
    #[arg(long)]
    remove_subscribers: Option<String>,
    #[arg(long)]
    set_subscribers: Option<String>,
    #[arg(long)]
    add_subtasks: Option<String>,
    #[arg(long)]
    remove_subtasks: Option<String>,
    #[arg(long)]
    set_subtasks: Option<String>,
}

impl TaskMutationArgs {
    fn into_form(self) -> Result<TaskMutationForm, AppError> {
        let mut form: TaskMutationForm = load_form(self.form.as_deref())?;
        set(&mut form.title, self.title);
        set(&mut form.description, self.description);
        set(&mut form.edit_policy, self.edit_policy);
        set(&mut form.view_policy, self.view_policy);
        set(&mut form.column, self.column);
        set(&mut form.comment, self.comment);
        set(&mut form.mfa, self.mfa);
        set(&mut form.owner, self.owner);
        set(&mut form.parent, self.parent);
        set(&mut form.priority, self.priority);
        set(&mut form.space, self.space);
        set(&mut form.status, self.status);
        set(&mut form.subtype, self.subtype);
        set(&mut form.add_commits, self.add_commits);
        set(&mut form.remove_commits, self.remove_commits);
        set(&mut form.set_commits, self.set_commits);
        set(&mut form.add_parents, self.add_parents);
        set(&mut form.remove_parents, self.remove_parents);
        set(&mut form.set_parents, self.set_parents);
        set(&mut form.add_projects, self.add_projects);
        set(&mut form.remove_projects, self.remove_projects);
        set(&mut form.set_projects, self.set_projects);
        set(&mut form.add_subscribers, self.add_subscribers);
        set(&mut form.remove_subscribers, self.remove_subscribers);
        set(&mut form.set_subscribers, self.set_subscribers);
        set(&mut form.add_subtasks, self.add_subtasks);
        set(&mut form.remove_subtasks, self.remove_subtasks);
        set(&mut form.set_subtasks, self.set_subtasks);
        Ok(form)
    }
}

pub fn run_task(command: TaskCommands, config: Option<&Path>) -> Result<(), AppError> {
    let action = match command {
        TaskCommands::Search(args) => args.into_action()?,
        TaskCommands::Create(args) => Action::CreateTask(args.into_form()?),
        TaskCommands::Edit { identifier, args } => {
            Action::EditTask { identifier, form: args.into_form()? }
        }
        TaskCommands::Comment { identifier, text } => {
            Action::CommentTask { identifier, comment: text }
        }
    };

    let records = crate::execute(config, action)?;
    super::print_json(&records)
}
