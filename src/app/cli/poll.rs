//! Poll command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use super::form::{load_form, set};
use crate::app::PollEvent;
use crate::domain::{AppError, TaskTriggerForm};

const DEFAULT_STATE_PATH: &str = ".phorge/poll-state.toml";

#[derive(Args, Debug)]
pub struct PollArgs {
    /// task-created or task-updated
    #[arg(long)]
    event: PollEvent,
    /// File holding the last poll timestamp
    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,
    /// JSON file with filter fields
    #[arg(long)]
    form: Option<PathBuf>,
    #[arg(long)]
    assigned: Option<String>,
    #[arg(long)]
    author_phids: Option<String>,
    #[arg(long)]
    status: Option<String>,
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
    #[arg(long)]
    parent_ids: Option<String>,
    #[arg(long)]
    subtask_ids: Option<String>,
    #[arg(long)]
    closer_phids: Option<String>,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    subscribers: Option<String>,
    #[arg(long)]
    projects: Option<String>,
}

impl PollArgs {
    fn filters(&mut self) -> Result<TaskTriggerForm, AppError> {
        let mut form: TaskTriggerForm = load_form(self.form.as_deref())?;
        set(&mut form.assigned, self.assigned.take());
        set(&mut form.author_phids, self.author_phids.take());
        set(&mut form.status, self.status.take());
        set(&mut form.priorities, self.priorities.take());
        set(&mut form.subtype, self.subtype.take());
        set(&mut form.column_phids, self.column_phids.take());
        set(&mut form.has_parents, self.has_parents.take());
        set(&mut form.has_subtasks, self.has_subtasks.take());
        set(&mut form.parent_ids, self.parent_ids.take());
        set(&mut form.subtask_ids, self.subtask_ids.take());
        set(&mut form.closer_phids, self.closer_phids.take());
        set(&mut form.query, self.query.take());
        set(&mut form.subscribers, self.subscribers.take());
        set(&mut form.projects, self.projects.take());
        Ok(form)
    }
}

pub fn run_poll(mut args: PollArgs, config: Option<&Path>) -> Result<(), AppError> {
    let filters = args.filters()?;
    let now = chrono::Utc::now().timestamp();
    let records = crate::poll(config, &args.state, args.event, &filters, now)?;
    super::print_json(&records)
}
