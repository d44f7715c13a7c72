//! Project commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use super::form::{load_form, set};
use crate::app::Action;
use crate::domain::{AppError, ProjectSearchForm};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Search projects
    #[clap(visible_alias = "s")]
    Search(ProjectSearchArgs),
    /// List projects as name/PHID options
    Options {
        /// Project PHIDs to leave out
        #[arg(long, value_delimiter = ',')]
        selected: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProjectSearchArgs {
    /// JSON file with search fields
    #[arg(long)]
    form: Option<PathBuf>,
    /// Comma-separated project IDs
    #[arg(long)]
    ids: Option<String>,
    /// Comma-separated project PHIDs
    #[arg(long)]
    phids: Option<String>,
    #[arg(long)]
    slugs: Option<String>,
    /// Comma-separated member user PHIDs
    #[arg(long)]
    members: Option<String>,
    /// Comma-separated watcher user PHIDs
    #[arg(long)]
    watchers: Option<String>,
    /// active, archived or all
    #[arg(long)]
    status: Option<String>,
    #[arg(long, value_name = "BOOL")]
    is_milestone: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    is_root: Option<bool>,
    #[arg(long)]
    min_depth: Option<i64>,
    #[arg(long)]
    max_depth: Option<i64>,
    #[arg(long)]
    subtypes: Option<String>,
    #[arg(long)]
    icons: Option<String>,
    #[arg(long)]
    colors: Option<String>,
    #[arg(long)]
    parents: Option<String>,
    #[arg(long)]
    ancestors: Option<String>,
    #[arg(long)]
    query: Option<String>,
    /// Attachments to include: members, watchers, ancestors
    #[arg(long = "attach", value_delimiter = ',')]
    attachments: Vec<String>,
    #[arg(long)]
    limit: Option<u32>,
}

impl ProjectSearchArgs {
    fn into_action(self) -> Result<Action, AppError> {
        let mut form: ProjectSearchForm = load_form(self.form.as_deref())?;
        set(&mut form.ids, self.ids);
        set(&mut form.phids, self.phids);
        set(&mut form.slugs, self.slugs);
        set(&mut form.members, self.members);
        set(&mut form.watchers, self.watchers);
        set(&mut form.status, self.status);
        set(&mut form.is_milestone, self.is_milestone);
        set(&mut form.is_root, self.is_root);
        set(&mut form.min_depth, self.min_depth);
        set(&mut form.max_depth, self.max_depth);
        set(&mut form.subtypes, self.subtypes);
        set(&mut form.icons, self.icons);
        set(&mut form.colors, self.colors);
        set(&mut form.parents, self.parents);
        set(&mut form.ancestors, self.ancestors);
        set(&mut form.query, self.query);
        Ok(Action::SearchProjects { form, attachments: self.attachments, limit: self.limit })
    }
}

pub fn run_project(command: ProjectCommands, config: Option<&Path>) -> Result<(), AppError> {
    match command {
        ProjectCommands::Search(args) => {
            let action = args.into_action()?;
            let records = crate::execute(config, action)?;
            super::print_json(&records)
        }
        ProjectCommands::Options { selected } => {
            let options = crate::project_options(config, &selected)?;
            super::print_json(&options)
        }
    }
}
